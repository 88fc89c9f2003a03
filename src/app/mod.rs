//! Application state types and entry glue.
//!
//! Defines the enums and structs that model the TUI state around the CRUD
//! controller, plus the theme machinery and helpers to construct defaults.
//! The event loop lives in [`update`] (re-exported as `run`).

pub mod keymap;
pub mod update;

use ratatui::style::Color;
use std::time::Instant;

use crate::controller::CrudController;
use crate::store::{User, UserStore};

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Modal,
}

/// Which form input currently has focus.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Role,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Email,
            FormField::Email => FormField::Role,
            FormField::Role => FormField::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Name => FormField::Role,
            FormField::Email => FormField::Name,
            FormField::Role => FormField::Email,
        }
    }
}

/// Modal dialog states layered over the main screen.
#[derive(Clone, Debug)]
pub enum ModalState {
    /// The create/edit form. The draft itself lives in the controller;
    /// `hint` turns on after a submit attempt with missing fields.
    UserForm { focused: FormField, hint: bool },
    /// Pre-delete confirmation; 0 = Yes, 1 = No.
    DeleteConfirm { id: u64, selected: usize },
    Help,
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub text: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub error: Color,
}

impl Theme {
    /// Dark default theme.
    #[allow(dead_code)]
    pub fn dark() -> Self {
        Self {
            text: Color::Gray,
            title: Color::Cyan,
            border: Color::Gray,
            header_bg: Color::Black,
            header_fg: Color::Cyan,
            status_bg: Color::DarkGray,
            status_fg: Color::Black,
            highlight_fg: Color::Yellow,
            highlight_bg: Color::Reset,
            error: Color::Red,
        }
    }

    /// Catppuccin Mocha theme defaults.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),         // text
            title: Color::Rgb(0xcb, 0xa6, 0xf7),        // mauve
            border: Color::Rgb(0x58, 0x5b, 0x70),       // surface2
            header_bg: Color::Rgb(0x31, 0x32, 0x44),    // surface0
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),    // lavender
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),    // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),    // text
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
            error: Color::Rgb(0xf3, 0x8b, 0xa8),        // red
        }
    }

    /// Load theme from a simple key=value file. Unknown or missing keys
    /// fall back to `mocha`.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut theme = Self::mocha();

        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let key = parts.next().map(|s| s.trim()).unwrap_or("");
            let val = parts.next().map(|s| s.trim()).unwrap_or("");
            if key.is_empty() || val.is_empty() {
                continue;
            }
            if let Some(color) = Self::parse_color(val) {
                match key {
                    "text" => theme.text = color,
                    "title" => theme.title = color,
                    "border" => theme.border = color,
                    "header_bg" => theme.header_bg = color,
                    "header_fg" => theme.header_fg = color,
                    "status_bg" => theme.status_bg = color,
                    "status_fg" => theme.status_fg = color,
                    "highlight_fg" => theme.highlight_fg = color,
                    "highlight_bg" => theme.highlight_bg = color,
                    "error" => theme.error = color,
                    _ => {}
                }
            }
        }

        Some(theme)
    }

    /// Parse a color from hex ("#RRGGBB" or "RRGGBB") or the special name
    /// "reset".
    fn parse_color(s: &str) -> Option<Color> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "reset" {
            return Some(Color::Reset);
        }
        let hex = lower.strip_prefix('#').unwrap_or(lower.as_str());
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Some(Color::Rgb(r, g, b));
            }
        }
        None
    }

    /// Persist the theme to a config file in key=value format.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;

        fn color_to_str(c: Color) -> String {
            match c {
                Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
                Color::Reset => "reset".to_string(),
                Color::Black => "#000000".to_string(),
                Color::Red => "#FF0000".to_string(),
                Color::Yellow => "#FFFF00".to_string(),
                Color::Cyan => "#00FFFF".to_string(),
                Color::Gray => "#B3B3B3".to_string(),
                Color::DarkGray => "#4D4D4D".to_string(),
                other => format!("{:?}", other),
            }
        }

        let mut buf = String::new();
        buf.push_str("# remote-user-manager theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, or 'reset'\n\n");
        let mut kv = |k: &str, v: Color| {
            let _ = writeln!(&mut buf, "{} = {}", k, color_to_str(v));
        };
        kv("text", self.text);
        kv("title", self.title);
        kv("border", self.border);
        kv("header_bg", self.header_bg);
        kv("header_fg", self.header_fg);
        kv("status_bg", self.status_bg);
        kv("status_fg", self.status_fg);
        kv("highlight_fg", self.highlight_fg);
        kv("highlight_bg", self.highlight_bg);
        kv("error", self.error);

        std::fs::write(path, buf)
    }

    /// Ensure a config file exists; if missing, write one with the default
    /// theme and return it. If present, load from it; on parse errors,
    /// return `mocha`.
    pub fn load_or_init(path: &str) -> Self {
        let p = std::path::Path::new(path);
        if p.exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        let t = Self::mocha();
        let _ = t.write_file(path);
        t
    }
}

pub struct AppState {
    pub started_at: Instant,
    pub controller: CrudController,
    /// Subset of the mirrored listing currently shown (search applied).
    pub visible: Vec<User>,
    pub selected_index: usize,
    pub rows_per_page: usize,
    pub input_mode: InputMode,
    pub search_query: String,
    pub theme: Theme,
    pub keymap: keymap::Keymap,
    pub modal: Option<ModalState>,
}

impl AppState {
    /// Create the state around a store and perform the initial fetch.
    /// A fetch failure lands in the controller's error field and leaves
    /// the listing empty.
    pub fn new(store: Box<dyn UserStore>) -> Self {
        Self::with_config(store, "theme.conf", "keybinds.conf")
    }

    pub fn with_config(store: Box<dyn UserStore>, theme_path: &str, keybinds_path: &str) -> Self {
        let mut controller = CrudController::new(store);
        controller.refresh();
        let visible = controller.state().users.clone();
        Self {
            started_at: Instant::now(),
            controller,
            visible,
            selected_index: 0,
            rows_per_page: 10,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            theme: Theme::load_or_init(theme_path),
            keymap: keymap::Keymap::load_or_init(keybinds_path),
            modal: None,
        }
    }

    /// Re-derive the visible subset from the mirror and the search query,
    /// clamping the selection to the new length.
    pub fn sync_visible(&mut self) {
        self.visible =
            crate::search::filter_users(&self.controller.state().users, &self.search_query);
        if self.selected_index >= self.visible.len() {
            self.selected_index = self.visible.len().saturating_sub(1);
        }
    }

    pub fn selected_user(&self) -> Option<&User> {
        self.visible.get(self.selected_index)
    }

    /// Mutable access to one draft field, for the form inputs.
    pub fn form_field_mut(&mut self, field: FormField) -> &mut String {
        let draft = self.controller.draft_mut();
        match field {
            FormField::Name => &mut draft.name,
            FormField::Email => &mut draft.email,
            FormField::Role => &mut draft.role,
        }
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
