//! Shared UI components (status bar, modal helpers).
//!
//! Contains small building blocks reused across the screen.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::{AppState, InputMode};

/// Render the bottom status bar: the latest error wins, then the busy
/// indicator, then mode and counts.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let state = app.controller.state();

    if let Some(error) = &state.error {
        let p = Paragraph::new(format!("Error: {error}")).style(
            Style::default()
                .fg(app.theme.error)
                .bg(app.theme.status_bg)
                .add_modifier(Modifier::BOLD),
        );
        f.render_widget(p, area);
        return;
    }

    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
        InputMode::Modal => "MODAL",
    };
    let busy = if state.loading { "  Processing..." } else { "" };
    let filter = if app.search_query.is_empty() {
        String::new()
    } else {
        format!("  filter:'{}'", app.search_query)
    };
    let msg = format!(
        "mode: {mode}{busy}  users:{}/{}{}  rows/page:{}",
        app.visible.len(),
        state.users.len(),
        filter,
        app.rows_per_page
    );
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the help modal with key tips.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let width = 64u16.min(area.width.saturating_sub(4)).max(44);
    let height = 14u16.min(area.height.saturating_sub(4)).max(10);
    let rect = centered_rect(width, height, area);

    let italic = Style::default().add_modifier(Modifier::ITALIC);
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            "Help",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
    ];
    for (label, keys) in [
        ("Navigate", "Arrow keys / j k, PageUp, PageDown"),
        ("New user", "n"),
        ("Edit selection", "Enter / e"),
        ("Delete selection", "d / Delete (asks to confirm)"),
        ("Refresh listing", "r"),
        ("Search", "/ then type; Enter applies, Esc clears"),
        ("Quit", "q"),
    ] {
        lines.push(Line::from(vec![
            Span::raw(format!("{label}: ")),
            Span::styled(keys, italic),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::raw("Keybindings can be changed in keybinds.conf."));

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
