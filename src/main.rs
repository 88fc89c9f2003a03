//! remote-user-manager binary entry point.
//!
//! Parses the command line, initializes the terminal in raw mode, runs the
//! TUI event loop against the configured user service, and restores the
//! terminal state on exit.

use anyhow::Context;
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::path::{Path, PathBuf};

use remote_user_manager::app;
use remote_user_manager::app::AppState;
use remote_user_manager::store::HttpUserStore;

#[derive(Debug, Parser)]
#[command(name = "remote-user-manager", version, about)]
struct Cli {
    /// Base URL of the user service
    #[arg(long, env = "USER_API_URL", default_value = HttpUserStore::DEFAULT_URL)]
    url: String,
    /// Theme configuration file
    #[arg(long, default_value = "theme.conf")]
    theme: String,
    /// Keybindings configuration file
    #[arg(long, default_value = "keybinds.conf")]
    keybinds: String,
    /// Append tracing output to this file (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> anyhow::Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// The terminal owns stdout, so tracing output goes to a file sink when one
/// is requested; otherwise logging stays off.
fn init_tracing(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let store = HttpUserStore::new(&cli.url).context("create HTTP client")?;
    let state = AppState::with_config(Box::new(store), &cli.theme, &cli.keybinds);

    let mut terminal = init_terminal().context("init terminal")?;
    let res = app::run(&mut terminal, state);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        eprintln!("application error: {err}");
    }
    Ok(())
}
