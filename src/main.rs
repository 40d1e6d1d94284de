//! user-dashboard binary entry point.
//!
//! Sets up file logging, initializes the terminal in raw mode, runs the TUI
//! event loop, and restores the terminal state on exit.
//!
use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_subscriber::EnvFilter;

use user_dashboard::app::{self, AppState, Keymap, Theme};
use user_dashboard::cli::Cli;

/// Send tracing output to `path`, filtered by `RUST_LOG` (default `info`).
fn init_logging(path: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {path}"))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;
    tracing::info!(endpoint = %cli.endpoint, screen = ?cli.screen, "starting");

    let theme = Theme::load_or_init(&cli.theme);
    let keymap = Keymap::load_or_init(&cli.keybinds);
    let mut app = AppState::new(cli.settings(), theme, keymap)
        .map_err(|e| anyhow::anyhow!(e))
        .context("build application state")?;

    let mut terminal = init_terminal().context("init terminal")?;

    let res = app::run(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        tracing::error!(error = %err, "application error");
        eprintln!("application error: {err:#}");
    }
    Ok(())
}
