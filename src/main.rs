use std::io;
use std::time::Duration;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use dareup::config::AppConfig;
use dareup::core::logging::{self, AppError, TerminalError};
use dareup::tui::app::AppState;
use dareup::tui::services::Services;

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

// The app state holds the onboarding wizard's shared draft and is not Send,
// so it runs on the main task instead of being spawned.
#[tokio::main]
async fn main() -> miette::Result<()> {
    let config = AppConfig::load();
    let _log_guard = logging::init_tui(Some(config.log_dir()));
    log::info!("{} v{} starting", dareup::NAME, dareup::VERSION);

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let services = Services::init(&config, event_tx);
    let mut app = AppState::new(event_rx, services).map_err(|e| {
        AppError::new(format!("Invalid wizard configuration: {e}"))
            .with_help(format!("Check the [wizard] section of {}", AppConfig::config_path().display()))
    })?;

    let mut terminal = setup_terminal(config.tui.mouse_enabled)?;
    let result = app
        .run(&mut terminal, Duration::from_millis(config.tui.tick_rate_ms))
        .await;
    let restored = restore_terminal(&mut terminal, config.tui.mouse_enabled);

    app.into_services().auth.shutdown().await;
    log::info!("{} stopped", dareup::NAME);

    result.map_err(|e| TerminalError::new(e.to_string()))?;
    restored?;
    Ok(())
}

fn setup_terminal(mouse: bool) -> Result<Tui, TerminalError> {
    let fail = |e: io::Error| TerminalError::new(e.to_string());

    enable_raw_mode().map_err(fail)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(fail)?;
    if mouse {
        execute!(stdout, EnableMouseCapture).map_err(fail)?;
    }
    Terminal::new(CrosstermBackend::new(stdout)).map_err(fail)
}

fn restore_terminal(terminal: &mut Tui, mouse: bool) -> Result<(), TerminalError> {
    let fail = |e: io::Error| TerminalError::new(e.to_string());

    disable_raw_mode().map_err(fail)?;
    if mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture).map_err(fail)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(fail)?;
    terminal.show_cursor().map_err(fail)
}
