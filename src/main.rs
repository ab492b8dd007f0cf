use std::io;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use trendpulse::config::AppConfig;
use trendpulse::core::logging;
use trendpulse::tui::app::AppState;
use trendpulse::tui::services::Services;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (file-only; the TUI owns the terminal)
    let _log_guard = logging::init_tui();
    log::info!("TrendPulse v{} starting", trendpulse::VERSION);

    let config = AppConfig::load();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Wire services and run the app
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let services = Services::init(&config);
    let mut app = AppState::new(event_rx, event_tx, services);

    let tick_rate = Duration::from_millis(config.tui.tick_rate_ms);
    let result = app.run(&mut terminal, tick_rate).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}
