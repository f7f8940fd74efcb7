#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::io::{self, stdout};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use boothform::backend::HttpBackend;
use boothform::config::Config;
use boothform::logging;
use boothform::tui::{App, AppError, AppSettings};

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load().map_err(AppError::from)?;
    let log_path = logging::default_log_path().map_err(AppError::from)?;
    logging::init(&log_path, &config.log_level).map_err(AppError::from)?;

    let backend = HttpBackend::new(&config.backend_origin).map_err(AppError::from)?;
    let runtime = tokio::runtime::Runtime::new()?;
    info!(endpoint = %backend.endpoint(), "kiosk starting");

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(
        backend,
        runtime.handle().clone(),
        AppSettings::from_config(&config),
    );
    let result = app.run(&mut terminal);

    let restore_result = restore_terminal();
    info!(stats = ?app.stats(), "kiosk stopped");
    match result {
        Err(e) => Err(e.into()),
        Ok(()) => restore_result.map_err(Into::into),
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn restore_terminal() -> Result<(), io::Error> {
    let raw_result = disable_raw_mode();
    let screen_result = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen);
    raw_result.and(screen_result)
}
