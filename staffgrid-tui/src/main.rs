mod dashboard;
mod error;
mod paths;
mod settings;
mod terminal;
mod wakeup;

use std::fs;
use std::fs::File;
use std::process::ExitCode;

use simplelog::{Config, WriteLogger};
use staffgrid::grid::GridFactory;
use staffgrid::service::{DepartmentService, EmployeeService};

use crate::dashboard::Dashboard;
use crate::error::AppError;
use crate::settings::Settings;
use crate::terminal::Terminal;

/// Sets up file logging under the cache dir, rotating the previous log.
fn init_logging(settings: &Settings) -> Result<(), AppError> {
    paths::rotate_logs();
    let cache = paths::cache_dir().ok_or(AppError::NoCacheDir)?;
    fs::create_dir_all(&cache)?;
    let log_path = paths::log_file().ok_or(AppError::NoCacheDir)?;
    let log_file = File::create(&log_path)?;
    WriteLogger::init(settings.level_filter(), Config::default(), log_file)?;
    Ok(())
}

async fn run(settings: Settings) -> Result<(), AppError> {
    let employees = EmployeeService::new();
    let departments = DepartmentService::new(employees.clone());
    let (wakeup_tx, wakeup_rx) = wakeup::channel();

    let mut factory = GridFactory::new();
    let dashboard = Dashboard::new(&mut factory, settings, &employees, &departments, wakeup_tx);

    let mut terminal = Terminal::new()?;
    dashboard.run(&mut terminal, wakeup_rx).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("Warning: {}, using default settings", e);
        Settings::default()
    });

    if let Err(e) = init_logging(&settings) {
        eprintln!("Warning: {}", e);
    }
    log::info!("Starting staffgrid");

    // The terminal is restored when `run` returns, so errors print cleanly.
    match run(settings).await {
        Ok(()) => {
            log::info!("Exiting");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
