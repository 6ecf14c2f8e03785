//! Application error type.

use std::io;

use thiserror::Error;

use crate::settings::SettingsError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("no cache directory available for logs")]
    NoCacheDir,
    #[error("failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
