//! Persisted dashboard settings.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use simplelog::LevelFilter;
use thiserror::Error;

/// Settings error type.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("no config directory available")]
    NoConfigDir,
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Dashboard settings.
///
/// Missing fields fall back to their defaults, so older files keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Rows per page in the employee grid; `None` shows everything.
    pub employee_page_size: Option<usize>,
    /// Rows per page in the department grid.
    pub department_page_size: Option<usize>,
    /// Log level name (`error`, `warn`, `info`, `debug`, `trace`, `off`).
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            employee_page_size: Some(10),
            department_page_size: None,
            log_level: "debug".to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from the platform config dir, or defaults.
    pub fn load() -> Result<Self, SettingsError> {
        match crate::paths::settings_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads settings from a file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Saves settings to the platform config dir.
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = crate::paths::settings_file().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Saves settings to a file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).map_err(io_err)
    }

    /// The configured log level, `Debug` if unrecognized.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Debug)
    }
}
