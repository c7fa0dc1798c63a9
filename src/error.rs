//! Error types for option loading and logging setup.
//!
//! Resolving options never fails; only reading options files and installing the
//! log subscriber can.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("Options file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Options I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid options file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl From<config::ConfigError> for OptionsError {
    fn from(err: config::ConfigError) -> Self {
        OptionsError::Config(err.to_string())
    }
}
