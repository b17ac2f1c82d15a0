//! # Mod Error Types

use focus_items::ItemError;
use thiserror::Error;

/// Errors surfaced to the host application.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModError {
    /// The item layer rejected something (bad catalog, unreadable file).
    #[error(transparent)]
    Item(#[from] ItemError),

    /// Invalid mod configuration file.
    #[error("invalid mod configuration: {0}")]
    InvalidConfig(String),

    /// Mod configuration file could not be read.
    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ModError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<toml::de::Error> for ModError {
    fn from(err: toml::de::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}

/// Result type for mod operations.
pub type ModResult<T> = Result<T, ModError>;
