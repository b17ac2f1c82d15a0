//! # Item Error Types
//!
//! All errors that can occur in the item layer.
//!
//! The registry surface reports expected failures as `bool`/`Option`;
//! these variants back those results and surface directly from the
//! typed APIs (catalog loading, consumption, `try_register`).

use thiserror::Error;

/// Errors that can occur in the item layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ItemError {
    /// Identifier was empty.
    #[error("item identifier must not be empty")]
    EmptyId,

    /// Identifier is already present in the registry.
    #[error("item already exists: {0}")]
    AlreadyExists(String),

    /// Identifier not found in the registry.
    #[error("item not found: {0}")]
    NotFound(String),

    /// No prefab registered under this identifier.
    #[error("prefab not found: {0}")]
    PrefabNotFound(String),

    /// A required argument was absent.
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    /// Item cannot be consumed.
    #[error("item is not consumable: {0}")]
    NotConsumable(String),

    /// Item is still cooling down.
    #[error("item {id} on cooldown for {remaining_secs:.1}s")]
    OnCooldown {
        /// The item that was used.
        id: String,
        /// Seconds until it can be used again.
        remaining_secs: f32,
    },

    /// A consumer-supplied action failed.
    #[error("consume action failed: {0}")]
    ActionFailed(String),

    /// Invalid catalog or configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Catalog file could not be read.
    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ItemError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<toml::de::Error> for ItemError {
    fn from(err: toml::de::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}

/// Result type for item operations.
pub type ItemResult<T> = Result<T, ItemError>;
