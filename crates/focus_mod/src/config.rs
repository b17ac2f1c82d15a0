//! # Mod Configuration
//!
//! Loaded once, before [`FocusMod::initialize`](crate::FocusMod::initialize):
//!
//! ```toml
//! load_builtin_items = true
//! catalog_path = "data/focus_items.toml"
//! forward_events = true
//! event_capacity = 256
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ModResult;

/// Default bridge channel capacity.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Host-facing switches for the mod.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModConfig {
    /// Register the built-in focus items on initialize.
    pub load_builtin_items: bool,
    /// Extra catalog applied after the built-ins.
    pub catalog_path: Option<PathBuf>,
    /// Forward registry notifications to the host over a channel.
    pub forward_events: bool,
    /// Bridge channel capacity; events beyond it are dropped.
    pub event_capacity: usize,
}

impl Default for ModConfig {
    fn default() -> Self {
        Self {
            load_builtin_items: true,
            catalog_path: None,
            forward_events: true,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl ModConfig {
    /// Parses configuration from TOML text. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns `ModError::InvalidConfig` for malformed TOML, unknown keys,
    /// or a zero event capacity.
    pub fn from_toml_str(text: &str) -> ModResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ModError::Io` if unreadable, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> ModResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Sets the catalog path.
    #[must_use]
    pub fn with_catalog(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    fn validate(&self) -> ModResult<()> {
        if self.forward_events && self.event_capacity == 0 {
            return Err(crate::error::ModError::InvalidConfig(
                "event_capacity must be at least 1 when forward_events is on".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModError;

    #[test]
    fn test_defaults_from_empty() {
        assert_eq!(ModConfig::from_toml_str("").unwrap(), ModConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = ModConfig::from_toml_str("load_builtin_items = false\ncatalog_path = \"x.toml\"").unwrap();
        assert!(!config.load_builtin_items);
        assert_eq!(config.catalog_path, Some(PathBuf::from("x.toml")));
        assert!(config.forward_events);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = ModConfig::from_toml_str("event_capacity = 0").unwrap_err();
        assert!(matches!(err, ModError::InvalidConfig(_)));
        assert!(ModConfig::from_toml_str("event_capacity = 0\nforward_events = false").is_ok());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(ModConfig::from_toml_str("verbose = true").is_err());
    }
}
