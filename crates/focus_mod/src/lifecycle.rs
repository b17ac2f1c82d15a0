//! # Mod Lifecycle
//!
//! The host owns one [`FocusMod`] and drives it explicitly:
//!
//! 1. `initialize()` on load: registry up, bridge attached, built-ins and
//!    catalog registered.
//! 2. `drain_events()` from the host loop.
//! 3. `shutdown()` on unload: bridge detached, registry cleared.
//!
//! The registry is shared through an `Arc`, so gameplay threads can hold
//! their own handle from [`FocusMod::registry`].

use std::sync::Arc;

use focus_items::{CatalogConfig, CatalogReport, ItemRegistry, RegistryEvent};

use crate::bridge::RegistryBridge;
use crate::builtin::{builtin_items, builtin_prefabs};
use crate::config::ModConfig;
use crate::error::ModResult;

/// What [`FocusMod::initialize`] registered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InitReport {
    /// Built-in definitions inserted.
    pub builtin_items: usize,
    /// Built-in prefab handles inserted.
    pub builtin_prefabs: usize,
    /// Result of applying the catalog file, if one was configured.
    pub catalog: Option<CatalogReport>,
}

/// The item layer as seen by the host.
#[derive(Debug)]
pub struct FocusMod {
    config: ModConfig,
    registry: Arc<ItemRegistry>,
    bridge: Option<RegistryBridge>,
    report: Option<InitReport>,
}

impl FocusMod {
    /// Creates the mod with a fresh registry. Nothing is registered until
    /// [`initialize`](Self::initialize).
    #[must_use]
    pub fn new(config: ModConfig) -> Self {
        Self::with_registry(Arc::new(ItemRegistry::new()), config)
    }

    /// Creates the mod around a registry the host already shares.
    #[must_use]
    pub fn with_registry(registry: Arc<ItemRegistry>, config: ModConfig) -> Self {
        Self {
            config,
            registry,
            bridge: None,
            report: None,
        }
    }

    /// Shared registry handle.
    #[must_use]
    pub fn registry(&self) -> &Arc<ItemRegistry> {
        &self.registry
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &ModConfig {
        &self.config
    }

    /// Returns true between `initialize` and `shutdown`.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.report.is_some()
    }

    /// Brings the item layer up.
    ///
    /// A second call logs a warning and returns the first report.
    ///
    /// # Errors
    ///
    /// Returns `ModError::Item` if the configured catalog cannot be read or
    /// parsed. The catalog is loaded before anything is registered, so a
    /// failed call leaves the registry untouched.
    pub fn initialize(&mut self) -> ModResult<InitReport> {
        if let Some(report) = self.report {
            tracing::warn!("Focus mod already initialized");
            return Ok(report);
        }

        let catalog = match &self.config.catalog_path {
            Some(path) => Some(CatalogConfig::load(path)?),
            None => None,
        };

        self.registry.initialize();

        if self.config.forward_events {
            self.bridge = Some(RegistryBridge::attach(&self.registry, self.config.event_capacity));
        }

        let mut report = InitReport::default();

        if self.config.load_builtin_items {
            report.builtin_items = self.registry.register_many(builtin_items());
            report.builtin_prefabs = builtin_prefabs()
                .into_iter()
                .filter(|(id, handle)| self.registry.register_prefab(*id, handle.clone()))
                .count();
        }

        if let Some(catalog) = catalog {
            let applied = catalog.apply(&self.registry);
            if applied.items_skipped > 0 || applied.prefabs_skipped > 0 {
                tracing::warn!(
                    "Catalog skipped {} items and {} prefabs",
                    applied.items_skipped,
                    applied.prefabs_skipped
                );
            }
            report.catalog = Some(applied);
        }

        tracing::info!(
            "Focus mod initialized ({} items, {} prefabs registered)",
            self.registry.registered_item_count(),
            self.registry.registered_prefab_count()
        );

        self.report = Some(report);
        Ok(report)
    }

    /// Tears the item layer down. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if self.report.take().is_none() {
            tracing::debug!("Focus mod shutdown skipped: not initialized");
            return;
        }

        if let Some(bridge) = self.bridge.take() {
            let pending = bridge.pending_count();
            if pending > 0 {
                tracing::debug!("Discarding {} undrained registry events", pending);
            }
        }

        self.registry.shutdown();
        tracing::info!("Focus mod shut down");
    }

    /// Registry notifications since the last drain. Empty when forwarding
    /// is off or the mod is not initialized.
    pub fn drain_events(&self) -> Vec<RegistryEvent> {
        self.bridge.as_ref().map(RegistryBridge::drain).unwrap_or_default()
    }

    /// Notifications lost to a full bridge channel.
    #[must_use]
    pub fn dropped_events(&self) -> u64 {
        self.bridge.as_ref().map_or(0, RegistryBridge::dropped_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::POTION_FOCUS;

    #[test]
    fn test_initialize_registers_builtins() {
        let mut focus = FocusMod::new(ModConfig::default());
        let report = focus.initialize().unwrap();

        assert_eq!(report.builtin_items, 4);
        assert_eq!(report.builtin_prefabs, 4);
        assert!(report.catalog.is_none());
        assert!(focus.is_initialized());
        assert!(focus.registry().is_initialized());
        assert!(focus.registry().contains(POTION_FOCUS));
        assert_eq!(focus.drain_events().len(), 4);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut focus = FocusMod::new(ModConfig::default());
        let first = focus.initialize().unwrap();
        let second = focus.initialize().unwrap();

        assert_eq!(first, second);
        assert_eq!(focus.registry().registered_item_count(), 4);
        assert_eq!(focus.registry().subscriber_count(), 1);
    }

    #[test]
    fn test_builtins_disabled() {
        let config = ModConfig {
            load_builtin_items: false,
            ..ModConfig::default()
        };
        let mut focus = FocusMod::new(config);
        let report = focus.initialize().unwrap();

        assert_eq!(report, InitReport::default());
        assert_eq!(focus.registry().registered_item_count(), 0);
    }

    #[test]
    fn test_forwarding_disabled() {
        let config = ModConfig {
            forward_events: false,
            ..ModConfig::default()
        };
        let mut focus = FocusMod::new(config);
        focus.initialize().unwrap();

        assert_eq!(focus.registry().subscriber_count(), 0);
        assert!(focus.drain_events().is_empty());
        assert_eq!(focus.dropped_events(), 0);
    }

    #[test]
    fn test_shutdown_clears_and_is_idempotent() {
        let mut focus = FocusMod::new(ModConfig::default());
        focus.initialize().unwrap();
        focus.shutdown();

        assert!(!focus.is_initialized());
        assert!(!focus.registry().is_initialized());
        assert_eq!(focus.registry().registered_item_count(), 0);
        assert_eq!(focus.registry().registered_prefab_count(), 0);
        assert_eq!(focus.registry().subscriber_count(), 0);

        focus.shutdown();
        assert!(!focus.is_initialized());
    }

    #[test]
    fn test_missing_catalog_leaves_registry_untouched() {
        let config = ModConfig::default().with_catalog("does/not/exist.toml");
        let mut focus = FocusMod::new(config);

        assert!(focus.initialize().is_err());
        assert!(!focus.is_initialized());
        assert!(!focus.registry().is_initialized());
        assert_eq!(focus.registry().registered_item_count(), 0);
    }

    #[test]
    fn test_reinitialize_after_shutdown() {
        let mut focus = FocusMod::new(ModConfig::default());
        focus.initialize().unwrap();
        focus.shutdown();

        let report = focus.initialize().unwrap();
        assert_eq!(report.builtin_items, 4);
        assert_eq!(focus.registry().subscriber_count(), 1);
    }
}
