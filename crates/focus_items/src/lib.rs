//! # FOCUS Items
//!
//! Focus-themed consumables and the registry that holds them.
//!
//! ## Design Principles
//!
//! 1. **One lock** - the registry's tables and subscribers share a single mutex
//! 2. **Reported failures** - duplicates and misses are `false`/`None` plus a log line
//! 3. **Clamped stats** - a definition can never hold an out-of-range percentage
//! 4. **Engine at arm's length** - prefabs are opaque handles spawned through a trait
//!
//! ## Example
//!
//! ```rust
//! use focus_items::{FocusState, ItemDefinition, ItemRegistry};
//!
//! let registry = ItemRegistry::new();
//! registry.initialize();
//! registry.register(ItemDefinition::energy_drink("energy_drink_basic", "Energy Drink"));
//!
//! let mut player = FocusState::new(100, 0.5);
//! let drink = registry.get("energy_drink_basic").unwrap();
//! player.consume(&drink).unwrap();
//! assert_eq!(player.focus(), 25.0);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod consume;
pub mod definition;
pub mod effects;
pub mod error;
pub mod prefab;
pub mod rarity;
pub mod registry;

pub use config::{CatalogConfig, CatalogReport};
pub use consume::{consume_from_registry, consume_item, try_consume, ActiveEffect, ConsumeOutcome, FocusState};
pub use definition::{EffectTags, ItemDefinition, ItemId, ItemKind};
pub use error::{ItemError, ItemResult};
pub use prefab::{PrefabHandle, PrefabSpawner};
pub use rarity::Rarity;
pub use registry::{ItemRegistry, RegistryEvent, SubscriptionId};

pub use focus_shared::{Placement, Quaternion, Vec3};
