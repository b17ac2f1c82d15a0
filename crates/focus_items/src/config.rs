//! # Item Catalog Files
//!
//! Item balance data lives in TOML, loaded once at startup:
//!
//! ```toml
//! [[items]]
//! id = "energy_drink_max"
//! name = "MAX Energy Drink"
//! kind = "energy_drink"
//! rarity = "rare"
//! boost_percentage = 40.0
//! tags = ["caffeine", "focus"]
//!
//! [[prefabs]]
//! id = "energy_drink_max"
//! asset = "Prefabs/EnergyDrinkMax"
//! ```
//!
//! Omitted stats fall back to the neutral defaults of
//! [`ItemDefinition::new`]. Out-of-range stats are clamped, not rejected.

use std::path::Path;

use serde::Deserialize;

use crate::definition::{EffectTags, ItemDefinition, ItemKind};
use crate::error::ItemResult;
use crate::prefab::PrefabHandle;
use crate::rarity::Rarity;
use crate::registry::ItemRegistry;

/// One `[[items]]` table.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemEntry {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Tooltip text.
    #[serde(default)]
    pub description: String,
    /// Behavioral family.
    #[serde(default)]
    pub kind: ItemKind,
    /// Rarity tier.
    #[serde(default)]
    pub rarity: RarityEntry,
    /// Maximum stack size.
    pub max_stack: Option<u32>,
    /// Weight per unit.
    pub weight: Option<f32>,
    /// Flat heal.
    pub heal_amount: Option<u32>,
    /// Heal percentage of max health.
    pub heal_percentage: Option<f32>,
    /// Focus boost percentage.
    pub boost_percentage: Option<f32>,
    /// Focus regeneration bonus percentage.
    pub regen_bonus_percentage: Option<f32>,
    /// Timed effect duration.
    pub duration_secs: Option<f32>,
    /// Cooldown.
    pub cooldown_secs: Option<f32>,
    /// Base monetary value.
    pub base_value: Option<u32>,
    /// Effect tags (duplicates dropped).
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Rarity written either as a name (`"rare"`) or an integer tier (`2`).
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(untagged)]
pub enum RarityEntry {
    /// Integer tier, saturating at Legendary.
    Tier(u8),
    /// Named tier.
    Named(NamedRarity),
}

impl Default for RarityEntry {
    fn default() -> Self {
        Self::Named(NamedRarity::Common)
    }
}

/// Lower-case rarity names accepted in catalog files.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedRarity {
    /// `"common"`
    Common,
    /// `"uncommon"`
    Uncommon,
    /// `"rare"`
    Rare,
    /// `"epic"`
    Epic,
    /// `"legendary"`
    Legendary,
}

impl From<RarityEntry> for Rarity {
    fn from(entry: RarityEntry) -> Self {
        match entry {
            RarityEntry::Tier(tier) => Rarity::from_tier(tier),
            RarityEntry::Named(NamedRarity::Common) => Rarity::Common,
            RarityEntry::Named(NamedRarity::Uncommon) => Rarity::Uncommon,
            RarityEntry::Named(NamedRarity::Rare) => Rarity::Rare,
            RarityEntry::Named(NamedRarity::Epic) => Rarity::Epic,
            RarityEntry::Named(NamedRarity::Legendary) => Rarity::Legendary,
        }
    }
}

impl From<ItemEntry> for ItemDefinition {
    fn from(entry: ItemEntry) -> Self {
        let mut item = ItemDefinition::new(entry.id, entry.name, entry.kind)
            .with_description(entry.description)
            .with_rarity(entry.rarity.into())
            .with_tags(EffectTags::from(entry.tags));

        if let Some(v) = entry.max_stack {
            item = item.with_max_stack(v);
        }
        if let Some(v) = entry.weight {
            item = item.with_weight(v);
        }
        if let Some(v) = entry.heal_amount {
            item = item.with_heal_amount(v);
        }
        if let Some(v) = entry.heal_percentage {
            item = item.with_heal_percentage(v);
        }
        if let Some(v) = entry.boost_percentage {
            item = item.with_boost_percentage(v);
        }
        if let Some(v) = entry.regen_bonus_percentage {
            item = item.with_regen_bonus_percentage(v);
        }
        if let Some(v) = entry.duration_secs {
            item = item.with_duration_secs(v);
        }
        if let Some(v) = entry.cooldown_secs {
            item = item.with_cooldown_secs(v);
        }
        if let Some(v) = entry.base_value {
            item = item.with_base_value(v);
        }
        item
    }
}

/// One `[[prefabs]]` table.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrefabEntry {
    /// Identifier the prefab is registered under.
    pub id: String,
    /// Engine asset key.
    pub asset: String,
}

/// A whole catalog file.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Item definitions.
    #[serde(default)]
    pub items: Vec<ItemEntry>,
    /// Prefab handles.
    #[serde(default)]
    pub prefabs: Vec<PrefabEntry>,
}

/// What [`CatalogConfig::apply`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CatalogReport {
    /// Definitions inserted.
    pub items_registered: usize,
    /// Definitions rejected (empty or duplicate id).
    pub items_skipped: usize,
    /// Prefabs inserted.
    pub prefabs_registered: usize,
    /// Prefabs rejected.
    pub prefabs_skipped: usize,
}

impl CatalogConfig {
    /// Parses a catalog from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ItemError::InvalidConfig` for malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> ItemResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a catalog file.
    ///
    /// # Errors
    ///
    /// Returns `ItemError::Io` if the file cannot be read, or
    /// `ItemError::InvalidConfig` if it does not parse.
    pub fn load(path: impl AsRef<Path>) -> ItemResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&text)?;
        tracing::info!(
            "Loaded item catalog {} ({} items, {} prefabs)",
            path.display(),
            catalog.items.len(),
            catalog.prefabs.len()
        );
        Ok(catalog)
    }

    /// Registers every entry. Rejected entries are counted, not fatal.
    pub fn apply(&self, registry: &ItemRegistry) -> CatalogReport {
        let mut report = CatalogReport::default();

        for entry in &self.items {
            if registry.register(entry.clone().into()) {
                report.items_registered += 1;
            } else {
                report.items_skipped += 1;
            }
        }

        for entry in &self.prefabs {
            if registry.register_prefab(entry.id.clone(), PrefabHandle::new(entry.asset.as_str())) {
                report.prefabs_registered += 1;
            } else {
                report.prefabs_skipped += 1;
            }
        }

        report
    }
}
