//! # Item Definitions
//!
//! Static data records describing one item type. Stats are private and
//! every way of setting one clamps it into range, so a definition can never
//! hold an out-of-range percentage or duration.
//!
//! ## Example
//!
//! ```rust
//! use focus_items::{ItemDefinition, ItemKind, Rarity};
//!
//! let potion = ItemDefinition::new("potion_focus", "Focus Potion", ItemKind::Potion)
//!     .with_rarity(Rarity::Common)
//!     .with_heal_amount(35)
//!     .with_boost_percentage(150.0);
//!
//! assert_eq!(potion.boost_percentage(), 100.0);
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::effects::{self, clamp_duration, clamp_non_negative, clamp_percentage};
use crate::rarity::Rarity;

/// Unique identifier for an item type.
pub type ItemId = String;

/// Behavioral family of an item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Caffeinated drink: quick boost, short duration.
    EnergyDrink,
    /// Charm-like item: smaller boost plus focus regeneration bonus.
    FocusItem,
    /// Healing potion with an optional focus boost.
    Potion,
    /// Not consumable.
    #[default]
    Material,
}

impl ItemKind {
    /// Returns true if items of this kind are consumed on use.
    #[inline]
    #[must_use]
    pub const fn is_consumable(self) -> bool {
        !matches!(self, Self::Material)
    }
}

/// Ordered, duplicate-free list of effect tags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct EffectTags(Vec<String>);

impl EffectTags {
    /// Creates an empty tag list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a tag. Returns false if it was already present.
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.contains(&tag) {
            return false;
        }
        self.0.push(tag);
        true
    }

    /// Removes a tag. Returns false if it was absent.
    pub fn remove(&mut self, tag: &str) -> bool {
        match self.0.iter().position(|t| t == tag) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns true if the tag is present.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    /// Iterates tags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for EffectTags {
    fn from(tags: Vec<String>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<EffectTags> for Vec<String> {
    fn from(tags: EffectTags) -> Self {
        tags.0
    }
}

impl<S: Into<String>> FromIterator<S> for EffectTags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags = Self::new();
        for tag in iter {
            tags.insert(tag);
        }
        tags
    }
}

/// An item definition.
///
/// Think of it as the "class" of an item; inventories and spawned objects
/// refer back to it by [`ItemId`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ItemDefinition {
    id: ItemId,
    name: String,
    description: String,
    rarity: Rarity,
    kind: ItemKind,
    max_stack: u32,
    weight: f32,
    heal_amount: u32,
    heal_percentage: f32,
    boost_percentage: f32,
    regen_bonus_percentage: f32,
    duration_secs: f32,
    cooldown_secs: f32,
    base_value: u32,
    effect_tags: EffectTags,
}

impl ItemDefinition {
    /// Creates a definition with neutral stats.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            rarity: Rarity::Common,
            kind,
            max_stack: 1,
            weight: 0.0,
            heal_amount: 0,
            heal_percentage: 0.0,
            boost_percentage: 0.0,
            regen_bonus_percentage: 0.0,
            duration_secs: effects::MIN_DURATION_SECS,
            cooldown_secs: 0.0,
            base_value: 0,
            effect_tags: EffectTags::new(),
        }
    }

    /// Creates a definition with a freshly generated identifier.
    #[must_use]
    pub fn with_generated_id(name: impl Into<String>, kind: ItemKind) -> Self {
        Self::new(format!("item_{}", Uuid::new_v4().simple()), name, kind)
    }

    /// Energy drink defaults: fast boost, short effect, short cooldown.
    #[must_use]
    pub fn energy_drink(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self::new(id, name, ItemKind::EnergyDrink)
            .with_description("A fizzy can that sharpens focus for a short while.")
            .with_heal_amount(10)
            .with_boost_percentage(25.0)
            .with_duration_secs(30.0)
            .with_cooldown_secs(15.0)
            .with_max_stack(10)
            .with_weight(0.3)
            .with_base_value(15)
            .with_tag("caffeine")
            .with_tag("focus")
    }

    /// Focus item defaults: modest boost plus a regeneration bonus.
    #[must_use]
    pub fn focus_item(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self::new(id, name, ItemKind::FocusItem)
            .with_description("Keeps the mind steady and focus flowing.")
            .with_boost_percentage(15.0)
            .with_regen_bonus_percentage(20.0)
            .with_duration_secs(60.0)
            .with_cooldown_secs(30.0)
            .with_max_stack(5)
            .with_weight(0.1)
            .with_base_value(25)
            .with_tag("focus")
    }

    // ========================================================================
    // Builders (all clamp)
    // ========================================================================

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the rarity tier.
    #[must_use]
    pub const fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Sets the maximum stack size (at least 1).
    #[must_use]
    pub fn with_max_stack(mut self, max_stack: u32) -> Self {
        self.max_stack = max_stack.max(1);
        self
    }

    /// Sets the weight (non-negative).
    #[must_use]
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = clamp_non_negative(weight);
        self
    }

    /// Sets the flat heal amount.
    #[must_use]
    pub const fn with_heal_amount(mut self, amount: u32) -> Self {
        self.heal_amount = amount;
        self
    }

    /// Sets the heal percentage of max health, clamped to `[0, 100]`.
    #[must_use]
    pub fn with_heal_percentage(mut self, percentage: f32) -> Self {
        self.heal_percentage = clamp_percentage(percentage);
        self
    }

    /// Sets the focus boost, clamped to `[0, 100]`.
    #[must_use]
    pub fn with_boost_percentage(mut self, percentage: f32) -> Self {
        self.boost_percentage = clamp_percentage(percentage);
        self
    }

    /// Sets the focus regeneration bonus, clamped to `[0, 100]`.
    #[must_use]
    pub fn with_regen_bonus_percentage(mut self, percentage: f32) -> Self {
        self.regen_bonus_percentage = clamp_percentage(percentage);
        self
    }

    /// Sets the effect duration, clamped to the allowed window.
    #[must_use]
    pub fn with_duration_secs(mut self, secs: f32) -> Self {
        self.duration_secs = clamp_duration(secs);
        self
    }

    /// Sets the cooldown (non-negative).
    #[must_use]
    pub fn with_cooldown_secs(mut self, secs: f32) -> Self {
        self.cooldown_secs = clamp_non_negative(secs);
        self
    }

    /// Sets the base monetary value.
    #[must_use]
    pub const fn with_base_value(mut self, value: u32) -> Self {
        self.base_value = value;
        self
    }

    /// Adds an effect tag (ignored if already present).
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.effect_tags.insert(tag);
        self
    }

    /// Replaces the effect tags.
    #[must_use]
    pub fn with_tags(mut self, tags: EffectTags) -> Self {
        self.effect_tags = tags;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Unique identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tooltip description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Rarity tier (the registry's category).
    #[must_use]
    pub const fn rarity(&self) -> Rarity {
        self.rarity
    }

    /// Behavioral family.
    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Maximum stack size.
    #[must_use]
    pub const fn max_stack(&self) -> u32 {
        self.max_stack
    }

    /// Weight per unit.
    #[must_use]
    pub const fn weight(&self) -> f32 {
        self.weight
    }

    /// Flat heal amount.
    #[must_use]
    pub const fn heal_amount(&self) -> u32 {
        self.heal_amount
    }

    /// Heal percentage of max health.
    #[must_use]
    pub const fn heal_percentage(&self) -> f32 {
        self.heal_percentage
    }

    /// Focus boost percentage.
    #[must_use]
    pub const fn boost_percentage(&self) -> f32 {
        self.boost_percentage
    }

    /// Focus regeneration bonus percentage.
    #[must_use]
    pub const fn regen_bonus_percentage(&self) -> f32 {
        self.regen_bonus_percentage
    }

    /// Timed effect duration in seconds.
    #[must_use]
    pub const fn duration_secs(&self) -> f32 {
        self.duration_secs
    }

    /// Cooldown in seconds.
    #[must_use]
    pub const fn cooldown_secs(&self) -> f32 {
        self.cooldown_secs
    }

    /// Base monetary value.
    #[must_use]
    pub const fn base_value(&self) -> u32 {
        self.base_value
    }

    /// Effect tags in insertion order.
    #[must_use]
    pub const fn effect_tags(&self) -> &EffectTags {
        &self.effect_tags
    }

    /// Returns true if items of this type are consumed on use.
    #[must_use]
    pub const fn is_consumable(&self) -> bool {
        self.kind.is_consumable()
    }

    // ========================================================================
    // Derived values
    // ========================================================================

    /// Flat heal plus the percentage share of `max_health`.
    #[must_use]
    pub fn total_heal(&self, max_health: u32) -> u32 {
        effects::total_heal(self.heal_amount, self.heal_percentage, max_health)
    }

    /// Regeneration rate while this item's effect is active.
    #[must_use]
    pub fn effective_regen(&self, base_regen: f32) -> f32 {
        effects::effective_regen(base_regen, self.regen_bonus_percentage)
    }

    /// Base value scaled by stats and rarity.
    #[must_use]
    pub fn effective_value(&self) -> u32 {
        effects::effective_value(self.base_value, self.heal_amount, self.boost_percentage, self.rarity)
    }
}
