//! # Consumption
//!
//! Per-consumer focus state and the rules for using a consumable.
//!
//! Using an item:
//! 1. rejects non-consumables and items still cooling down,
//! 2. heals (capped at max health),
//! 3. boosts focus (clamped to `[0, 100]`),
//! 4. starts a timed effect carrying the item's regeneration bonus,
//! 5. starts the item's cooldown.
//!
//! [`try_consume`] wraps this with a consumer-supplied action and is
//! all-or-nothing: if the action fails, the state is restored and the
//! failure becomes `false` plus a log line.

use std::collections::HashMap;

use crate::definition::{ItemDefinition, ItemId};
use crate::effects::{self, apply_boost};
use crate::error::{ItemError, ItemResult};
use crate::registry::ItemRegistry;

/// A timed effect started by consuming an item.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveEffect {
    /// Item that started the effect.
    pub item_id: ItemId,
    /// Regeneration bonus while active.
    pub regen_bonus_percentage: f32,
    /// Seconds left.
    pub remaining_secs: f32,
}

/// What a successful consumption did.
#[derive(Clone, Debug, PartialEq)]
pub struct ConsumeOutcome {
    /// Health actually restored (after the max-health cap).
    pub healed: u32,
    /// Focus actually gained (after the 100 cap).
    pub focus_gained: f32,
    /// Length of the timed effect started.
    pub effect_secs: f32,
}

/// Health, focus meter, timed effects, and cooldowns of one consumer.
#[derive(Clone, Debug, PartialEq)]
pub struct FocusState {
    health: u32,
    max_health: u32,
    focus: f32,
    base_focus_regen: f32,
    effects: Vec<ActiveEffect>,
    cooldowns: HashMap<ItemId, f32>,
}

impl FocusState {
    /// Creates a consumer at full health with an empty focus meter.
    ///
    /// `base_focus_regen` is in focus points per second.
    #[must_use]
    pub fn new(max_health: u32, base_focus_regen: f32) -> Self {
        Self {
            health: max_health,
            max_health,
            focus: 0.0,
            base_focus_regen,
            effects: Vec::new(),
            cooldowns: HashMap::new(),
        }
    }

    /// Current health.
    #[must_use]
    pub const fn health(&self) -> u32 {
        self.health
    }

    /// Max health.
    #[must_use]
    pub const fn max_health(&self) -> u32 {
        self.max_health
    }

    /// Sets health, capped at max.
    pub fn set_health(&mut self, health: u32) {
        self.health = health.min(self.max_health);
    }

    /// Current focus in `[0, 100]`.
    #[must_use]
    pub const fn focus(&self) -> f32 {
        self.focus
    }

    /// Sets focus, clamped to `[0, 100]`.
    pub fn set_focus(&mut self, focus: f32) {
        self.focus = effects::clamp_percentage(focus);
    }

    /// Timed effects currently running.
    #[must_use]
    pub fn active_effects(&self) -> &[ActiveEffect] {
        &self.effects
    }

    /// Seconds until `id` can be used again (0 when ready).
    #[must_use]
    pub fn cooldown_remaining(&self, id: &str) -> f32 {
        self.cooldowns.get(id).copied().unwrap_or(0.0)
    }

    /// Focus regeneration per second, using the strongest active bonus.
    #[must_use]
    pub fn current_regen(&self) -> f32 {
        let bonus = self
            .effects
            .iter()
            .map(|effect| effect.regen_bonus_percentage)
            .fold(0.0_f32, f32::max);
        effects::effective_regen(self.base_focus_regen, bonus)
    }

    /// Uses one unit of `item`.
    ///
    /// Re-using an item whose effect is still running refreshes that
    /// effect instead of stacking it.
    ///
    /// # Errors
    ///
    /// - [`ItemError::NotConsumable`] for materials.
    /// - [`ItemError::OnCooldown`] while the item's cooldown runs.
    pub fn consume(&mut self, item: &ItemDefinition) -> ItemResult<ConsumeOutcome> {
        if !item.is_consumable() {
            return Err(ItemError::NotConsumable(item.id().to_string()));
        }
        let remaining = self.cooldown_remaining(item.id());
        if remaining > 0.0 {
            return Err(ItemError::OnCooldown {
                id: item.id().to_string(),
                remaining_secs: remaining,
            });
        }

        let before_health = self.health;
        self.health = self
            .health
            .saturating_add(item.total_heal(self.max_health))
            .min(self.max_health);

        let before_focus = self.focus;
        self.focus = apply_boost(self.focus, item.boost_percentage());

        self.effects.retain(|effect| effect.item_id != item.id());
        self.effects.push(ActiveEffect {
            item_id: item.id().to_string(),
            regen_bonus_percentage: item.regen_bonus_percentage(),
            remaining_secs: item.duration_secs(),
        });

        if item.cooldown_secs() > 0.0 {
            self.cooldowns.insert(item.id().to_string(), item.cooldown_secs());
        }

        Ok(ConsumeOutcome {
            healed: self.health - before_health,
            focus_gained: self.focus - before_focus,
            effect_secs: item.duration_secs(),
        })
    }

    /// Advances time: regenerates focus, then ages effects and cooldowns.
    pub fn tick(&mut self, dt_secs: f32) {
        if dt_secs <= 0.0 {
            return;
        }

        let regen = self.current_regen();
        self.focus = effects::clamp_percentage(self.focus + regen * dt_secs);

        for effect in &mut self.effects {
            effect.remaining_secs -= dt_secs;
        }
        self.effects.retain(|effect| effect.remaining_secs > 0.0);

        for remaining in self.cooldowns.values_mut() {
            *remaining -= dt_secs;
        }
        self.cooldowns.retain(|_, remaining| *remaining > 0.0);
    }
}

/// Consumes an item that the caller may not have.
///
/// # Errors
///
/// [`ItemError::MissingArgument`] when `item` is `None`; otherwise as
/// [`FocusState::consume`].
pub fn consume_item(state: &mut FocusState, item: Option<&ItemDefinition>) -> ItemResult<ConsumeOutcome> {
    let item = item.ok_or(ItemError::MissingArgument("item"))?;
    state.consume(item)
}

/// Resolves `id` through the registry and consumes it.
///
/// # Errors
///
/// [`ItemError::NotFound`] for unknown identifiers; otherwise as
/// [`FocusState::consume`].
pub fn consume_from_registry(
    registry: &ItemRegistry,
    state: &mut FocusState,
    id: &str,
) -> ItemResult<ConsumeOutcome> {
    let item = registry
        .get(id)
        .ok_or_else(|| ItemError::NotFound(id.to_string()))?;
    state.consume(&item)
}

/// Consumes `item` and runs a consumer-supplied `action` afterwards.
///
/// Any failure, from the consumption rules or the action, rolls the state
/// back, is logged, and is reported as `false`. Nothing propagates.
pub fn try_consume<F>(state: &mut FocusState, item: &ItemDefinition, action: F) -> bool
where
    F: FnOnce(&mut FocusState, &ItemDefinition) -> ItemResult<()>,
{
    let snapshot = state.clone();
    let result = state.consume(item).and_then(|outcome| {
        action(state, item)?;
        Ok(outcome)
    });

    match result {
        Ok(outcome) => {
            tracing::info!(
                "Consumed '{}': +{} health, +{:.1} focus, {:.0}s effect",
                item.id(),
                outcome.healed,
                outcome.focus_gained,
                outcome.effect_secs
            );
            true
        }
        Err(err) => {
            *state = snapshot;
            tracing::warn!("Failed to consume '{}': {}", item.id(), err);
            false
        }
    }
}
