//! # Effect Formulas
//!
//! Stateless arithmetic on item stats. Inputs are assumed to have passed
//! through the clamping applied at construction time.

use crate::rarity::Rarity;

/// Lower bound of the focus meter and of every percentage stat.
pub const PERCENT_MIN: f32 = 0.0;
/// Upper bound of the focus meter and of every percentage stat.
pub const PERCENT_MAX: f32 = 100.0;

/// Shortest timed effect, in seconds.
pub const MIN_DURATION_SECS: f32 = 1.0;
/// Longest timed effect, in seconds.
pub const MAX_DURATION_SECS: f32 = 600.0;

/// Clamps a percentage into `[0, 100]`. NaN maps to 0.
#[inline]
#[must_use]
pub fn clamp_percentage(value: f32) -> f32 {
    if value.is_nan() {
        return PERCENT_MIN;
    }
    value.clamp(PERCENT_MIN, PERCENT_MAX)
}

/// Clamps an effect duration into `[MIN_DURATION_SECS, MAX_DURATION_SECS]`.
/// NaN maps to the minimum.
#[inline]
#[must_use]
pub fn clamp_duration(secs: f32) -> f32 {
    if secs.is_nan() {
        return MIN_DURATION_SECS;
    }
    secs.clamp(MIN_DURATION_SECS, MAX_DURATION_SECS)
}

/// Clamps a non-negative scalar (weight, cooldown). NaN maps to 0.
#[inline]
#[must_use]
pub fn clamp_non_negative(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0)
}

/// Total heal = flat amount + floor(max health × percentage / 100).
#[must_use]
pub fn total_heal(heal_amount: u32, heal_percentage: f32, max_health: u32) -> u32 {
    let from_percentage = (f64::from(max_health) * f64::from(heal_percentage) / 100.0).floor();
    // Percentage is clamped to [0, 100], so the product fits in u32.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let from_percentage = from_percentage.max(0.0) as u32;
    heal_amount.saturating_add(from_percentage)
}

/// Effective focus regeneration = base × (1 + bonus / 100).
///
/// Identity when `base <= 0`, so a bonus never turns drain into regen.
#[must_use]
pub fn effective_regen(base: f32, regen_bonus_percentage: f32) -> f32 {
    if base <= 0.0 {
        return base;
    }
    base * (1.0 + regen_bonus_percentage / 100.0)
}

/// Effective value = base + (heal × 3 + boost × 2) × (1 + tier × 0.1),
/// rounded down.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn effective_value(base_value: u32, heal_amount: u32, boost_percentage: f32, rarity: Rarity) -> u32 {
    let stat_score = f64::from(heal_amount) * 3.0 + f64::from(boost_percentage) * 2.0;
    // (1 + tier × 0.1) expressed in tenths to keep whole results exact.
    let total = f64::from(base_value) + stat_score * f64::from(10 + rarity.tier()) / 10.0;
    total.floor().clamp(0.0, f64::from(u32::MAX)) as u32
}

/// Adds a boost to the focus meter, keeping it in `[0, 100]`.
#[inline]
#[must_use]
pub fn apply_boost(current_focus: f32, boost_percentage: f32) -> f32 {
    clamp_percentage(current_focus + boost_percentage)
}
