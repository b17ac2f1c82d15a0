//! Built-in focus items shipped with the mod.

use focus_items::{ItemDefinition, ItemKind, PrefabHandle, Rarity};

/// Focus potion: the reference consumable.
pub const POTION_FOCUS: &str = "potion_focus";
/// Entry-level energy drink.
pub const ENERGY_DRINK_BASIC: &str = "energy_drink_basic";
/// Strong, rare energy drink.
pub const ENERGY_DRINK_MAX: &str = "energy_drink_max";
/// Regeneration charm.
pub const FOCUS_CHARM: &str = "focus_charm";

/// Definitions registered when `load_builtin_items` is on.
#[must_use]
pub fn builtin_items() -> Vec<ItemDefinition> {
    vec![
        ItemDefinition::new(POTION_FOCUS, "Focus Potion", ItemKind::Potion)
            .with_description("Restores health and clears the mind.")
            .with_rarity(Rarity::Common)
            .with_heal_amount(35)
            .with_boost_percentage(25.0)
            .with_duration_secs(20.0)
            .with_cooldown_secs(10.0)
            .with_max_stack(10)
            .with_weight(0.5)
            .with_base_value(20)
            .with_tag("healing")
            .with_tag("focus"),
        ItemDefinition::energy_drink(ENERGY_DRINK_BASIC, "Energy Drink"),
        ItemDefinition::energy_drink(ENERGY_DRINK_MAX, "MAX Energy Drink")
            .with_rarity(Rarity::Rare)
            .with_heal_amount(15)
            .with_boost_percentage(40.0)
            .with_duration_secs(45.0)
            .with_cooldown_secs(30.0)
            .with_base_value(40)
            .with_tag("jitters"),
        ItemDefinition::focus_item(FOCUS_CHARM, "Focus Charm").with_rarity(Rarity::Uncommon),
    ]
}

/// Prefab handles for the built-in items.
#[must_use]
pub fn builtin_prefabs() -> Vec<(&'static str, PrefabHandle)> {
    vec![
        (POTION_FOCUS, PrefabHandle::new("Prefabs/FocusPotion")),
        (ENERGY_DRINK_BASIC, PrefabHandle::new("Prefabs/EnergyDrink")),
        (ENERGY_DRINK_MAX, PrefabHandle::new("Prefabs/EnergyDrinkMax")),
        (FOCUS_CHARM, PrefabHandle::new("Prefabs/FocusCharm")),
    ]
}
