//! # FOCUS Demo
//!
//! Headless walkthrough of the item layer as a host would drive it:
//!
//! Load config → Initialize → Spawn a potion → Drink it → Tick effects →
//! Failed consumer action rolls back → Unregister → Drain events → Shutdown
//!
//! Usage: `focus_demo [path/to/focus_mod.toml]`
//!
//! Set `RUST_LOG=debug` for per-operation detail.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use focus_items::{
    consume_from_registry, try_consume, FocusState, ItemError, PrefabHandle, PrefabSpawner, Placement, Quaternion,
    RegistryEvent, Vec3,
};
use focus_mod::builtin::{ENERGY_DRINK_MAX, POTION_FOCUS};
use focus_mod::{FocusMod, ModConfig, ModError};
use tracing_subscriber::EnvFilter;

/// Stand-in for the engine: hands out sequential instance ids.
struct LoggingSpawner {
    next_instance: AtomicU64,
}

impl LoggingSpawner {
    const fn new() -> Self {
        Self {
            next_instance: AtomicU64::new(1),
        }
    }
}

impl PrefabSpawner for LoggingSpawner {
    type Instance = u64;

    fn spawn(&self, prefab: &PrefabHandle, placement: Placement) -> u64 {
        let instance = self.next_instance.fetch_add(1, Ordering::Relaxed);
        let p = placement.position;
        tracing::info!(
            "Spawned {} as instance #{} at ({:.1}, {:.1}, {:.1})",
            prefab.asset(),
            instance,
            p.x,
            p.y,
            p.z
        );
        instance
    }
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config() -> Result<ModConfig, ModError> {
    match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!("Loading mod config from {}", path);
            ModConfig::load(path)
        }
        None => Ok(ModConfig::default()),
    }
}

fn main() -> Result<(), ModError> {
    init_logging();

    let mut focus = FocusMod::new(load_config()?);
    let report = focus.initialize()?;
    tracing::info!("Init report: {:?}", report);

    let registry = Arc::clone(focus.registry());
    let spawner = LoggingSpawner::new();

    // World drop
    let placement = Placement::new(Vec3::new(4.0, 0.0, -2.0), Quaternion::from_yaw(std::f32::consts::FRAC_PI_2));
    if registry.instantiate_prefab(&spawner, POTION_FOCUS, placement).is_none() {
        tracing::warn!("No prefab for {}", POTION_FOCUS);
    }

    // Drink it
    let mut player = FocusState::new(100, 0.5);
    player.set_health(50);
    let outcome = consume_from_registry(&registry, &mut player, POTION_FOCUS)?;
    tracing::info!(
        "Player drank {}: healed {}, focus {:.1}, regen {:.2}/s",
        POTION_FOCUS,
        outcome.healed,
        player.focus(),
        player.current_regen()
    );

    // Cooldown blocks a second drink
    if let Err(err) = consume_from_registry(&registry, &mut player, POTION_FOCUS) {
        tracing::info!("Second drink refused: {}", err);
    }

    // Time passes
    for _ in 0..4 {
        player.tick(5.0);
    }
    tracing::info!(
        "After 20s: focus {:.1}, {} active effects, cooldown {:.1}s",
        player.focus(),
        player.active_effects().len(),
        player.cooldown_remaining(POTION_FOCUS)
    );

    // Consumer action fails: nothing sticks
    if let Some(max) = registry.get(ENERGY_DRINK_MAX) {
        let before = player.clone();
        let consumed = try_consume(&mut player, &max, |_, item| {
            Err(ItemError::ActionFailed(format!("inventory has no {}", item.id())))
        });
        tracing::info!("Consumed {}: {} (state unchanged: {})", ENERGY_DRINK_MAX, consumed, player == before);
    }

    // Remove the potion and read the host's event queue
    registry.unregister(POTION_FOCUS);
    for event in focus.drain_events() {
        match event {
            RegistryEvent::Registered(item) => {
                tracing::info!("event: registered {} ({}, value {})", item.id(), item.rarity(), item.effective_value());
            }
            RegistryEvent::Unregistered(id) => tracing::info!("event: unregistered {}", id),
        }
    }
    if focus.dropped_events() > 0 {
        tracing::warn!("{} events were dropped", focus.dropped_events());
    }

    focus.shutdown();
    Ok(())
}
