//! # Item Registry
//!
//! **One lock, two tables, synchronous notifications.**
//!
//! The registry maps item identifiers to definitions and, independently,
//! to prefab handles. It is an ordinary value: the host constructs it,
//! wraps it in an `Arc` if several systems need it, and controls its
//! lifecycle with [`ItemRegistry::initialize`] / [`ItemRegistry::shutdown`].
//!
//! ## Concurrency Contract
//!
//! Every operation holds the same `parking_lot::Mutex` for its whole
//! duration, including subscriber dispatch and prefab spawning. All
//! operations on one registry are therefore totally ordered, and concurrent
//! registrations of one identifier have exactly one winner.
//!
//! The lock is not re-entrant. Subscribers and spawners must not call back
//! into the registry, and a slow subscriber stalls every other caller.
//!
//! ## Failure Reporting
//!
//! Expected failures (empty id, duplicate, miss) return `false` / `None`
//! and log; they never panic and never mutate. [`ItemRegistry::try_register`]
//! exposes the typed reason.
//!
//! ## Example
//!
//! ```rust
//! use focus_items::{ItemDefinition, ItemRegistry, Rarity};
//!
//! let registry = ItemRegistry::new();
//! assert!(registry.register(ItemDefinition::energy_drink("drink", "Drink")));
//! assert!(!registry.register(ItemDefinition::energy_drink("drink", "Again")));
//! assert_eq!(registry.get_by_category(Rarity::Common).len(), 1);
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use focus_shared::Placement;
use parking_lot::Mutex;

use crate::definition::{ItemDefinition, ItemId, ItemKind};
use crate::error::{ItemError, ItemResult};
use crate::prefab::{PrefabHandle, PrefabSpawner};
use crate::rarity::Rarity;

/// Notification raised after a successful mutation.
#[derive(Clone, Debug, PartialEq)]
pub enum RegistryEvent {
    /// A definition was inserted.
    Registered(Arc<ItemDefinition>),
    /// A definition was removed. Carries the identifier only.
    Unregistered(ItemId),
}

impl RegistryEvent {
    /// Identifier the event refers to.
    #[must_use]
    pub fn item_id(&self) -> &str {
        match self {
            Self::Registered(item) => item.id(),
            Self::Unregistered(id) => id,
        }
    }
}

/// Handle returned by [`ItemRegistry::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn Fn(&RegistryEvent) + Send + Sync>;

/// Everything behind the lock.
struct RegistryState {
    items: HashMap<ItemId, Arc<ItemDefinition>>,
    prefabs: HashMap<ItemId, PrefabHandle>,
    /// Dispatched in subscription order.
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
    initialized: bool,
}

impl RegistryState {
    fn new() -> Self {
        Self {
            items: HashMap::new(),
            prefabs: HashMap::new(),
            subscribers: Vec::new(),
            next_subscription: 0,
            initialized: false,
        }
    }

    fn notify(&self, event: &RegistryEvent) {
        for (_, subscriber) in &self.subscribers {
            subscriber(event);
        }
    }
}

/// Thread-safe table of item definitions and prefab handles.
pub struct ItemRegistry {
    state: Mutex<RegistryState>,
}

impl ItemRegistry {
    /// Creates an empty, uninitialized registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState::new()),
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Marks the registry as initialized.
    ///
    /// Idempotent: a second call logs a warning and does nothing.
    /// Registration does not require initialization.
    pub fn initialize(&self) {
        let mut state = self.state.lock();
        if state.initialized {
            tracing::warn!("Item registry already initialized");
            return;
        }
        state.initialized = true;
        tracing::info!("Item registry initialized");
    }

    /// Clears both tables, drops all subscribers, and returns to the
    /// uninitialized state.
    ///
    /// No notifications are raised. Logs a warning and does nothing if the
    /// registry was never initialized.
    pub fn shutdown(&self) {
        let mut state = self.state.lock();
        if !state.initialized {
            tracing::warn!("Item registry shutdown requested but it was not initialized");
            return;
        }
        let items = state.items.len();
        let prefabs = state.prefabs.len();
        state.items.clear();
        state.prefabs.clear();
        state.subscribers.clear();
        state.initialized = false;
        tracing::info!("Item registry shut down ({} items, {} prefabs released)", items, prefabs);
    }

    /// Returns true between `initialize` and `shutdown`.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.state.lock().initialized
    }

    // ========================================================================
    // Definitions
    // ========================================================================

    /// Inserts a definition, reporting why it was rejected.
    ///
    /// On success every subscriber receives [`RegistryEvent::Registered`]
    /// before this returns.
    ///
    /// # Errors
    ///
    /// - [`ItemError::EmptyId`] if the identifier is empty.
    /// - [`ItemError::AlreadyExists`] if the identifier is taken; the
    ///   existing entry is untouched.
    pub fn try_register(&self, definition: ItemDefinition) -> ItemResult<()> {
        if definition.id().is_empty() {
            return Err(ItemError::EmptyId);
        }

        let mut state = self.state.lock();
        if state.items.contains_key(definition.id()) {
            return Err(ItemError::AlreadyExists(definition.id().to_string()));
        }

        let definition = Arc::new(definition);
        state
            .items
            .insert(definition.id().to_string(), Arc::clone(&definition));
        tracing::info!(
            "Registered item '{}' ({}, {:?})",
            definition.id(),
            definition.rarity(),
            definition.kind()
        );
        state.notify(&RegistryEvent::Registered(definition));
        Ok(())
    }

    /// Inserts a definition. Returns false (and logs) on empty or duplicate
    /// identifier.
    pub fn register(&self, definition: ItemDefinition) -> bool {
        match self.try_register(definition) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("Item registration rejected: {}", err);
                false
            }
        }
    }

    /// Like [`register`](Self::register), treating `None` as a rejected
    /// argument.
    pub fn register_opt(&self, definition: Option<ItemDefinition>) -> bool {
        match definition {
            Some(definition) => self.register(definition),
            None => {
                tracing::warn!("Item registration rejected: {}", ItemError::MissingArgument("definition"));
                false
            }
        }
    }

    /// Registers each definition independently. Returns how many succeeded.
    pub fn register_many<I>(&self, definitions: I) -> usize
    where
        I: IntoIterator<Item = ItemDefinition>,
    {
        definitions
            .into_iter()
            .map(|definition| self.register(definition))
            .filter(|registered| *registered)
            .count()
    }

    /// Looks up a definition.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<ItemDefinition>> {
        let found = self.state.lock().items.get(id).cloned();
        if found.is_none() {
            tracing::debug!("Item '{}' not found", id);
        }
        found
    }

    /// Snapshot of every definition. Order is unspecified.
    #[must_use]
    pub fn get_all(&self) -> Vec<Arc<ItemDefinition>> {
        self.state.lock().items.values().cloned().collect()
    }

    /// Every definition whose rarity equals `category`.
    #[must_use]
    pub fn get_by_category(&self, category: Rarity) -> Vec<Arc<ItemDefinition>> {
        self.filter(|item| item.rarity() == category)
    }

    /// Every definition of the given kind.
    #[must_use]
    pub fn get_by_kind(&self, kind: ItemKind) -> Vec<Arc<ItemDefinition>> {
        self.filter(|item| item.kind() == kind)
    }

    /// Every definition carrying `tag`.
    #[must_use]
    pub fn get_by_tag(&self, tag: &str) -> Vec<Arc<ItemDefinition>> {
        self.filter(|item| item.effect_tags().contains(tag))
    }

    fn filter(&self, predicate: impl Fn(&ItemDefinition) -> bool) -> Vec<Arc<ItemDefinition>> {
        self.state
            .lock()
            .items
            .values()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }

    /// Returns true if a definition is registered under `id`.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.state.lock().items.contains_key(id)
    }

    /// Removes a definition.
    ///
    /// On success every subscriber receives
    /// [`RegistryEvent::Unregistered`] before this returns. Returns false
    /// if nothing was registered under `id`.
    pub fn unregister(&self, id: &str) -> bool {
        let mut state = self.state.lock();
        if state.items.remove(id).is_none() {
            tracing::warn!("Cannot unregister '{}': {}", id, ItemError::NotFound(id.to_string()));
            return false;
        }
        tracing::info!("Unregistered item '{}'", id);
        state.notify(&RegistryEvent::Unregistered(id.to_string()));
        true
    }

    /// Number of registered definitions.
    #[must_use]
    pub fn registered_item_count(&self) -> usize {
        self.state.lock().items.len()
    }

    // ========================================================================
    // Prefabs
    // ========================================================================

    /// Associates a prefab handle with `id`.
    ///
    /// Independent of the definition table. Returns false on empty or
    /// duplicate identifier.
    pub fn register_prefab(&self, id: impl Into<ItemId>, handle: PrefabHandle) -> bool {
        let id = id.into();
        if id.is_empty() {
            tracing::warn!("Prefab registration rejected: {}", ItemError::EmptyId);
            return false;
        }

        let mut state = self.state.lock();
        if state.prefabs.contains_key(&id) {
            tracing::warn!("Prefab registration rejected: {}", ItemError::AlreadyExists(id));
            return false;
        }
        tracing::info!("Registered prefab '{}' -> {:?}", id, handle);
        state.prefabs.insert(id, handle);
        true
    }

    /// Like [`register_prefab`](Self::register_prefab), treating `None` as
    /// a rejected argument.
    pub fn register_prefab_opt(&self, id: impl Into<ItemId>, handle: Option<PrefabHandle>) -> bool {
        match handle {
            Some(handle) => self.register_prefab(id, handle),
            None => {
                tracing::warn!("Prefab registration rejected: {}", ItemError::MissingArgument("prefab"));
                false
            }
        }
    }

    /// Looks up a prefab handle.
    #[must_use]
    pub fn get_prefab(&self, id: &str) -> Option<PrefabHandle> {
        self.state.lock().prefabs.get(id).cloned()
    }

    /// Returns true if a prefab is registered under `id`.
    #[must_use]
    pub fn contains_prefab(&self, id: &str) -> bool {
        self.state.lock().prefabs.contains_key(id)
    }

    /// Removes a prefab handle. Returns false if absent.
    pub fn unregister_prefab(&self, id: &str) -> bool {
        if self.state.lock().prefabs.remove(id).is_none() {
            tracing::warn!("Cannot unregister prefab: {}", ItemError::PrefabNotFound(id.to_string()));
            return false;
        }
        tracing::info!("Unregistered prefab '{}'", id);
        true
    }

    /// Number of registered prefabs.
    #[must_use]
    pub fn registered_prefab_count(&self) -> usize {
        self.state.lock().prefabs.len()
    }

    /// Looks up the prefab for `id` and asks the engine to create it.
    ///
    /// Returns `None` (and logs) if no prefab is registered.
    pub fn instantiate_prefab<S>(&self, spawner: &S, id: &str, placement: Placement) -> Option<S::Instance>
    where
        S: PrefabSpawner + ?Sized,
    {
        let state = self.state.lock();
        let Some(handle) = state.prefabs.get(id) else {
            tracing::warn!("Cannot instantiate: {}", ItemError::PrefabNotFound(id.to_string()));
            return None;
        };
        tracing::debug!("Instantiating prefab '{}' at {:?}", id, placement.position);
        Some(spawner.spawn(handle, placement))
    }

    // ========================================================================
    // Bulk
    // ========================================================================

    /// Empties both tables. Raises no notifications.
    pub fn clear_all(&self) {
        let mut state = self.state.lock();
        let items = state.items.len();
        let prefabs = state.prefabs.len();
        state.items.clear();
        state.prefabs.clear();
        tracing::info!("Cleared item registry ({} items, {} prefabs)", items, prefabs);
    }

    // ========================================================================
    // Subscribers
    // ========================================================================

    /// Adds a subscriber. Subscribers run in subscription order, on the
    /// mutating thread, while the registry lock is held.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&RegistryEvent) + Send + Sync + 'static,
    {
        let mut state = self.state.lock();
        let id = SubscriptionId(state.next_subscription);
        state.next_subscription += 1;
        state.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes a subscriber. Returns false if it was not subscribed.
    pub fn unsubscribe(&self, subscription: SubscriptionId) -> bool {
        let mut state = self.state.lock();
        let before = state.subscribers.len();
        state.subscribers.retain(|(id, _)| *id != subscription);
        state.subscribers.len() != before
    }

    /// Number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().subscribers.len()
    }
}

impl Default for ItemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ItemRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ItemRegistry")
            .field("items", &state.items.len())
            .field("prefabs", &state.prefabs.len())
            .field("subscribers", &state.subscribers.len())
            .field("initialized", &state.initialized)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use focus_shared::Vec3;

    fn potion() -> ItemDefinition {
        ItemDefinition::new("potion_focus", "Focus Potion", ItemKind::Potion)
            .with_rarity(Rarity::Common)
            .with_heal_amount(35)
            .with_boost_percentage(25.0)
    }

    fn recorder(registry: &ItemRegistry) -> Arc<Mutex<Vec<RegistryEvent>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        registry.subscribe(move |event| sink.lock().push(event.clone()));
        events
    }

    struct TagSpawner;

    impl PrefabSpawner for TagSpawner {
        type Instance = (String, Vec3);

        fn spawn(&self, prefab: &PrefabHandle, placement: Placement) -> Self::Instance {
            (prefab.asset().to_string(), placement.position)
        }
    }

    #[test]
    fn test_register_then_get_returns_equal() {
        let registry = ItemRegistry::new();
        assert!(registry.register(potion()));
        let found = registry.get("potion_focus").unwrap();
        assert_eq!(*found, potion());
    }

    #[test]
    fn test_duplicate_keeps_original() {
        let registry = ItemRegistry::new();
        assert!(registry.register(potion()));
        let imposter = ItemDefinition::new("potion_focus", "Imposter", ItemKind::Material);
        assert!(!registry.register(imposter.clone()));
        assert_eq!(
            registry.try_register(imposter),
            Err(ItemError::AlreadyExists("potion_focus".to_string()))
        );
        assert_eq!(registry.get("potion_focus").unwrap().name(), "Focus Potion");
        assert_eq!(registry.registered_item_count(), 1);
    }

    #[test]
    fn test_empty_and_missing_rejected() {
        let registry = ItemRegistry::new();
        let events = recorder(&registry);
        assert!(!registry.register(ItemDefinition::new("", "Nameless", ItemKind::Potion)));
        assert!(!registry.register_opt(None));
        assert_eq!(registry.registered_item_count(), 0);
        assert!(events.lock().is_empty());
    }

    #[test]
    fn test_unregister_present_and_absent() {
        let registry = ItemRegistry::new();
        registry.register(potion());
        assert!(registry.unregister("potion_focus"));
        assert!(registry.get("potion_focus").is_none());
        assert!(!registry.unregister("potion_focus"));
        assert_eq!(registry.registered_item_count(), 0);
    }

    #[test]
    fn test_register_many_counts_partial_success() {
        let registry = ItemRegistry::new();
        let a = ItemDefinition::energy_drink("a", "A");
        let b = ItemDefinition::focus_item("a", "B");
        let c = ItemDefinition::focus_item("c", "C");
        assert_eq!(registry.register_many(vec![a, b, c]), 2);
        assert_eq!(registry.get("a").unwrap().name(), "A");
        assert!(registry.contains("c"));
    }

    #[test]
    fn test_get_by_category_exact_subset() {
        let registry = ItemRegistry::new();
        registry.register(ItemDefinition::energy_drink("d1", "D1"));
        registry.register(ItemDefinition::energy_drink("d2", "D2").with_rarity(Rarity::Epic));
        registry.register(ItemDefinition::focus_item("f1", "F1").with_rarity(Rarity::Epic));

        for rarity in Rarity::ALL {
            let mut got: Vec<String> = registry
                .get_by_category(rarity)
                .iter()
                .map(|item| item.id().to_string())
                .collect();
            got.sort();
            let expected: Vec<String> = match rarity {
                Rarity::Common => vec!["d1".into()],
                Rarity::Epic => vec!["d2".into(), "f1".into()],
                _ => Vec::new(),
            };
            assert_eq!(got, expected, "category {rarity}");
        }
    }

    #[test]
    fn test_kind_and_tag_filters() {
        let registry = ItemRegistry::new();
        registry.register(ItemDefinition::energy_drink("d1", "D1"));
        registry.register(ItemDefinition::focus_item("f1", "F1"));
        assert_eq!(registry.get_by_kind(ItemKind::FocusItem).len(), 1);
        assert_eq!(registry.get_by_tag("focus").len(), 2);
        assert_eq!(registry.get_by_tag("caffeine").len(), 1);
        assert!(registry.get_by_tag("sleep").is_empty());
    }

    #[test]
    fn test_events_in_subscription_order() {
        let registry = ItemRegistry::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for n in 0..3 {
            let order = Arc::clone(&order);
            registry.subscribe(move |event| order.lock().push((n, event.item_id().to_string())));
        }

        registry.register(potion());
        registry.unregister("potion_focus");

        let order = order.lock();
        assert_eq!(
            *order,
            vec![
                (0, "potion_focus".to_string()),
                (1, "potion_focus".to_string()),
                (2, "potion_focus".to_string()),
                (0, "potion_focus".to_string()),
                (1, "potion_focus".to_string()),
                (2, "potion_focus".to_string()),
            ]
        );
    }

    #[test]
    fn test_unregistered_event_carries_id_only() {
        let registry = ItemRegistry::new();
        let events = recorder(&registry);
        registry.register(potion());
        registry.unregister("potion_focus");
        let events = events.lock();
        assert!(matches!(&events[0], RegistryEvent::Registered(item) if item.heal_amount() == 35));
        assert_eq!(events[1], RegistryEvent::Unregistered("potion_focus".to_string()));
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let registry = ItemRegistry::new();
        let events = Arc::new(Mutex::new(0usize));
        let sink = Arc::clone(&events);
        let id = registry.subscribe(move |_| *sink.lock() += 1);
        registry.register(potion());
        assert!(registry.unsubscribe(id));
        assert!(!registry.unsubscribe(id));
        registry.unregister("potion_focus");
        assert_eq!(*events.lock(), 1);
        assert_eq!(registry.subscriber_count(), 0);
    }

    #[test]
    fn test_clear_all_is_silent() {
        let registry = ItemRegistry::new();
        registry.register(potion());
        registry.register_prefab("potion_focus", PrefabHandle::new("Prefabs/Potion"));
        let events = recorder(&registry);

        registry.clear_all();

        assert!(registry.get_all().is_empty());
        assert_eq!(registry.registered_item_count(), 0);
        assert_eq!(registry.registered_prefab_count(), 0);
        assert!(events.lock().is_empty());
    }

    #[test]
    fn test_prefab_table_discipline() {
        let registry = ItemRegistry::new();
        assert!(registry.register_prefab("drink", PrefabHandle::new("Prefabs/Drink")));
        assert!(!registry.register_prefab("drink", PrefabHandle::new("Prefabs/Other")));
        assert!(!registry.register_prefab("", PrefabHandle::new("Prefabs/Other")));
        assert!(!registry.register_prefab_opt("x", None));
        assert_eq!(registry.get_prefab("drink").unwrap().asset(), "Prefabs/Drink");
        // prefabs and definitions are independent
        assert!(!registry.contains("drink"));
        assert!(registry.unregister_prefab("drink"));
        assert!(!registry.unregister_prefab("drink"));
    }

    #[test]
    fn test_instantiate_prefab_delegates_to_spawner() {
        let registry = ItemRegistry::new();
        registry.register_prefab("drink", PrefabHandle::new("Prefabs/Drink"));
        let at = Placement::at(Vec3::new(1.0, 2.0, 3.0));

        let spawned = registry.instantiate_prefab(&TagSpawner, "drink", at);
        assert_eq!(spawned, Some(("Prefabs/Drink".to_string(), Vec3::new(1.0, 2.0, 3.0))));
        assert_eq!(registry.instantiate_prefab(&TagSpawner, "missing", at), None);
    }

    #[test]
    fn test_initialize_idempotent_and_not_required() {
        let registry = ItemRegistry::new();
        assert!(registry.register(potion()));
        assert!(!registry.is_initialized());

        registry.initialize();
        registry.initialize();
        assert!(registry.is_initialized());
        assert_eq!(registry.registered_item_count(), 1);
    }

    #[test]
    fn test_shutdown_clears_everything() {
        let registry = ItemRegistry::new();
        registry.shutdown(); // not initialized: no-op
        registry.initialize();
        registry.register(potion());
        let _events = recorder(&registry);

        registry.shutdown();
        assert!(!registry.is_initialized());
        assert_eq!(registry.registered_item_count(), 0);
        assert_eq!(registry.subscriber_count(), 0);
    }

    #[test]
    fn test_potion_focus_scenario() {
        let registry = ItemRegistry::new();
        assert!(registry.register(potion()));
        assert_eq!(registry.registered_item_count(), 1);

        let found = registry.get("potion_focus").unwrap();
        assert_eq!(found.rarity(), Rarity::Common);
        assert_eq!(found.heal_amount(), 35);
        assert_eq!(found.boost_percentage(), 25.0);

        assert!(registry.unregister("potion_focus"));
        assert_eq!(registry.registered_item_count(), 0);
    }
}
