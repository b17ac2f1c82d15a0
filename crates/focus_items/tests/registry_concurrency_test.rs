//! # Registry Concurrency Tests
//!
//! The registry is shared across threads behind an `Arc`. These tests
//! hammer it from several threads and check the single-lock guarantees.
//!
//! Run with: cargo test --package focus_items --test registry_concurrency_test

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use focus_items::{ItemDefinition, ItemKind, ItemRegistry, Rarity, RegistryEvent};
use parking_lot::Mutex;

const THREADS: usize = 8;

#[test]
fn same_id_has_exactly_one_winner() {
    let registry = Arc::new(ItemRegistry::new());
    let barrier = Arc::new(Barrier::new(THREADS));
    let notifications = Arc::new(AtomicUsize::new(0));
    {
        let notifications = Arc::clone(&notifications);
        registry.subscribe(move |_| {
            notifications.fetch_add(1, Ordering::SeqCst);
        });
    }

    let handles: Vec<_> = (0..THREADS)
        .map(|n| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let item = ItemDefinition::energy_drink("contested", format!("Drink from thread {n}"));
                barrier.wait();
                registry.register(item)
            })
        })
        .collect();

    let winners = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|won| *won)
        .count();

    assert_eq!(winners, 1);
    assert_eq!(registry.registered_item_count(), 1);
    assert_eq!(notifications.load(Ordering::SeqCst), 1);
}

#[test]
fn distinct_ids_all_land() {
    let registry = Arc::new(ItemRegistry::new());
    let per_thread = 100;

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let items = (0..per_thread).map(|i| {
                    ItemDefinition::new(format!("item_{t}_{i}"), "Item", ItemKind::Potion)
                        .with_rarity(Rarity::from_tier(u8::try_from(i % 5).unwrap_or(0)))
                });
                registry.register_many(items)
            })
        })
        .collect();

    let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(total, THREADS * per_thread);
    assert_eq!(registry.registered_item_count(), THREADS * per_thread);

    let by_category: usize = Rarity::ALL
        .iter()
        .map(|rarity| registry.get_by_category(*rarity).len())
        .sum();
    assert_eq!(by_category, THREADS * per_thread);
}

#[test]
fn notifications_follow_mutation_order() {
    let registry = Arc::new(ItemRegistry::new());
    let log = Arc::new(Mutex::new(Vec::new()));
    {
        let log = Arc::clone(&log);
        registry.subscribe(move |event| {
            let entry = match event {
                RegistryEvent::Registered(item) => format!("+{}", item.id()),
                RegistryEvent::Unregistered(id) => format!("-{id}"),
            };
            log.lock().push(entry);
        });
    }

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let id = format!("cycle_{t}");
                for _ in 0..50 {
                    assert!(registry.register(ItemDefinition::focus_item(id.as_str(), "Cycle")));
                    assert!(registry.unregister(&id));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Per id, events strictly alternate +, -, +, - ...
    let log = log.lock();
    for t in 0..THREADS {
        let plus = format!("+cycle_{t}");
        let minus = format!("-cycle_{t}");
        let mine: Vec<&String> = log.iter().filter(|e| **e == plus || **e == minus).collect();
        assert_eq!(mine.len(), 100);
        for (i, entry) in mine.iter().enumerate() {
            let expected = if i % 2 == 0 { &plus } else { &minus };
            assert_eq!(*entry, expected);
        }
    }
    assert_eq!(registry.registered_item_count(), 0);
}
