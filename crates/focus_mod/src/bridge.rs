//! # Registry Event Bridge
//!
//! Registry subscribers run on the mutating thread with the registry lock
//! held, so they must not block and must not call back into the registry.
//! The bridge is the subscriber host systems should use instead: it pushes
//! each notification into a bounded channel and the host drains it from
//! its own loop.
//!
//! ```text
//! ┌──────────────┐  notify   ┌──────────────┐  drain   ┌──────────────┐
//! │ ItemRegistry │──────────>│   Bounded    │─────────>│  Host loop   │
//! │  (any thread)│ try_send  │   channel    │          │  (UI, save)  │
//! └──────────────┘           └──────────────┘          └──────────────┘
//! ```
//!
//! A full channel drops the event and counts it. Registration never
//! blocks on a slow host.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crossbeam_channel::{bounded, Receiver, TrySendError};
use focus_items::{ItemRegistry, RegistryEvent, SubscriptionId};

/// Forwards registry notifications over a bounded channel.
pub struct RegistryBridge {
    registry: Arc<ItemRegistry>,
    subscription: Option<SubscriptionId>,
    receiver: Receiver<RegistryEvent>,
    dropped: Arc<AtomicU64>,
}

impl RegistryBridge {
    /// Subscribes to `registry` and starts forwarding.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Events held before new ones are dropped. Clamped to 1.
    #[must_use]
    pub fn attach(registry: &Arc<ItemRegistry>, capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity.max(1));
        let dropped = Arc::new(AtomicU64::new(0));

        let counter = Arc::clone(&dropped);
        let subscription = registry.subscribe(move |event| match sender.try_send(event.clone()) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                let total = counter.fetch_add(1, Ordering::Relaxed) + 1;
                tracing::warn!(
                    "Registry bridge full, dropped event for '{}' ({} dropped so far)",
                    event.item_id(),
                    total
                );
            }
            Err(TrySendError::Disconnected(_)) => {}
        });

        Self {
            registry: Arc::clone(registry),
            subscription: Some(subscription),
            receiver,
            dropped,
        }
    }

    /// Stops forwarding. Already queued events stay drainable.
    ///
    /// Returns false if the bridge was already detached.
    pub fn detach(&mut self) -> bool {
        match self.subscription.take() {
            Some(subscription) => {
                // Registry shutdown may have cleared it already.
                self.registry.unsubscribe(subscription);
                true
            }
            None => false,
        }
    }

    /// Whether the bridge is still subscribed.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Receives all pending events (non-blocking).
    pub fn drain(&self) -> Vec<RegistryEvent> {
        let mut events = Vec::with_capacity(self.receiver.len());
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }

    /// Receives one event, if any.
    #[inline]
    pub fn try_recv(&self) -> Option<RegistryEvent> {
        self.receiver.try_recv().ok()
    }

    /// Number of queued events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Events lost to a full channel since attach.
    #[must_use]
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl Drop for RegistryBridge {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for RegistryBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryBridge")
            .field("attached", &self.is_attached())
            .field("pending", &self.pending_count())
            .field("dropped", &self.dropped_count())
            .finish()
    }
}
