//! # Prefab Seam
//!
//! Prefabs are engine-owned templates. The item layer only stores opaque
//! handles and asks the host engine to instantiate them through
//! [`PrefabSpawner`].

use std::fmt;
use std::sync::Arc;

use focus_shared::Placement;

/// Opaque reference to an engine-managed template.
///
/// Cheap to clone; two handles are equal when they name the same asset.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PrefabHandle {
    asset: Arc<str>,
}

impl PrefabHandle {
    /// Wraps an engine asset key.
    #[must_use]
    pub fn new(asset: impl Into<Arc<str>>) -> Self {
        Self { asset: asset.into() }
    }

    /// The engine asset key.
    #[must_use]
    pub fn asset(&self) -> &str {
        &self.asset
    }
}

impl fmt::Debug for PrefabHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrefabHandle({})", self.asset)
    }
}

/// Host engine object creation.
///
/// Implemented by the engine integration; the registry calls it while
/// holding its lock, so implementations must not call back into the
/// registry.
pub trait PrefabSpawner {
    /// The engine's handle to a live object.
    type Instance;

    /// Creates a live object from `prefab` at `placement`.
    fn spawn(&self, prefab: &PrefabHandle, placement: Placement) -> Self::Instance;
}

impl<S: PrefabSpawner + ?Sized> PrefabSpawner for &S {
    type Instance = S::Instance;

    fn spawn(&self, prefab: &PrefabHandle, placement: Placement) -> Self::Instance {
        (**self).spawn(prefab, placement)
    }
}
