//! # FOCUS Shared
//!
//! Common types used by the item layer and the host integration.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on a game engine. Engine-specific
//! conversions live behind the `PrefabSpawner` seam in `focus_items`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod math;

pub use math::{Placement, Quaternion, Vec3};
