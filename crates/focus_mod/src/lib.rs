//! # FOCUS Mod
//!
//! Host integration for the focus item layer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐ initialize  ┌──────────────┐  events  ┌─────────────┐
//! │    Host     │────────────>│   FocusMod   │─────────>│   Bridge    │
//! │ (game loop) │<────────────│  (registry)  │          │  (channel)  │
//! └─────────────┘   drain     └──────────────┘          └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use focus_mod::{FocusMod, ModConfig};
//!
//! let mut focus = FocusMod::new(ModConfig::default());
//! let report = focus.initialize().unwrap();
//! assert_eq!(report.builtin_items, 4);
//! assert!(focus.registry().contains("potion_focus"));
//! focus.shutdown();
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod bridge;
pub mod builtin;
pub mod config;
pub mod error;
pub mod lifecycle;

pub use bridge::RegistryBridge;
pub use config::ModConfig;
pub use error::{ModError, ModResult};
pub use lifecycle::{FocusMod, InitReport};

/// Re-export of the item layer.
pub use focus_items as items;
