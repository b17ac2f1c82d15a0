//! # Rarity Tiers
//!
//! The closed category set used to group item definitions.

use serde::{Deserialize, Serialize};

/// Rarity tier for items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rarity {
    /// Common items (gray)
    #[default]
    Common = 0,
    /// Uncommon items (green)
    Uncommon = 1,
    /// Rare items (blue)
    Rare = 2,
    /// Epic items (purple)
    Epic = 3,
    /// Legendary items (orange)
    Legendary = 4,
}

impl Rarity {
    /// Every tier, lowest first.
    pub const ALL: [Self; 5] = [
        Self::Common,
        Self::Uncommon,
        Self::Rare,
        Self::Epic,
        Self::Legendary,
    ];

    /// Integer tier (0 = Common).
    #[inline]
    #[must_use]
    pub const fn tier(self) -> u8 {
        self as u8
    }

    /// Converts from an integer tier, saturating at `Legendary`.
    #[inline]
    #[must_use]
    pub const fn from_tier(value: u8) -> Self {
        match value {
            0 => Self::Common,
            1 => Self::Uncommon,
            2 => Self::Rare,
            3 => Self::Epic,
            _ => Self::Legendary,
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_roundtrip() {
        for rarity in Rarity::ALL {
            assert_eq!(Rarity::from_tier(rarity.tier()), rarity);
        }
    }

    #[test]
    fn test_from_tier_saturates() {
        assert_eq!(Rarity::from_tier(9), Rarity::Legendary);
        assert_eq!(Rarity::from_tier(255), Rarity::Legendary);
    }

    #[test]
    fn test_ordering() {
        assert!(Rarity::Common < Rarity::Legendary);
        assert!(Rarity::Rare > Rarity::Uncommon);
    }
}
