//! Prize Tier Definitions
//!
//! A tier is a band of rolls mapped to a themed group of reward items.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ROLL_MAX, ROLL_MIN};

// =============================================================================
// TIER KIND
// =============================================================================

/// Closed set of tier kinds.
///
/// Serialized with the wire names used by persisted history
/// (`INSTANT`, `IMMERSIVE`, `WISHLIST`, `LEGENDARY`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TierKind {
    /// Small, immediate rewards.
    Instant,
    /// Longer, immersive activities.
    Immersive,
    /// Wishlist purchase; item chosen by calendar-day parity.
    Wishlist,
    /// Top tier with a single item.
    Legendary,
}

impl TierKind {
    /// Wire name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            TierKind::Instant => "INSTANT",
            TierKind::Immersive => "IMMERSIVE",
            TierKind::Wishlist => "WISHLIST",
            TierKind::Legendary => "LEGENDARY",
        }
    }

    /// Whether item selection in this tier is driven by the date instead of the RNG.
    #[inline]
    pub fn is_date_driven(self) -> bool {
        matches!(self, TierKind::Wishlist)
    }

    /// Whether a hit on this tier deserves a celebration in the presentation layer.
    #[inline]
    pub fn is_rare(self) -> bool {
        matches!(self, TierKind::Wishlist | TierKind::Legendary)
    }
}

impl fmt::Display for TierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// TIER RANGE
// =============================================================================

/// Inclusive roll range `[lo, hi]`.
///
/// Serialized as a two-element array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 2]", into = "[u8; 2]")]
pub struct TierRange {
    /// Lowest roll in the band.
    pub lo: u8,
    /// Highest roll in the band.
    pub hi: u8,
}

impl TierRange {
    /// Create a range. No validation; see [`crate::prize::TierTable::new`].
    pub const fn new(lo: u8, hi: u8) -> Self {
        Self { lo, hi }
    }

    /// Check if a roll falls inside this band.
    #[inline]
    pub fn contains(&self, roll: u8) -> bool {
        self.lo <= roll && roll <= self.hi
    }

    /// Number of rolls covered (0 if inverted).
    pub fn width(&self) -> u8 {
        if self.hi < self.lo {
            0
        } else {
            self.hi - self.lo + 1
        }
    }

    /// Check that both bounds lie in the roll domain.
    pub fn is_within_roll_domain(&self) -> bool {
        self.lo >= ROLL_MIN && self.hi <= ROLL_MAX
    }
}

impl From<[u8; 2]> for TierRange {
    fn from([lo, hi]: [u8; 2]) -> Self {
        Self { lo, hi }
    }
}

impl From<TierRange> for [u8; 2] {
    fn from(range: TierRange) -> Self {
        [range.lo, range.hi]
    }
}

impl fmt::Display for TierRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

// =============================================================================
// ITEMS
// =============================================================================

/// Opaque icon reference handed to the presentation layer.
///
/// Never parsed or validated here.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconRef(pub String);

impl IconRef {
    /// Create from any string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the raw reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A single reward inside a tier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubItem {
    /// Identifier, unique within its tier.
    pub id: String,
    /// Short title.
    pub title: String,
    /// What the reward entitles the user to.
    pub description: String,
    /// Icon reference for the presentation layer.
    pub icon: IconRef,
    /// Lore line shown verbatim with a result.
    pub flavor_text: String,
}

impl SubItem {
    /// Create an item.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
        flavor_text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            icon: IconRef::new(icon),
            flavor_text: flavor_text.into(),
        }
    }
}

/// A probability band and its items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrizeTier {
    /// Tier kind.
    pub kind: TierKind,
    /// Display name.
    pub name: String,
    /// Probability label for display (e.g. "50%").
    pub probability: String,
    /// Rolls mapped to this tier.
    pub range: TierRange,
    /// Ordered items. For [`TierKind::Wishlist`], index 0 is the odd-day
    /// item and index 1 the even-day item.
    pub items: Vec<SubItem>,
}

impl PrizeTier {
    /// Create a tier.
    pub fn new(
        kind: TierKind,
        name: impl Into<String>,
        probability: impl Into<String>,
        range: TierRange,
        items: Vec<SubItem>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            probability: probability.into(),
            range,
            items,
        }
    }

    /// Look up an item by id.
    pub fn item(&self, id: &str) -> Option<&SubItem> {
        self.items.iter().find(|item| item.id == id)
    }
}
