//! Tier Table
//!
//! The validated, read-only prize configuration. Construction is the only
//! place a table can be checked, so every [`TierTable`] in existence
//! satisfies the partition and item-count rules.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use thiserror::Error;

use super::pool::standard_tiers;
use super::tier::{PrizeTier, TierKind};
use crate::{ROLL_MAX, ROLL_MIN};

/// Number of items the wishlist tier must carry (odd day, even day).
pub const WISHLIST_ITEM_COUNT: usize = 2;

static STANDARD: OnceLock<TierTable> = OnceLock::new();

/// Prize configuration errors.
///
/// These indicate a broken table and are fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No tiers at all.
    #[error("tier table is empty")]
    Empty,

    /// A range has `lo > hi`.
    #[error("tier {kind} has inverted range [{lo}, {hi}]")]
    Inverted {
        /// Offending tier.
        kind: TierKind,
        /// Lower bound.
        lo: u8,
        /// Upper bound.
        hi: u8,
    },

    /// A range reaches outside [1, 100].
    #[error("tier {kind} range [{lo}, {hi}] leaves the roll domain")]
    OutOfBounds {
        /// Offending tier.
        kind: TierKind,
        /// Lower bound.
        lo: u8,
        /// Upper bound.
        hi: u8,
    },

    /// Rolls between two tiers are not covered.
    #[error("rolls {expected}..{found} are not covered (before tier {kind})")]
    Gap {
        /// Tier that starts too late.
        kind: TierKind,
        /// First roll that needed coverage.
        expected: u8,
        /// Where the tier actually starts.
        found: u8,
    },

    /// A tier starts inside the previous one.
    #[error("tier {kind} starts at {found}, overlapping rolls before {expected}")]
    Overlap {
        /// Tier that starts too early.
        kind: TierKind,
        /// First roll not yet covered.
        expected: u8,
        /// Where the tier actually starts.
        found: u8,
    },

    /// The last tier stops short of the top roll.
    #[error("rolls {}..={} are not covered", .last_hi + 1, ROLL_MAX)]
    Incomplete {
        /// Highest covered roll.
        last_hi: u8,
    },

    /// A tier has no items.
    #[error("tier {kind} has no items")]
    EmptyTier {
        /// Offending tier.
        kind: TierKind,
    },

    /// Two items in a tier share an id.
    #[error("tier {kind} has duplicate item id {id:?}")]
    DuplicateItemId {
        /// Offending tier.
        kind: TierKind,
        /// Repeated id.
        id: String,
    },

    /// A tier kind appears more than once.
    #[error("tier kind {kind} appears more than once")]
    DuplicateKind {
        /// Repeated kind.
        kind: TierKind,
    },

    /// No wishlist tier is configured.
    #[error("no WISHLIST tier configured")]
    MissingWishlist,

    /// The wishlist tier does not carry exactly two items.
    #[error("WISHLIST tier must have exactly {} items, found {count}", WISHLIST_ITEM_COUNT)]
    WishlistItemCount {
        /// Number of items found.
        count: usize,
    },
}

/// Immutable, validated sequence of prize tiers sorted by range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierTable {
    tiers: Vec<PrizeTier>,
}

impl TierTable {
    /// Validate and wrap a tier list.
    ///
    /// Tiers must be given in ascending range order and together cover
    /// every roll in [1, 100] exactly once.
    pub fn new(tiers: Vec<PrizeTier>) -> Result<Self, ConfigError> {
        validate(&tiers)?;
        Ok(Self { tiers })
    }

    /// The built-in prize pool.
    ///
    /// Validated on first access. A built-in table that fails validation is
    /// a build defect, so this aborts instead of returning an error.
    pub fn standard() -> &'static TierTable {
        STANDARD.get_or_init(|| match TierTable::new(standard_tiers()) {
            Ok(table) => table,
            Err(e) => panic!("built-in prize table is invalid: {e}"),
        })
    }

    /// All tiers in ascending range order.
    pub fn tiers(&self) -> &[PrizeTier] {
        &self.tiers
    }

    /// Number of tiers.
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Always false for a validated table.
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// First tier whose range contains `roll`.
    pub fn tier_for_roll(&self, roll: u8) -> Option<&PrizeTier> {
        self.tiers.iter().find(|tier| tier.range.contains(roll))
    }

    /// Tier of a given kind.
    pub fn get(&self, kind: TierKind) -> Option<&PrizeTier> {
        self.tiers.iter().find(|tier| tier.kind == kind)
    }

    /// Iterate over the tiers.
    pub fn iter(&self) -> std::slice::Iter<'_, PrizeTier> {
        self.tiers.iter()
    }
}

impl<'a> IntoIterator for &'a TierTable {
    type Item = &'a PrizeTier;
    type IntoIter = std::slice::Iter<'a, PrizeTier>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiers.iter()
    }
}

fn validate(tiers: &[PrizeTier]) -> Result<(), ConfigError> {
    if tiers.is_empty() {
        return Err(ConfigError::Empty);
    }

    let mut kinds = BTreeSet::new();
    // Next roll that still needs a tier. u16 so it can step past ROLL_MAX.
    let mut expected: u16 = ROLL_MIN as u16;

    for tier in tiers {
        let kind = tier.kind;
        let (lo, hi) = (tier.range.lo, tier.range.hi);

        if !kinds.insert(kind) {
            return Err(ConfigError::DuplicateKind { kind });
        }
        if lo > hi {
            return Err(ConfigError::Inverted { kind, lo, hi });
        }
        if !tier.range.is_within_roll_domain() {
            return Err(ConfigError::OutOfBounds { kind, lo, hi });
        }

        let start = lo as u16;
        if start > expected {
            return Err(ConfigError::Gap { kind, expected: expected as u8, found: lo });
        }
        if start < expected {
            return Err(ConfigError::Overlap { kind, expected: expected as u8, found: lo });
        }
        expected = hi as u16 + 1;

        if tier.items.is_empty() {
            return Err(ConfigError::EmptyTier { kind });
        }
        let mut ids = BTreeSet::new();
        for item in &tier.items {
            if !ids.insert(item.id.as_str()) {
                return Err(ConfigError::DuplicateItemId { kind, id: item.id.clone() });
            }
        }

        if kind == TierKind::Wishlist && tier.items.len() != WISHLIST_ITEM_COUNT {
            return Err(ConfigError::WishlistItemCount { count: tier.items.len() });
        }
    }

    if expected <= ROLL_MAX as u16 {
        return Err(ConfigError::Incomplete { last_hi: (expected - 1) as u8 });
    }
    if !kinds.contains(&TierKind::Wishlist) {
        return Err(ConfigError::MissingWishlist);
    }

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prize::tier::{SubItem, TierRange};
    use proptest::prelude::*;

    fn item(id: &str) -> SubItem {
        SubItem::new(id, id, "", "Icon", format!("{id} flavor"))
    }

    fn tier(kind: TierKind, lo: u8, hi: u8, ids: &[&str]) -> PrizeTier {
        PrizeTier::new(kind, kind.as_str(), "", TierRange::new(lo, hi), ids.iter().map(|id| item(id)).collect())
    }

    fn valid_tiers() -> Vec<PrizeTier> {
        vec![
            tier(TierKind::Instant, 1, 50, &["a", "b"]),
            tier(TierKind::Immersive, 51, 80, &["c"]),
            tier(TierKind::Wishlist, 81, 95, &["odd", "even"]),
            tier(TierKind::Legendary, 96, 100, &["top"]),
        ]
    }

    #[test]
    fn test_standard_table_is_valid() {
        let table = TierTable::standard();
        assert_eq!(table.len(), 4);
        assert_eq!(table.tiers()[0].range, TierRange::new(1, 50));
        assert_eq!(table.tiers()[3].range, TierRange::new(96, 100));
        assert_eq!(table.get(TierKind::Wishlist).unwrap().items.len(), 2);
        assert_eq!(table.get(TierKind::Legendary).unwrap().items.len(), 1);
    }

    #[test]
    fn test_standard_table_is_shared() {
        assert!(std::ptr::eq(TierTable::standard(), TierTable::standard()));
    }

    #[test]
    fn test_every_roll_hits_exactly_one_tier() {
        let table = TierTable::standard();
        for roll in ROLL_MIN..=ROLL_MAX {
            let hits = table.iter().filter(|t| t.range.contains(roll)).count();
            assert_eq!(hits, 1, "roll {roll} matched {hits} tiers");
        }
        assert!(table.tier_for_roll(0).is_none());
        assert!(table.tier_for_roll(101).is_none());
    }

    #[test]
    fn test_valid_custom_table() {
        assert!(TierTable::new(valid_tiers()).is_ok());
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(TierTable::new(vec![]), Err(ConfigError::Empty));
    }

    #[test]
    fn test_rejects_gap() {
        let mut tiers = valid_tiers();
        tiers[1].range = TierRange::new(52, 80);
        assert_eq!(
            TierTable::new(tiers),
            Err(ConfigError::Gap { kind: TierKind::Immersive, expected: 51, found: 52 })
        );
    }

    #[test]
    fn test_rejects_overlap() {
        let mut tiers = valid_tiers();
        tiers[2].range = TierRange::new(80, 95);
        assert_eq!(
            TierTable::new(tiers),
            Err(ConfigError::Overlap { kind: TierKind::Wishlist, expected: 81, found: 80 })
        );
    }

    #[test]
    fn test_rejects_late_start() {
        let mut tiers = valid_tiers();
        tiers[0].range = TierRange::new(2, 50);
        assert!(matches!(TierTable::new(tiers), Err(ConfigError::Gap { expected: 1, .. })));
    }

    #[test]
    fn test_rejects_short_coverage() {
        let mut tiers = valid_tiers();
        tiers[3].range = TierRange::new(96, 99);
        assert_eq!(TierTable::new(tiers), Err(ConfigError::Incomplete { last_hi: 99 }));
    }

    #[test]
    fn test_rejects_out_of_domain() {
        let mut tiers = valid_tiers();
        tiers[3].range = TierRange::new(96, 120);
        assert!(matches!(TierTable::new(tiers), Err(ConfigError::OutOfBounds { .. })));
    }

    #[test]
    fn test_rejects_inverted() {
        let mut tiers = valid_tiers();
        tiers[1].range = TierRange::new(80, 51);
        assert!(matches!(TierTable::new(tiers), Err(ConfigError::Inverted { .. })));
    }

    #[test]
    fn test_rejects_unsorted() {
        let mut tiers = valid_tiers();
        tiers.swap(0, 1);
        assert!(TierTable::new(tiers).is_err());
    }

    #[test]
    fn test_rejects_empty_tier() {
        let mut tiers = valid_tiers();
        tiers[1].items.clear();
        assert_eq!(TierTable::new(tiers), Err(ConfigError::EmptyTier { kind: TierKind::Immersive }));
    }

    #[test]
    fn test_rejects_duplicate_item_id() {
        let mut tiers = valid_tiers();
        tiers[0].items.push(item("a"));
        assert!(matches!(TierTable::new(tiers), Err(ConfigError::DuplicateItemId { .. })));
    }

    #[test]
    fn test_rejects_wrong_wishlist_size() {
        let mut tiers = valid_tiers();
        tiers[2].items.push(item("third"));
        assert_eq!(TierTable::new(tiers), Err(ConfigError::WishlistItemCount { count: 3 }));

        let mut tiers = valid_tiers();
        tiers[2].items.truncate(1);
        assert_eq!(TierTable::new(tiers), Err(ConfigError::WishlistItemCount { count: 1 }));
    }

    #[test]
    fn test_rejects_missing_wishlist() {
        let tiers = vec![
            tier(TierKind::Instant, 1, 80, &["a"]),
            tier(TierKind::Legendary, 81, 100, &["top"]),
        ];
        assert_eq!(TierTable::new(tiers), Err(ConfigError::MissingWishlist));
    }

    #[test]
    fn test_rejects_duplicate_kind() {
        let tiers = vec![
            tier(TierKind::Instant, 1, 40, &["a"]),
            tier(TierKind::Instant, 41, 80, &["b"]),
            tier(TierKind::Wishlist, 81, 100, &["odd", "even"]),
        ];
        assert_eq!(TierTable::new(tiers), Err(ConfigError::DuplicateKind { kind: TierKind::Instant }));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ConfigError::Incomplete { last_hi: 99 }.to_string(), "rolls 100..=100 are not covered");
        assert_eq!(
            ConfigError::WishlistItemCount { count: 3 }.to_string(),
            "WISHLIST tier must have exactly 2 items, found 3"
        );
    }

    proptest! {
        #[test]
        fn prop_standard_partition_covers_roll(roll in ROLL_MIN..=ROLL_MAX) {
            let table = TierTable::standard();
            let hits = table.iter().filter(|t| t.range.contains(roll)).count();
            prop_assert_eq!(hits, 1);
            prop_assert!(table.tier_for_roll(roll).is_some());
        }

        #[test]
        fn prop_split_points_validate(a in 2u8..=97, b in 2u8..=97, c in 2u8..=97) {
            // Any three distinct cut points give a valid four-tier partition.
            let mut cuts = [a, b, c];
            cuts.sort_unstable();
            prop_assume!(cuts[0] < cuts[1] && cuts[1] < cuts[2]);
            let tiers = vec![
                tier(TierKind::Instant, 1, cuts[0] - 1, &["a"]),
                tier(TierKind::Immersive, cuts[0], cuts[1] - 1, &["b"]),
                tier(TierKind::Wishlist, cuts[1], cuts[2] - 1, &["odd", "even"]),
                tier(TierKind::Legendary, cuts[2], 100, &["top"]),
            ];
            let table = TierTable::new(tiers).unwrap();
            for roll in ROLL_MIN..=ROLL_MAX {
                prop_assert_eq!(table.iter().filter(|t| t.range.contains(roll)).count(), 1);
            }
        }
    }
}
