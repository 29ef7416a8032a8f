//! Draw Engine
//!
//! Turns a roll into a tier and an item. Rolls are uniform over [1, 100].
//! The wishlist tier picks its item from the calendar-day parity of `now`;
//! every other tier picks uniformly with the RNG.

use chrono::{DateTime, Datelike, TimeZone};
use rand::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::draw::result::DrawResult;
use crate::prize::{PrizeTier, SubItem, TierKind, TierTable};
use crate::{ROLL_MAX, ROLL_MIN};

/// Internal consistency failures during a draw.
///
/// A validated table makes these unreachable; if one occurs the draw is
/// aborted and nothing is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    /// No tier contains the roll.
    #[error("no tier matches roll {roll}")]
    NoTierMatched {
        /// The unmatched roll.
        roll: u8,
    },

    /// The matched tier has no item at the selected position.
    #[error("tier {kind} has no item at index {index}")]
    NoItem {
        /// Matched tier.
        kind: TierKind,
        /// Index that was selected.
        index: usize,
    },
}

/// Item index for the wishlist tier: odd days pick 0, even days pick 1.
#[inline]
pub fn wishlist_index(day_of_month: u32) -> usize {
    if day_of_month % 2 == 1 {
        0
    } else {
        1
    }
}

/// Resolves draws against a tier table.
#[derive(Debug, Clone)]
pub struct DrawEngine<'t> {
    table: &'t TierTable,
    rng: StdRng,
}

impl<'t> DrawEngine<'t> {
    /// Create an engine with an explicit RNG.
    pub fn new(table: &'t TierTable, rng: StdRng) -> Self {
        Self { table, rng }
    }

    /// Create an engine seeded from OS entropy.
    pub fn with_entropy(table: &'t TierTable) -> Self {
        Self::new(table, StdRng::from_entropy())
    }

    /// Create an engine with a reproducible sequence (tests, benches, replays).
    pub fn seeded(table: &'t TierTable, seed: u64) -> Self {
        Self::new(table, StdRng::seed_from_u64(seed))
    }

    /// Table this engine draws from.
    pub fn table(&self) -> &'t TierTable {
        self.table
    }

    /// Roll a uniform integer in [1, 100].
    pub fn roll(&mut self) -> u8 {
        self.rng.gen_range(ROLL_MIN..=ROLL_MAX)
    }

    /// Perform one draw at `now`.
    pub fn draw<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Result<DrawResult, DrawError> {
        let roll = self.roll();
        self.resolve(roll, now)
    }

    /// Resolve a given roll at `now`.
    ///
    /// Consumes randomness only when the matched tier picks its item at random.
    pub fn resolve<Tz: TimeZone>(
        &mut self,
        roll: u8,
        now: &DateTime<Tz>,
    ) -> Result<DrawResult, DrawError> {
        let table = self.table;
        let tier = table
            .tier_for_roll(roll)
            .ok_or(DrawError::NoTierMatched { roll })?;
        let item = self.select_item(tier, now.day())?;

        debug!("Roll {} -> {} / {}", roll, tier.kind, item.id);

        Ok(DrawResult::new(roll, tier, item, now.timestamp_millis()))
    }

    fn select_item<'a>(&mut self, tier: &'a PrizeTier, day_of_month: u32) -> Result<&'a SubItem, DrawError> {
        if tier.kind.is_date_driven() {
            let index = wishlist_index(day_of_month);
            return tier
                .items
                .get(index)
                .ok_or(DrawError::NoItem { kind: tier.kind, index });
        }

        tier.items
            .choose(&mut self.rng)
            .ok_or(DrawError::NoItem { kind: tier.kind, index: 0 })
    }
}

// =============================================================================
// TESTS
// =============================================================================
