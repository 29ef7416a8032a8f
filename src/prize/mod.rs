//! Prize Configuration
//!
//! Static, validated description of what a draw can yield.
//!
//! ## Module Structure
//!
//! - `tier`: Tier kinds, roll ranges, items
//! - `table`: Validated tier table and the process-wide standard instance
//! - `pool`: Built-in pool content

pub mod tier;
pub mod table;
pub mod pool;

pub use tier::{IconRef, PrizeTier, SubItem, TierKind, TierRange};
pub use table::{ConfigError, TierTable, WISHLIST_ITEM_COUNT};
