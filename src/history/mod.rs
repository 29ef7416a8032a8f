//! Draw History
//!
//! - `item`: Recorded entries and their wire format
//! - `store`: Bounded store synchronized with a key-value backend

pub mod item;
pub mod store;

pub use item::HistoryItem;
pub use store::{HistoryError, HistoryStore};
