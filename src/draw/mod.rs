//! Draw Resolution
//!
//! ## Module Structure
//!
//! - `engine`: Roll and tier/item selection
//! - `result`: Result snapshots handed to callers and history
//! - `session`: Idle/Rolling/ShowingResult state machine

pub mod engine;
pub mod result;
pub mod session;

pub use engine::{wishlist_index, DrawEngine, DrawError};
pub use result::{DrawResult, ItemInfo, TierInfo};
pub use session::{DrawPhase, DrawSession, SessionError};
