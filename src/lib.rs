//! # Reward Draw
//!
//! Weighted reward draw with a bounded, persisted history.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       REWARD DRAW                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  prize/          - Static prize configuration                │
//! │  ├── tier.rs     - Tier kinds, ranges, items                 │
//! │  ├── table.rs    - Validated tier table                      │
//! │  └── pool.rs     - Built-in pool content                     │
//! │                                                              │
//! │  draw/           - Draw resolution                           │
//! │  ├── engine.rs   - Roll, tier lookup, item selection         │
//! │  ├── result.rs   - Result snapshots                          │
//! │  └── session.rs  - Idle / Rolling / ShowingResult            │
//! │                                                              │
//! │  history/        - Bounded, most-recent-first log            │
//! │  storage/        - Key-value adapters (memory, file)         │
//! │  service/        - Async facade with reveal latency          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Draw Rules
//!
//! - Rolls are uniform over [1, 100]; tier ranges partition that interval.
//! - The wishlist tier picks by calendar-day parity of the draw time:
//!   odd days take item 0, even days item 1.
//! - Every other tier picks uniformly among its items.
//!
//! ## Quick Start
//!
//! ```
//! use chrono::Utc;
//! use reward_draw::{DrawEngine, HistoryStore, MemoryStore, TierTable};
//!
//! let mut engine = DrawEngine::seeded(TierTable::standard(), 7);
//! let mut history = HistoryStore::open(MemoryStore::new());
//!
//! let result = engine.draw(&Utc::now()).unwrap();
//! let item = history.record(result);
//! assert_eq!(history.items()[0], item);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod prize;
pub mod draw;
pub mod history;
pub mod storage;
pub mod service;

// Re-export commonly used types
pub use prize::{ConfigError, IconRef, PrizeTier, SubItem, TierKind, TierRange, TierTable};
pub use draw::{DrawEngine, DrawError, DrawPhase, DrawResult, DrawSession, SessionError};
pub use history::{HistoryItem, HistoryStore};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use service::{RewardService, ServiceConfig, ServiceError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lowest possible roll.
pub const ROLL_MIN: u8 = 1;

/// Highest possible roll.
pub const ROLL_MAX: u8 = 100;

/// Maximum number of history entries kept.
pub const HISTORY_CAPACITY: usize = 50;

/// Storage key of the history blob. The suffix changes only with the schema.
pub const HISTORY_STORAGE_KEY: &str = "lucky_reward_history_v5";

/// Default minimum time between starting a draw and revealing it.
pub const DEFAULT_REVEAL_LATENCY_MS: u64 = 1000;
