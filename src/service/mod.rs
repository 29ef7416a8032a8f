//! Service Layer
//!
//! Async facade used by the presentation layer. Non-deterministic: it reads
//! the clock, seeds from entropy and sleeps. All draw logic lives in `draw/`.

pub mod config;
pub mod reward;

pub use config::ServiceConfig;
pub use reward::{RewardService, ServiceError};
