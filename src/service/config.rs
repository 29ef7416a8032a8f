//! Service configuration.

use std::time::Duration;

use crate::{DEFAULT_REVEAL_LATENCY_MS, HISTORY_CAPACITY, HISTORY_STORAGE_KEY};

/// Configuration for a [`crate::service::RewardService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Minimum time a draw stays in the rolling phase before it is revealed.
    pub min_reveal_latency: Duration,
    /// Storage key of the history blob.
    pub history_key: String,
    /// Maximum history length (at most 50).
    pub history_capacity: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            min_reveal_latency: Duration::from_millis(DEFAULT_REVEAL_LATENCY_MS),
            history_key: HISTORY_STORAGE_KEY.to_string(),
            history_capacity: HISTORY_CAPACITY,
        }
    }
}

impl ServiceConfig {
    /// Create config from environment variables.
    ///
    /// Reads `REWARD_MIN_LATENCY_MS`, `REWARD_HISTORY_KEY` and
    /// `REWARD_HISTORY_CAPACITY`; unset or unparsable values fall back to
    /// the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            min_reveal_latency: std::env::var("REWARD_MIN_LATENCY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.min_reveal_latency),
            history_key: std::env::var("REWARD_HISTORY_KEY")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.history_key),
            history_capacity: std::env::var("REWARD_HISTORY_CAPACITY")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .map(|c| c.clamp(1, HISTORY_CAPACITY))
                .unwrap_or(defaults.history_capacity),
        }
    }

    /// Same config with a different reveal latency.
    pub fn with_min_reveal_latency(mut self, latency: Duration) -> Self {
        self.min_reveal_latency = latency;
        self
    }
}
