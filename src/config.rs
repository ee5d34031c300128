use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Highest difficulty level; levels occupy a 3-bit field in the resume record.
pub const MAX_LEVEL: u8 = 7;
const DEFAULT_YIELD_INTERVAL_MS: u64 = 16;
const DEFAULT_JITTER: u8 = 3;

/// Tunables for the computer player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Milliseconds of search between two calls of the host's yield callback.
    pub yield_interval_ms: u64,
    /// Inclusive upper bound of the random offset added to leaf scores.
    /// 0 makes the search deterministic.
    pub jitter: u8,
    /// Maximum search depth for each difficulty level.
    pub level_depths: [u8; MAX_LEVEL as usize + 1],
}

impl SearchConfig {
    pub fn yield_interval(&self) -> Duration {
        Duration::from_millis(self.yield_interval_ms)
    }

    /// Levels above [`MAX_LEVEL`] use the deepest entry.
    pub fn max_depth_for_level(&self, level: u8) -> u8 {
        self.level_depths[level.min(MAX_LEVEL) as usize].max(1)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            yield_interval_ms: DEFAULT_YIELD_INTERVAL_MS,
            jitter: DEFAULT_JITTER,
            level_depths: [1, 2, 3, 4, 5, 6, 7, 8],
        }
    }
}
