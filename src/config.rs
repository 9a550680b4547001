//! Controller configuration parameters
//!
//! All tunable timing for the print sequence plus the board line map.
//! Defaults reproduce the reference hardware; other printer variants
//! override them through [`PrinterConfig::from_json`].

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::lines::LineMap;

/// Minimum time the print head needs to strike one line.
pub const DEFAULT_HEAD_DWELL_MS: u32 = 100;
/// Minimum time the paper needs to advance one increment.
pub const DEFAULT_FEED_SETTLE_MS: u32 = 50;
/// Host-link poll cadence while idle.
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 100;

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterConfig {
    // --- Print sub-cycle ---
    /// Print-head energised time per sub-cycle (milliseconds)
    pub head_dwell_ms: u32,
    /// Settle time after the head releases, before the next data check (milliseconds)
    pub feed_settle_ms: u32,

    // --- Main loop ---
    /// Idle poll interval for pending jobs (milliseconds)
    pub poll_interval_ms: u32,

    // --- Safety ---
    /// Upper bound on sub-cycles per job. `None` = unbounded.
    pub max_cycles: Option<u32>,

    // --- Board ---
    pub lines: LineMap,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            head_dwell_ms: DEFAULT_HEAD_DWELL_MS,
            feed_settle_ms: DEFAULT_FEED_SETTLE_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_cycles: None,
            lines: LineMap::default(),
        }
    }
}

impl PrinterConfig {
    /// Reject values that would make the print sequence meaningless.
    /// Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.head_dwell_ms == 0 {
            return Err(ConfigError::ValidationFailed("head_dwell_ms must be > 0"));
        }
        if self.feed_settle_ms == 0 {
            return Err(ConfigError::ValidationFailed("feed_settle_ms must be > 0"));
        }
        if self.feed_settle_ms >= self.head_dwell_ms {
            return Err(ConfigError::ValidationFailed(
                "feed_settle_ms must be shorter than head_dwell_ms",
            ));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("poll_interval_ms must be > 0"));
        }
        if self.max_cycles == Some(0) {
            return Err(ConfigError::ValidationFailed(
                "max_cycles must be > 0 when set",
            ));
        }
        if self.lines.has_duplicate_pins() {
            return Err(ConfigError::ValidationFailed("lines must use distinct pins"));
        }
        Ok(())
    }

    /// Parse a JSON document and validate it.  Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
