//! Configuration type definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Input bridge settings.
///
/// Controls the size of the event queue that buffers host input between
/// engine ticks, and how loudly dropped events are reported.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InputConfig {
    /// Queue slot count (valid range: 2 - 65536). One slot is always kept free,
    /// so the queue holds at most `queue_capacity - 1` pending events.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Log a warning for the first dropped event and then once every this many
    /// drops (minimum 1)
    #[serde(default = "default_drop_log_interval")]
    pub drop_log_interval: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
            drop_log_interval: default_drop_log_interval(),
        }
    }
}

/// Engine start-up and pacing settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EngineConfig {
    /// Default game data file, used when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iwad: Option<PathBuf>,

    /// Engine ticks per second (valid range: 1 - 1000)
    #[serde(default = "default_tick_rate")]
    pub tick_rate_hz: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            iwad: None,
            tick_rate_hz: default_tick_rate(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_queue_capacity() -> usize {
    256
}

fn default_drop_log_interval() -> u64 {
    64
}

fn default_tick_rate() -> u32 {
    35
}
