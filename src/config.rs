//! Configuration for huffpack

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};

/// Summary events for each pass.
pub const DEBUG_LOW: u8 = 1;
/// Per-symbol code table and header events.
pub const DEBUG_HIGH: u8 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Verbosity of `tracing` events. Never changes the compressed output.
    pub debug_level: u8,
    /// Upper bound on the number of input bytes accepted by `compress`.
    pub max_input_size: Option<u64>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            debug_level: 0,
            max_input_size: None,
        }
    }
}

impl CodecConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| CodecError::Config(e.to_string()))
    }

    pub fn logs_summary(&self) -> bool {
        self.debug_level >= DEBUG_LOW
    }

    pub fn logs_detail(&self) -> bool {
        self.debug_level >= DEBUG_HIGH
    }
}
