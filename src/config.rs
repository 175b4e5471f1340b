//! Run configuration.

use serde::{Deserialize, Serialize};

use crate::error::{ColoringError, ColoringResult};

/// Settings for one coloring run.
///
/// Deserializes from e.g. `{"threads": 8}`; missing fields take their
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColoringConfig {
    /// Worker threads per phase. Must be at least 1.
    pub threads: usize,
}

impl Default for ColoringConfig {
    fn default() -> Self {
        Self {
            threads: std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

impl ColoringConfig {
    /// A configuration using `threads` workers.
    pub fn with_threads(threads: usize) -> Self {
        Self { threads }
    }

    /// Checks that the configuration can be used.
    pub fn validate(&self) -> ColoringResult<()> {
        if self.threads == 0 {
            return Err(ColoringError::InvalidConfig(
                "thread count must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}
