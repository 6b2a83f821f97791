//! Analysis run configuration.

use serde::{Deserialize, Serialize};

/// Default city threshold. The CLI reads it whenever `--threshold` is omitted.
const fn default_threshold() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// Threshold used by `analyze` and `cities-above` when `--threshold` is not given.
    #[serde(default = "default_threshold")]
    pub default_threshold: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_threshold: default_threshold(),
        }
    }
}
