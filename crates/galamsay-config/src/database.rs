//! Local libSQL store configuration.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "galamsay_analysis.db".to_string()
}

const fn default_busy_timeout_ms() -> u64 {
    5_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path of the local database file. `:memory:` opens a throwaway store.
    #[serde(default = "default_path")]
    pub path: String,

    /// How long a writer waits on another process's lock before giving up.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}
