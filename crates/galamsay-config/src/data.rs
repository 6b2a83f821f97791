//! Input data configuration.

use serde::{Deserialize, Serialize};

fn default_csv_path() -> String {
    "galamsay_data.csv".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// Path to the CSV file read by `analyze` and the live statistics.
    #[serde(default = "default_csv_path")]
    pub csv_path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
        }
    }
}
