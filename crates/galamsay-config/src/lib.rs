//! # galamsay-config
//!
//! Layered configuration loading for galamsay using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`GALAMSAY_*` prefix, `__` as separator)
//! 2. The short-form variables `GALAMSAY_DATA_FILE` and `GALAMSAY_DB_PATH`
//! 3. Project-level `./galamsay.toml`
//! 4. User-level `~/.config/galamsay/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `GALAMSAY_DATABASE__PATH` -> `database.path`,
//! `GALAMSAY_ANALYSIS__DEFAULT_THRESHOLD` -> `analysis.default_threshold`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use galamsay_config::GalamsayConfig;
//!
//! let config = GalamsayConfig::load_with_dotenv().expect("config");
//! println!("reading {}", config.data.csv_path);
//! ```

mod analysis;
mod data;
mod database;
mod error;
mod general;

pub use analysis::AnalysisConfig;
pub use data::DataConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment prefix for every galamsay variable.
pub const ENV_PREFIX: &str = "GALAMSAY_";

/// Project-local config file name, resolved against the current directory.
pub const LOCAL_CONFIG_FILE: &str = "galamsay.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GalamsayConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl GalamsayConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed and
    /// `ConfigError::InvalidValue` if a path is left empty.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: short-form path variables
        figment = figment
            .merge(
                Env::raw()
                    .only(&["GALAMSAY_DATA_FILE"])
                    .map(|_| "data.csv_path".into()),
            )
            .merge(
                Env::raw()
                    .only(&["GALAMSAY_DB_PATH"])
                    .map(|_| "database.path".into()),
            );

        // Layer 4: sectioned environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Reject values that would only fail later with a less useful error.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data.csv_path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "data.csv_path".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("galamsay").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or falls back to the
    /// current directory. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
