use anyhow::Context;
use galamsay_config::GalamsayConfig;
use galamsay_core::aggregator::{Summary, aggregate};
use galamsay_core::entities::RawRow;
use galamsay_core::source::load_rows;
use galamsay_core::validator::validate_all;
use galamsay_db::GalamsayService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: GalamsayService,
    pub config: GalamsayConfig,
}

impl AppContext {
    /// Open the configured store.
    pub async fn init(config: GalamsayConfig) -> anyhow::Result<Self> {
        let service = GalamsayService::open(&config.database)
            .await
            .with_context(|| format!("failed to open store at '{}'", config.database.path))?;
        Ok(Self { service, config })
    }

    /// Read every row of the configured CSV.
    pub fn load_rows(&self) -> anyhow::Result<Vec<RawRow>> {
        read_csv(&self.config)
    }

    /// Row cap for list commands: `--limit`, else `general.default_limit`.
    #[must_use]
    pub fn limit(&self, requested: Option<u32>) -> u32 {
        requested.unwrap_or(self.config.general.default_limit)
    }

    /// Validate and aggregate the configured CSV without touching the store.
    pub fn live_summary(&self, threshold: u32) -> anyhow::Result<Summary> {
        live_summary(&self.config, threshold)
    }
}

pub fn read_csv(config: &GalamsayConfig) -> anyhow::Result<Vec<RawRow>> {
    let rows = load_rows(&config.data.csv_path)?;
    tracing::debug!(path = %config.data.csv_path, rows = rows.len(), "loaded csv");
    Ok(rows)
}

pub fn live_summary(config: &GalamsayConfig, threshold: u32) -> anyhow::Result<Summary> {
    let rows = read_csv(config)?;
    let validated = validate_all(&rows);
    Ok(aggregate(&validated.valid, threshold))
}
