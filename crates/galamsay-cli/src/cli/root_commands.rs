use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Validate the CSV, aggregate it, and store the result as a new batch.
    Analyze(ThresholdArgs),
    /// Show the most recent analysis log.
    Latest,
    /// List analysis logs, most recent first.
    Logs,
    /// Show the analysis log of one batch.
    Log(LogArgs),
    /// List stored site records.
    Sites(SitesArgs),
    /// List rejected rows.
    Invalid(InvalidArgs),
    /// Store-wide statistics.
    Stats,
    /// Total number of sites (latest batch, or live from the CSV).
    Total,
    /// Region with the most sites (latest batch, or live from the CSV).
    HighestRegion,
    /// Average sites per region (latest batch, or live from the CSV).
    Averages,
    /// Cities whose summed sites exceed a threshold, computed live from the CSV.
    CitiesAbove(ThresholdArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ThresholdArgs {
    /// City threshold (strictly greater than). Defaults to `analysis.default_threshold`.
    #[arg(long)]
    pub threshold: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct LogArgs {
    /// Batch id, e.g. 20261016_142530_123456-a3f8b2c1.
    pub batch_id: String,
}

#[derive(Clone, Debug, Args)]
pub struct SitesArgs {
    /// Only sites from this batch.
    #[arg(long)]
    pub batch: Option<String>,

    /// Only sites in this region (case-insensitive, e.g. "greater accra").
    #[arg(long)]
    pub region: Option<String>,

    /// Only sites for this exact city name.
    #[arg(long)]
    pub city: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct InvalidArgs {
    /// Only rejected rows from this batch.
    #[arg(long)]
    pub batch: Option<String>,
}
