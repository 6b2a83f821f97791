use galamsay_core::entities::InvalidRow;
use galamsay_core::responses::AnalyzeResponse;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ThresholdArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `galamsay analyze`.
pub async fn handle(
    args: &ThresholdArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let response = run(args, ctx).await?;
    output(&response, flags.format)
}

pub async fn run(args: &ThresholdArgs, ctx: &AppContext) -> anyhow::Result<AnalyzeResponse> {
    let threshold = args
        .threshold
        .unwrap_or(ctx.config.analysis.default_threshold);

    let progress = Progress::spinner("Reading CSV...");
    let rows = match ctx.load_rows() {
        Ok(rows) => rows,
        Err(error) => {
            progress.finish_err("Failed to read CSV");
            return Err(error);
        }
    };

    progress.set_message(&format!("Analyzing {} rows...", rows.len()));
    let run = match ctx.service.run_analysis(&rows, threshold).await {
        Ok(run) => run,
        Err(error) => {
            progress.finish_err("Analysis failed");
            return Err(error.into());
        }
    };
    progress.finish_clear();

    tracing::info!(
        batch_id = %run.log.batch_id,
        total_sites = run.log.total_sites,
        invalid = run.log.invalid_records,
        "analysis stored"
    );

    Ok(AnalyzeResponse {
        log: run.log,
        invalid: run.invalid.into_iter().map(InvalidRow::from).collect(),
    })
}
