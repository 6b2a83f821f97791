use galamsay_core::entities::AnalysisLog;
use galamsay_core::responses::LogsResponse;
use galamsay_db::DatabaseError;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::LogArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `galamsay latest`.
pub async fn handle_latest(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&latest(ctx).await?, flags.format)
}

/// Handle `galamsay logs`.
pub async fn handle_list(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&list(ctx, flags.limit).await?, flags.format)
}

/// Handle `galamsay log <batch_id>`.
pub async fn handle_get(
    args: &LogArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let log = ctx.service.require_log(&args.batch_id).await?;
    output(&log, flags.format)
}

pub async fn latest(ctx: &AppContext) -> anyhow::Result<AnalysisLog> {
    ctx.service.get_latest_log().await?.ok_or_else(|| {
        DatabaseError::NotFound {
            entity_type: "analysis_log".to_string(),
            id: "latest".to_string(),
        }
        .into()
    })
}

pub async fn list(ctx: &AppContext, limit: Option<u32>) -> anyhow::Result<LogsResponse> {
    let logs = ctx.service.get_all_logs(Some(ctx.limit(limit))).await?;
    Ok(LogsResponse {
        count: logs.len(),
        logs,
    })
}
