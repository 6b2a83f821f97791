use galamsay_core::enums::Region;
use galamsay_core::responses::SitesResponse;
use galamsay_db::SiteFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SitesArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `galamsay sites`.
pub async fn handle(
    args: &SitesArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    output(&run(args, ctx, flags.limit).await?, flags.format)
}

pub async fn run(
    args: &SitesArgs,
    ctx: &AppContext,
    limit: Option<u32>,
) -> anyhow::Result<SitesResponse> {
    let region = args
        .region
        .as_deref()
        .map(str::parse::<Region>)
        .transpose()?;

    let filter = SiteFilter {
        batch_id: args.batch.clone(),
        region,
        city: args.city.clone(),
        limit: Some(ctx.limit(limit)),
    };
    let sites = ctx.service.get_sites(&filter).await?;
    Ok(SitesResponse {
        count: sites.len(),
        sites,
    })
}
