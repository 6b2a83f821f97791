use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Analyze(args) => commands::analyze::handle(&args, ctx, flags).await,
        Commands::Latest => commands::logs::handle_latest(ctx, flags).await,
        Commands::Logs => commands::logs::handle_list(ctx, flags).await,
        Commands::Log(args) => commands::logs::handle_get(&args, ctx, flags).await,
        Commands::Sites(args) => commands::sites::handle(&args, ctx, flags).await,
        Commands::Invalid(args) => commands::invalid::handle(&args, ctx, flags).await,
        Commands::Stats => commands::stats::handle(ctx, flags).await,
        Commands::Total => commands::live::handle_total(ctx, flags).await,
        Commands::HighestRegion => commands::live::handle_highest_region(ctx, flags).await,
        Commands::Averages => commands::live::handle_averages(ctx, flags).await,
        Commands::CitiesAbove(_) => {
            unreachable!("cities-above is pre-dispatched in main")
        }
    }
}
