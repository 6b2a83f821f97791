use galamsay_config::GalamsayConfig;

use crate::cli::GlobalFlags;

/// Load layered config, then apply `--csv` / `--db` on top.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<GalamsayConfig> {
    let config = GalamsayConfig::load_with_dotenv()?;
    apply_overrides(config, flags)
}

fn apply_overrides(
    mut config: GalamsayConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<GalamsayConfig> {
    if let Some(csv) = &flags.csv {
        config.data.csv_path.clone_from(csv);
    }
    if let Some(db) = &flags.db {
        config.database.path.clone_from(db);
    }
    config.validate()?;
    tracing::debug!(
        csv = %config.data.csv_path,
        db = %config.database.path,
        "resolved configuration"
    );
    Ok(config)
}
