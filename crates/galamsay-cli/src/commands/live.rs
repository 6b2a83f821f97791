//! Headline statistics: read from the latest stored batch, or computed live
//! from the CSV when the store has no batches yet.

use galamsay_config::GalamsayConfig;
use galamsay_core::aggregator::{Summary, city_totals_above};
use galamsay_core::entities::AnalysisLog;
use galamsay_core::responses::{
    AveragesResponse, CitiesAboveResponse, HighestRegionResponse, TotalResponse,
};
use galamsay_core::validator::validate_all;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ThresholdArgs;
use crate::context::{AppContext, read_csv};
use crate::output::output;

/// Handle `galamsay total`.
pub async fn handle_total(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response =
        latest_or_live(ctx, TotalResponse::from_log, TotalResponse::from_summary).await?;
    output(&response, flags.format)
}

/// Handle `galamsay highest-region`.
pub async fn handle_highest_region(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = latest_or_live(
        ctx,
        HighestRegionResponse::from_log,
        HighestRegionResponse::from_summary,
    )
    .await?;
    output(&response, flags.format)
}

/// Handle `galamsay averages`.
pub async fn handle_averages(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = latest_or_live(
        ctx,
        AveragesResponse::from_log,
        AveragesResponse::from_summary,
    )
    .await?;
    output(&response, flags.format)
}

/// Handle `galamsay cities-above`. Runs without opening the store.
pub fn handle_cities_above(
    args: &ThresholdArgs,
    config: &GalamsayConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    output(&cities_above(args, config)?, flags.format)
}

pub async fn latest_or_live<T>(
    ctx: &AppContext,
    from_log: impl FnOnce(&AnalysisLog) -> T,
    from_summary: impl FnOnce(&Summary) -> T,
) -> anyhow::Result<T> {
    if let Some(log) = ctx.service.get_latest_log().await? {
        tracing::debug!(batch_id = %log.batch_id, "statistic read from latest batch");
        return Ok(from_log(&log));
    }

    tracing::debug!("store has no batches; calculating from csv");
    let summary = ctx.live_summary(ctx.config.analysis.default_threshold)?;
    Ok(from_summary(&summary))
}

pub fn cities_above(
    args: &ThresholdArgs,
    config: &GalamsayConfig,
) -> anyhow::Result<CitiesAboveResponse> {
    let threshold = args
        .threshold
        .unwrap_or(config.analysis.default_threshold);
    let rows = read_csv(config)?;
    let validated = validate_all(&rows);
    let cities = city_totals_above(&validated.valid, threshold);
    Ok(CitiesAboveResponse {
        threshold,
        count: cities.len(),
        cities,
    })
}

#[cfg(test)]
mod tests {
    use galamsay_core::aggregator::CityTotal;
    use galamsay_core::entities::RawRow;
    use galamsay_core::enums::Region;
    use galamsay_core::responses::StatSource;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::context::test_support::{SCENARIO_CSV, config_for, in_memory, write_csv};

    #[tokio::test]
    async fn empty_store_falls_back_to_live_calculation() {
        let (_dir, csv) = write_csv(SCENARIO_CSV);
        let ctx = in_memory(&csv).await;

        let total = latest_or_live(&ctx, TotalResponse::from_log, TotalResponse::from_summary)
            .await
            .unwrap();
        assert_eq!(total.total_sites, 35);
        assert_eq!(total.source, StatSource::LiveCalculation);
        assert!(total.batch_id.is_none());

        let highest = latest_or_live(
            &ctx,
            HighestRegionResponse::from_log,
            HighestRegionResponse::from_summary,
        )
        .await
        .unwrap();
        assert_eq!(highest.region, Some(Region::Ashanti));
        assert_eq!(highest.total_sites, 25);
    }

    #[tokio::test]
    async fn stored_batch_wins_over_csv() {
        let (_dir, csv) = write_csv(SCENARIO_CSV);
        let ctx = in_memory(&csv).await;
        let rows = vec![RawRow::new(1, Some("Ho"), Some("Volta"), Some("7"))];
        let run = ctx.service.run_analysis(&rows, 10).await.unwrap();

        let averages = latest_or_live(
            &ctx,
            AveragesResponse::from_log,
            AveragesResponse::from_summary,
        )
        .await
        .unwrap();
        assert_eq!(averages.source, StatSource::Database);
        assert_eq!(averages.batch_id.as_deref(), Some(run.log.batch_id.as_str()));
        assert!((averages.average_per_region - 7.0).abs() < f64::EPSILON);
        assert_eq!(averages.region_summaries.len(), 1);
    }

    #[test]
    fn cities_above_sums_per_city() {
        let (_dir, csv) = write_csv(
            "City,Region,Number_of_Galamsay_Sites\n\
             Tarkwa,Western,8\n\
             Tarkwa,Western,8\n\
             Accra,Greater Accra,10\n\
             Kumasi,Ashanti,600\n",
        );
        let config = config_for(&csv);

        let response = cities_above(&ThresholdArgs { threshold: None }, &config).unwrap();
        assert_eq!(response.threshold, 10);
        // Kumasi's only row is an outlier and never counts.
        assert_eq!(
            response.cities,
            vec![CityTotal {
                city: "Tarkwa".into(),
                total_sites: 16,
            }]
        );
        assert_eq!(response.count, 1);
    }

    #[test]
    fn cities_above_honors_explicit_threshold() {
        let (_dir, csv) = write_csv(SCENARIO_CSV);
        let config = config_for(&csv);
        let response = cities_above(&ThresholdArgs { threshold: Some(0) }, &config).unwrap();
        let names: Vec<&str> = response.cities.iter().map(|c| c.city.as_str()).collect();
        assert_eq!(names, vec!["Accra", "Kumasi"]);
    }
}
