use galamsay_core::entities::InvalidRow;
use galamsay_core::responses::InvalidResponse;
use galamsay_db::InvalidFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InvalidArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `galamsay invalid`.
pub async fn handle(
    args: &InvalidArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    output(&run(args, ctx, flags.limit).await?, flags.format)
}

pub async fn run(
    args: &InvalidArgs,
    ctx: &AppContext,
    limit: Option<u32>,
) -> anyhow::Result<InvalidResponse> {
    let filter = InvalidFilter {
        batch_id: args.batch.clone(),
        limit: Some(ctx.limit(limit)),
    };
    let records: Vec<InvalidRow> = ctx
        .service
        .get_invalid(&filter)
        .await?
        .into_iter()
        .map(InvalidRow::from)
        .collect();
    Ok(InvalidResponse {
        count: records.len(),
        records,
    })
}

#[cfg(test)]
mod tests {
    use galamsay_core::entities::RawRow;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::context::test_support::in_memory;

    #[tokio::test]
    async fn rejected_rows_carry_their_message() {
        let ctx = in_memory("unused.csv").await;
        let rows = vec![
            RawRow::new(1, Some("Tamale"), Some("Northern"), Some("-3")),
            RawRow::new(2, Some("Ho"), Some("Lagos"), Some("4")),
            RawRow::new(3, Some("Kumasi"), Some("Ashanti"), Some("12")),
        ];
        let run_result = ctx.service.run_analysis(&rows, 10).await.unwrap();

        let response = run(
            &InvalidArgs {
                batch: Some(run_result.log.batch_id.clone()),
            },
            &ctx,
            None,
        )
        .await
        .unwrap();

        let messages: Vec<&str> = response.records.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["Negative site count: -3", "Invalid region: Lagos"]
        );
        assert_eq!(response.count, 2);

        let capped = run(&InvalidArgs { batch: None }, &ctx, Some(1)).await.unwrap();
        assert_eq!(capped.count, 1);
        assert_eq!(capped.records[0].record.row_number, 1);
    }
}
