use serde::Serialize;
use tradevision_core::catalog;
use tradevision_core::{MarketSummary, SeriesCache};

use crate::cli::IndicatorsArgs;
use crate::error::CliError;
use crate::output::{price, signed_pct, Table};
use crate::session::DashboardSettings;

use super::{open_dashboard, unlisted_warning, CommandResult};

#[derive(Debug, Serialize)]
struct SummaryResponseData<'a> {
    name: String,
    summary: &'a MarketSummary,
    sma_short: f64,
    sma_long: f64,
    rsi: f64,
}

pub async fn run(args: &IndicatorsArgs, cache: SeriesCache) -> Result<CommandResult, CliError> {
    let settings = DashboardSettings::from_args(&args.generation, Some(&args.windows))?;
    let dashboard = open_dashboard(&args.symbol, settings, cache).await?;
    let snapshot = dashboard.current();
    let summary = &snapshot.summary;
    let (sma_short, sma_long, rsi) = snapshot.indicators.latest().unwrap_or_default();
    let name = catalog::profile(&summary.symbol).name;

    let mut table = Table::new(vec!["metric", "value"]);
    for (metric, value) in [
        ("symbol", format!("{} - {name}", summary.symbol)),
        ("current price", price(summary.last)),
        ("change", signed_pct(summary.change_pct)),
        ("high", price(summary.high)),
        ("low", price(summary.low)),
        ("volume", summary.volume.to_string()),
        ("sma short", price(sma_short)),
        ("sma long", price(sma_long)),
        ("rsi", format!("{rsi:.1}")),
    ] {
        table.push_row(vec![metric.to_owned(), value]);
    }

    let data = serde_json::to_value(SummaryResponseData {
        name,
        summary,
        sma_short,
        sma_long,
        rsi,
    })?;

    let mut result = CommandResult::ok(data, dashboard.source_name())
        .with_table(table)
        .with_cache_hit(dashboard.cache_hit());
    if let Some(warning) = unlisted_warning(&summary.symbol) {
        result = result.with_warning(warning);
    }
    Ok(result)
}
