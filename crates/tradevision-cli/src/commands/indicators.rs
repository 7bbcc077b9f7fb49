use serde::Serialize;
use tradevision_core::{Bar, IndicatorParams, SeriesCache, Symbol};

use crate::cli::IndicatorsArgs;
use crate::error::CliError;
use crate::output::{price, Table};
use crate::session::DashboardSettings;

use super::{open_dashboard, unlisted_warning, CommandResult};

#[derive(Debug, Serialize)]
struct IndicatorRow<'a> {
    #[serde(flatten)]
    bar: &'a Bar,
    sma_short: f64,
    sma_long: f64,
    rsi: f64,
}

#[derive(Debug, Serialize)]
struct IndicatorsResponseData<'a> {
    symbol: &'a Symbol,
    seed: u64,
    params: IndicatorParams,
    rows: Vec<IndicatorRow<'a>>,
}

pub async fn run(args: &IndicatorsArgs, cache: SeriesCache) -> Result<CommandResult, CliError> {
    let settings = DashboardSettings::from_args(&args.generation, Some(&args.windows))?;
    let dashboard = open_dashboard(&args.symbol, settings, cache).await?;
    let snapshot = dashboard.current();
    let series = &snapshot.series;
    let indicators = &snapshot.indicators;

    let rows: Vec<IndicatorRow<'_>> = series
        .bars()
        .iter()
        .enumerate()
        .map(|(index, bar)| IndicatorRow {
            bar,
            sma_short: indicators.sma_short[index],
            sma_long: indicators.sma_long[index],
            rsi: indicators.rsi[index],
        })
        .collect();

    let mut table = Table::new(vec!["ts", "close", "sma_short", "sma_long", "rsi"]);
    for row in &rows {
        table.push_row(vec![
            row.bar.ts.to_string(),
            price(row.bar.close),
            price(row.sma_short),
            price(row.sma_long),
            format!("{:.1}", row.rsi),
        ]);
    }

    let params = dashboard.settings().params;
    let mut warnings = Vec::new();
    if params.long_window > series.len() {
        warnings.push(format!(
            "long window {} exceeds {} bars; values use a growing warm-up window",
            params.long_window,
            series.len()
        ));
    }
    warnings.extend(unlisted_warning(series.symbol()));

    let data = serde_json::to_value(IndicatorsResponseData {
        symbol: series.symbol(),
        seed: dashboard.seed(),
        params,
        rows,
    })?;

    let mut result = CommandResult::ok(data, dashboard.source_name())
        .with_table(table)
        .with_cache_hit(dashboard.cache_hit());
    for warning in warnings {
        result = result.with_warning(warning);
    }
    Ok(result)
}
