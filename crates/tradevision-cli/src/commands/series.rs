use serde::Serialize;
use tradevision_core::{Bar, Interval, SeriesCache, Symbol, UtcDateTime};

use crate::cli::{ChartTypeArg, SeriesArgs};
use crate::error::CliError;
use crate::output::{price, Table};
use crate::session::DashboardSettings;

use super::{open_dashboard, unlisted_warning, CommandResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
struct ChartPoint {
    ts: UtcDateTime,
    value: f64,
}

/// Series payload shaped for one chart type.
#[derive(Debug, Serialize)]
#[serde(tag = "chart_type", rename_all = "snake_case")]
enum ChartData<'a> {
    Candlestick { bars: &'a [Bar] },
    Line { points: Vec<ChartPoint> },
    Area { baseline: f64, points: Vec<ChartPoint> },
}

impl<'a> ChartData<'a> {
    fn shape(chart: ChartTypeArg, bars: &'a [Bar]) -> Self {
        match chart {
            ChartTypeArg::Candlestick => Self::Candlestick { bars },
            ChartTypeArg::Line => Self::Line {
                points: close_points(bars),
            },
            ChartTypeArg::Area => Self::Area {
                baseline: bars.iter().map(|bar| bar.low).fold(f64::INFINITY, f64::min),
                points: close_points(bars),
            },
        }
    }

    fn table(&self) -> Table {
        match self {
            Self::Candlestick { bars } => bars_table(bars),
            Self::Line { points } => {
                let mut table = Table::new(vec!["ts", "close"]);
                for point in points {
                    table.push_row(vec![point.ts.to_string(), price(point.value)]);
                }
                table
            }
            Self::Area { baseline, points } => {
                let mut table = Table::new(vec!["ts", "close", "fill"]);
                for point in points {
                    table.push_row(vec![
                        point.ts.to_string(),
                        price(point.value),
                        price(point.value - baseline),
                    ]);
                }
                table
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct SeriesResponseData<'a> {
    symbol: &'a Symbol,
    interval: Interval,
    seed: u64,
    #[serde(flatten)]
    chart: &'a ChartData<'a>,
}

pub async fn run(args: &SeriesArgs, cache: SeriesCache) -> Result<CommandResult, CliError> {
    let settings = DashboardSettings::from_args(&args.generation, None)?;
    let dashboard = open_dashboard(&args.symbol, settings, cache).await?;
    let snapshot = dashboard.current();
    let series = &snapshot.series;
    let chart = ChartData::shape(args.chart, series.bars());

    let data = serde_json::to_value(SeriesResponseData {
        symbol: series.symbol(),
        interval: series.interval(),
        seed: dashboard.seed(),
        chart: &chart,
    })?;

    let mut result = CommandResult::ok(data, dashboard.source_name())
        .with_table(chart.table())
        .with_cache_hit(dashboard.cache_hit());
    if let Some(warning) = unlisted_warning(series.symbol()) {
        result = result.with_warning(warning);
    }
    Ok(result)
}

fn close_points(bars: &[Bar]) -> Vec<ChartPoint> {
    bars.iter()
        .map(|bar| ChartPoint {
            ts: bar.ts,
            value: bar.close,
        })
        .collect()
}

fn bars_table(bars: &[Bar]) -> Table {
    let mut table = Table::new(vec!["ts", "open", "high", "low", "close", "volume", ""]);
    for bar in bars {
        let marker = if bar.is_bullish() { "▲" } else { "▼" };
        table.push_row(vec![
            bar.ts.to_string(),
            price(bar.open),
            price(bar.high),
            price(bar.low),
            price(bar.close),
            bar.volume.to_string(),
            marker.to_owned(),
        ]);
    }
    table
}
