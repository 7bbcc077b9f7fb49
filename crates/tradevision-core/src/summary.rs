//! Headline metrics for the latest bar of a series.

use serde::{Deserialize, Serialize};

use crate::{Series, Symbol, UtcDateTime};

/// Price, change and range figures shown above the chart and in the
/// watchlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSummary {
    pub symbol: Symbol,
    pub as_of: UtcDateTime,
    pub last: f64,
    pub previous_close: f64,
    pub change: f64,
    pub change_pct: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
}

impl MarketSummary {
    /// Summarize the last bar. A one-bar series compares against its open.
    pub fn from_series(series: &Series) -> Self {
        let last = series.last();
        let bars = series.bars();
        let previous_close = if bars.len() > 1 {
            bars[bars.len() - 2].close
        } else {
            last.open
        };

        let change = last.close - previous_close;

        Self {
            symbol: series.symbol().clone(),
            as_of: last.ts,
            last: last.close,
            previous_close,
            change,
            change_pct: change / previous_close * 100.0,
            high: last.high,
            low: last.low,
            volume: last.volume,
        }
    }

    pub fn is_up(&self) -> bool {
        self.change >= 0.0
    }
}
