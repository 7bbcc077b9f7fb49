//! Everything the dashboard renders for one symbol at one moment.

use serde::{Deserialize, Serialize};

use crate::indicators::compute_with;
use crate::{CoreError, IndicatorParams, IndicatorSet, MarketSummary, Series};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub series: Series,
    pub indicators: IndicatorSet,
    pub summary: MarketSummary,
}

impl ChartSnapshot {
    pub fn build(series: Series, params: IndicatorParams) -> Result<Self, CoreError> {
        let indicators = compute_with(&series, params)?;
        let summary = MarketSummary::from_series(&series);
        Ok(Self {
            series,
            indicators,
            summary,
        })
    }
}
