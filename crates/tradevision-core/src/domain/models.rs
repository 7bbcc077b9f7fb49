use serde::{Deserialize, Serialize};

use crate::{Interval, Symbol, UtcDateTime, ValidationError};

/// OHLCV bar for one time step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBar")]
pub struct Bar {
    pub ts: UtcDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Bar {
    pub fn new(
        ts: UtcDateTime,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Result<Self, ValidationError> {
        validate_positive("open", open)?;
        validate_positive("high", high)?;
        validate_positive("low", low)?;
        validate_positive("close", close)?;

        if high < low {
            return Err(ValidationError::InvalidBarRange);
        }

        if open < low || open > high || close < low || close > high {
            return Err(ValidationError::InvalidBarBounds);
        }

        Ok(Self {
            ts,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// `true` when the bar closed at or above its open.
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

#[derive(Deserialize)]
struct RawBar {
    ts: UtcDateTime,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

impl TryFrom<RawBar> for Bar {
    type Error = ValidationError;

    fn try_from(raw: RawBar) -> Result<Self, Self::Error> {
        Self::new(raw.ts, raw.open, raw.high, raw.low, raw.close, raw.volume)
    }
}

/// Ordered, non-empty run of bars for one symbol.
///
/// A `Series` is never mutated after construction; the live window is moved
/// forward with [`Series::advance`], which returns a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSeries")]
pub struct Series {
    symbol: Symbol,
    interval: Interval,
    bars: Vec<Bar>,
}

impl Series {
    pub fn new(
        symbol: Symbol,
        interval: Interval,
        bars: Vec<Bar>,
    ) -> Result<Self, ValidationError> {
        if bars.is_empty() {
            return Err(ValidationError::EmptySeries);
        }

        if let Some(index) = bars.windows(2).position(|pair| pair[1].ts <= pair[0].ts) {
            return Err(ValidationError::UnorderedSeries { index: index + 1 });
        }

        Ok(Self {
            symbol,
            interval,
            bars,
        })
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first(&self) -> &Bar {
        &self.bars[0]
    }

    pub fn last(&self) -> &Bar {
        &self.bars[self.bars.len() - 1]
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    /// Append `bar` and drop the oldest bars so that at most `window` remain.
    ///
    /// A `window` of zero keeps only the new bar.
    pub fn advance(&self, bar: Bar, window: usize) -> Result<Self, ValidationError> {
        if bar.ts <= self.last().ts {
            return Err(ValidationError::UnorderedSeries { index: self.len() });
        }

        let keep = window.max(1);
        let total = self.len() + 1;
        let skip = total.saturating_sub(keep);

        let mut bars = Vec::with_capacity(total - skip);
        bars.extend(self.bars.iter().skip(skip).cloned());
        bars.push(bar);

        Ok(Self {
            symbol: self.symbol.clone(),
            interval: self.interval,
            bars,
        })
    }
}

#[derive(Deserialize)]
struct RawSeries {
    symbol: Symbol,
    interval: Interval,
    bars: Vec<Bar>,
}

impl TryFrom<RawSeries> for Series {
    type Error = ValidationError;

    fn try_from(raw: RawSeries) -> Result<Self, Self::Error> {
        Self::new(raw.symbol, raw.interval, raw.bars)
    }
}

fn validate_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveValue { field });
    }
    Ok(())
}
