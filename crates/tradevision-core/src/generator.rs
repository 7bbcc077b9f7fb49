//! Synthetic OHLCV generation.
//!
//! Prices follow a geometric random walk around the catalog base price:
//! `close[i] = base * exp(sum(returns[..=i]))`, so they stay positive
//! without clamping. Each bar opens at the previous close and its high/low
//! are pushed outward from the body by a small random fraction.

use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use tracing::{debug, trace};

use crate::catalog;
use crate::error::require_positive;
use crate::{Bar, CoreError, Interval, Series, Symbol, UtcDateTime, ValidationError};

/// Fractional range used to push high/low outside the open/close body.
const WICK_RANGE: Range<f64> = 0.001..0.003;
/// Volume range for historical bars.
const VOLUME_RANGE: Range<u64> = 1_000..100_000;
/// Volume range for live ticks.
const LIVE_VOLUME_RANGE: Range<u64> = 1_000..50_000;

/// Parameters for one synthetic series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesRequest {
    pub symbol: Symbol,
    pub point_count: usize,
    pub seed: Option<u64>,
    pub interval: Interval,
    pub end: Option<UtcDateTime>,
}

impl SeriesRequest {
    pub fn new(symbol: Symbol, point_count: usize) -> Result<Self, CoreError> {
        require_positive("point_count", point_count)?;
        Ok(Self {
            symbol,
            point_count,
            seed: None,
            interval: Interval::default(),
            end: None,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }

    /// Pin the timestamp of the last bar. Defaults to the current time.
    pub fn with_end(mut self, end: UtcDateTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Explicit seed, or the portable symbol seed when none was given.
    pub fn resolved_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| self.symbol.seed())
    }

    pub fn generate(&self) -> Result<Series, CoreError> {
        require_positive("point_count", self.point_count)?;

        let profile = catalog::profile(&self.symbol);
        let sigma = profile.volatility.per_bar_sigma();
        let seed = self.resolved_seed();
        let end = self.end.unwrap_or_else(UtcDateTime::now);
        let mut timestamp = first_timestamp(end, self.interval, self.point_count)?;
        let mut rng = StdRng::seed_from_u64(seed);

        debug!(
            symbol = %self.symbol,
            point_count = self.point_count,
            seed,
            interval = %self.interval,
            base_price = profile.base_price,
            "generating synthetic series"
        );

        let mut bars = Vec::with_capacity(self.point_count);
        let mut log_return = 0.0_f64;
        let mut open = profile.base_price;

        for index in 0..self.point_count {
            if index > 0 {
                timestamp = timestamp.checked_add(self.interval.duration())?;
            }

            let step: f64 = rng.sample(StandardNormal);
            log_return += sigma * step;
            let close = profile.base_price * log_return.exp();

            let bar = synth_bar(&mut rng, timestamp, open, close, VOLUME_RANGE)?;
            open = bar.close;
            bars.push(bar);
        }

        Ok(Series::new(self.symbol.clone(), self.interval, bars)?)
    }
}

/// Generate `point_count` one-minute bars ending now.
///
/// Identical `(symbol, point_count, seed)` arguments yield identical prices.
pub fn generate_series(
    symbol: &Symbol,
    point_count: usize,
    seed: Option<u64>,
) -> Result<Series, CoreError> {
    let mut request = SeriesRequest::new(symbol.clone(), point_count)?;
    request.seed = seed;
    request.generate()
}

/// Build the next live bar after the last bar of `series`.
///
/// The bar opens at the previous close, moves by one fresh return draw and
/// is stamped one interval later. Evicting the oldest bar is left to the
/// caller (see [`Series::advance`]).
pub fn append_live_bar(series: &Series, seed: u64) -> Result<Bar, CoreError> {
    let last = series.last();
    let sigma = catalog::profile(series.symbol())
        .volatility
        .per_bar_sigma();
    let mut rng = StdRng::seed_from_u64(seed);

    let step: f64 = rng.sample(StandardNormal);
    let close = last.close * (sigma * step).exp();
    let ts = last.ts.checked_add(series.interval().duration())?;
    let bar = synth_bar(&mut rng, ts, last.close, close, LIVE_VOLUME_RANGE)?;

    trace!(symbol = %series.symbol(), ts = %bar.ts, close = bar.close, "live bar");
    Ok(bar)
}

fn first_timestamp(
    end: UtcDateTime,
    interval: Interval,
    point_count: usize,
) -> Result<UtcDateTime, CoreError> {
    let steps = i32::try_from(point_count - 1)
        .map_err(|_| CoreError::invalid_argument("point_count", "too many bars"))?;
    let span = interval
        .duration()
        .checked_mul(steps)
        .ok_or(ValidationError::TimestampOutOfRange)?;
    Ok(end.checked_sub(span)?)
}

fn synth_bar(
    rng: &mut StdRng,
    ts: UtcDateTime,
    open: f64,
    close: f64,
    volume: Range<u64>,
) -> Result<Bar, ValidationError> {
    let high = open.max(close) * (1.0 + rng.random_range(WICK_RANGE));
    let low = open.min(close) * (1.0 - rng.random_range(WICK_RANGE));
    let volume = rng.random_range(volume);
    Bar::new(ts, open, high, low, close, volume)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn end() -> UtcDateTime {
        UtcDateTime::parse("2024-03-01T16:00:00Z").expect("timestamp")
    }

    fn request(symbol: &str, points: usize) -> SeriesRequest {
        SeriesRequest::new(Symbol::parse(symbol).expect("symbol"), points)
            .expect("request")
            .with_end(end())
    }

    #[test]
    fn rejects_zero_point_count() {
        let err = SeriesRequest::new(Symbol::parse("AAPL").expect("symbol"), 0)
            .expect_err("must fail");
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn produces_requested_length_ending_at_end() {
        let series = request("AAPL", 120).with_seed(7).generate().expect("series");
        assert_eq!(series.len(), 120);
        assert_eq!(series.last().ts, end());
        assert_eq!(
            series.first().ts,
            end().checked_sub(time::Duration::minutes(119)).expect("in range")
        );
    }

    #[test]
    fn single_bar_opens_at_base_price() {
        let series = request("MSFT", 1).generate().expect("series");
        assert_eq!(series.len(), 1);
        assert_eq!(series.first().open, 420.0);
    }

    #[test]
    fn opens_chain_from_previous_close() {
        let series = request("NVDA", 50).with_seed(3).generate().expect("series");
        for pair in series.bars().windows(2) {
            assert_eq!(pair[1].open, pair[0].close);
        }
    }

    #[test]
    fn explicit_seed_overrides_symbol_seed() {
        let a = request("AAPL", 20).with_seed(1).generate().expect("series");
        let b = request("AAPL", 20).with_seed(2).generate().expect("series");
        let c = request("AAPL", 20).with_seed(1).generate().expect("series");
        assert_ne!(a.closes(), b.closes());
        assert_eq!(a, c);
    }

    #[test]
    fn omitted_seed_uses_symbol_seed() {
        let implicit = request("TSLA", 30).generate().expect("series");
        let symbol = Symbol::parse("TSLA").expect("symbol");
        let explicit = request("TSLA", 30)
            .with_seed(symbol.seed())
            .generate()
            .expect("series");
        assert_eq!(implicit, explicit);
    }

    #[test]
    fn interval_controls_spacing() {
        let series = request("AAPL", 3)
            .with_interval(Interval::OneDay)
            .generate()
            .expect("series");
        let bars = series.bars();
        assert_eq!(
            bars[1].ts.unix_timestamp() - bars[0].ts.unix_timestamp(),
            86_400
        );
    }

    #[test]
    fn live_bar_continues_series() {
        let series = request("BTCUSD", 10).with_seed(11).generate().expect("series");
        let bar = append_live_bar(&series, 99).expect("live bar");
        assert_eq!(bar.open, series.last().close);
        assert_eq!(
            bar.ts,
            series.last().ts.checked_add(time::Duration::minutes(1)).expect("in range")
        );
        assert!(bar.volume < 50_000);
        assert_eq!(append_live_bar(&series, 99).expect("live bar"), bar);
    }
}
