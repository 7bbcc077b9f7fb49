//! Rolling display indicators over closing prices.
//!
//! Every rolling value uses a growing window during warm-up: index `i`
//! averages the trailing `min(window, i + 1)` entries. Outputs therefore
//! always have the same length as the input and never contain NaN.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::require_positive;
use crate::{CoreError, Series};

/// RSI reported when a window holds no price movement at all.
pub const NEUTRAL_RSI: f64 = 50.0;

/// Window sizes for [`compute_indicators`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndicatorParams {
    pub short_window: usize,
    pub long_window: usize,
    pub rsi_period: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            short_window: 20,
            long_window: 50,
            rsi_period: 14,
        }
    }
}

impl IndicatorParams {
    pub fn new(
        short_window: usize,
        long_window: usize,
        rsi_period: usize,
    ) -> Result<Self, CoreError> {
        let params = Self {
            short_window,
            long_window,
            rsi_period,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        require_positive("short_window", self.short_window)?;
        require_positive("long_window", self.long_window)?;
        require_positive("rsi_period", self.rsi_period)?;
        Ok(())
    }
}

/// Indicator values aligned index-for-index with a [`Series`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub params: IndicatorParams,
    pub sma_short: Vec<f64>,
    pub sma_long: Vec<f64>,
    pub rsi: Vec<f64>,
}

impl IndicatorSet {
    pub fn len(&self) -> usize {
        self.rsi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rsi.is_empty()
    }

    /// `(sma_short, sma_long, rsi)` at the last index.
    pub fn latest(&self) -> Option<(f64, f64, f64)> {
        Some((
            *self.sma_short.last()?,
            *self.sma_long.last()?,
            *self.rsi.last()?,
        ))
    }
}

/// Compute SMA short/long and RSI for `series`.
pub fn compute_indicators(
    series: &Series,
    short_window: usize,
    long_window: usize,
    rsi_period: usize,
) -> Result<IndicatorSet, CoreError> {
    let params = IndicatorParams::new(short_window, long_window, rsi_period)?;
    compute_with(series, params)
}

/// Same as [`compute_indicators`] with a prebuilt parameter set.
pub fn compute_with(series: &Series, params: IndicatorParams) -> Result<IndicatorSet, CoreError> {
    params.validate()?;
    let closes = series.closes();

    debug!(
        symbol = %series.symbol(),
        bars = closes.len(),
        short_window = params.short_window,
        long_window = params.long_window,
        rsi_period = params.rsi_period,
        "computing indicators"
    );

    Ok(IndicatorSet {
        params,
        sma_short: sma(&closes, params.short_window)?,
        sma_long: sma(&closes, params.long_window)?,
        rsi: rsi(&closes, params.rsi_period)?,
    })
}

/// Trailing simple moving average with a growing warm-up window.
pub fn sma(values: &[f64], window: usize) -> Result<Vec<f64>, CoreError> {
    require_positive("window", window)?;
    Ok(rolling_mean(values, window))
}

/// Relative Strength Index over `period` moves.
///
/// The first move is defined as zero. A window with gains and no losses
/// reports 100, one with neither reports [`NEUTRAL_RSI`].
pub fn rsi(closes: &[f64], period: usize) -> Result<Vec<f64>, CoreError> {
    require_positive("period", period)?;

    let mut gains = Vec::with_capacity(closes.len());
    let mut losses = Vec::with_capacity(closes.len());
    let mut previous = closes.first().copied();
    for &close in closes {
        let change = previous.map_or(0.0, |prev| close - prev);
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
        previous = Some(close);
    }

    let mean_gains = rolling_mean(&gains, period);
    let mean_losses = rolling_mean(&losses, period);

    Ok(mean_gains
        .into_iter()
        .zip(mean_losses)
        .map(|(gain, loss)| rsi_value(gain, loss))
        .collect())
}

fn rsi_value(mean_gain: f64, mean_loss: f64) -> f64 {
    if mean_loss == 0.0 {
        return if mean_gain == 0.0 { NEUTRAL_RSI } else { 100.0 };
    }
    let rs = mean_gain / mean_loss;
    (100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0)
}

fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    (0..values.len())
        .map(|index| {
            let start = (index + 1).saturating_sub(window);
            let slice = &values[start..=index];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (index, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!((a - e).abs() < 1e-9, "index {index}: {a} != {e}");
        }
    }

    #[test]
    fn sma_uses_growing_window_during_warm_up() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let out = sma(&values, 3).expect("sma");
        assert_close(&out, &[1.0, 1.5, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn sma_window_of_one_is_identity() {
        let values = [3.0, 1.0, 4.0];
        assert_close(&sma(&values, 1).expect("sma"), &values);
    }

    #[test]
    fn zero_windows_are_rejected() {
        assert!(sma(&[1.0], 0).expect_err("must fail").is_invalid_argument());
        assert!(rsi(&[1.0], 0).expect_err("must fail").is_invalid_argument());
        assert!(IndicatorParams::new(20, 0, 14)
            .expect_err("must fail")
            .is_invalid_argument());
    }

    #[test]
    fn rsi_saturates_for_monotonic_moves() {
        let rising: Vec<f64> = (1..=30).map(f64::from).collect();
        let falling: Vec<f64> = rising.iter().rev().copied().collect();

        let up = rsi(&rising, 14).expect("rsi");
        let down = rsi(&falling, 14).expect("rsi");

        assert_eq!(up[0], NEUTRAL_RSI);
        assert!(up[1..].iter().all(|value| *value == 100.0));
        assert!(down[1..].iter().all(|value| *value == 0.0));
    }

    #[test]
    fn rsi_is_neutral_for_flat_prices() {
        let flat = vec![42.0; 25];
        assert!(rsi(&flat, 14).expect("rsi").iter().all(|v| *v == NEUTRAL_RSI));
    }

    #[test]
    fn rsi_matches_hand_computed_value() {
        // moves: 0, +2, -1, +1 -> period 3 window at index 3: gains 3/3, losses 1/3
        let closes = [10.0, 12.0, 11.0, 12.0];
        let out = rsi(&closes, 3).expect("rsi");
        assert!((out[3] - 75.0).abs() < 1e-9);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(sma(&[], 5).expect("sma").is_empty());
        assert!(rsi(&[], 5).expect("rsi").is_empty());
    }
}
