//! Live simulation loop.
//!
//! Ticks on a tokio interval, appending one synthetic bar per tick through
//! [`Dashboard::tick`]. The loop checks a `watch` stop signal between ticks;
//! setting it to `true` or dropping the sender ends the run at the next tick
//! boundary.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};
use tradevision_core::{Bar, MarketSummary, SeriesSource};

use crate::error::CliError;
use crate::session::Dashboard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveConfig {
    pub ticks: u32,
    pub tick_every: Duration,
    pub window: usize,
    /// Regenerate the chart before every N-th tick.
    pub reset_every: Option<u32>,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            ticks: 50,
            tick_every: Duration::from_millis(300),
            window: 200,
            reset_every: None,
        }
    }
}

/// One emitted tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveUpdate {
    pub tick: u32,
    pub of: u32,
    pub bar: Bar,
    /// The chart was reset right before this tick.
    pub reset: bool,
    pub summary: MarketSummary,
    pub sma_short: f64,
    pub sma_long: f64,
    pub rsi: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LiveReport {
    pub ticks_completed: u32,
    pub resets: u32,
    pub cancelled: bool,
}

/// Drive `dashboard` for `config.ticks` ticks, calling `on_update` after each.
pub async fn run<S, F>(
    dashboard: &mut Dashboard<S>,
    config: LiveConfig,
    mut stop: watch::Receiver<bool>,
    mut on_update: F,
) -> Result<LiveReport, CliError>
where
    S: SeriesSource,
    F: FnMut(&LiveUpdate) -> Result<(), CliError>,
{
    if config.tick_every.is_zero() {
        return Err(CliError::Command(String::from(
            "tick interval must be greater than zero",
        )));
    }

    let mut interval = tokio::time::interval(config.tick_every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick of a tokio interval completes immediately.
    interval.tick().await;

    info!(
        symbol = %dashboard.symbol(),
        ticks = config.ticks,
        tick_ms = config.tick_every.as_millis() as u64,
        window = config.window,
        "live simulation started"
    );

    let mut completed = 0;
    let mut resets = 0;
    let mut cancelled = *stop.borrow();

    while !cancelled && completed < config.ticks {
        let reset = match config.reset_every {
            Some(every) => completed > 0 && completed % every == 0,
            None => false,
        };
        if reset {
            dashboard.refresh().await?;
            resets += 1;
            info!(symbol = %dashboard.symbol(), after = completed, "chart reset");
        }

        let snapshot = dashboard.tick(config.window).await?;
        completed += 1;

        let (sma_short, sma_long, rsi) = snapshot.indicators.latest().unwrap_or_default();
        let update = LiveUpdate {
            tick: completed,
            of: config.ticks,
            bar: snapshot.series.last().clone(),
            reset,
            summary: snapshot.summary.clone(),
            sma_short,
            sma_long,
            rsi,
        };
        on_update(&update)?;

        if completed == config.ticks {
            break;
        }

        tokio::select! {
            biased;
            changed = stop.changed() => {
                cancelled = changed.is_err() || *stop.borrow();
            }
            _ = interval.tick() => {}
        }
    }

    if cancelled {
        warn!(completed, "live simulation cancelled");
    } else {
        info!(completed, total_ticks = dashboard.ticks(), "live simulation finished");
    }

    Ok(LiveReport {
        ticks_completed: completed,
        resets,
        cancelled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::DashboardSettings;
    use tradevision_core::{SeriesCache, Symbol, SyntheticSource, UtcDateTime};

    async fn dashboard() -> Dashboard<SyntheticSource> {
        let settings = DashboardSettings {
            point_count: 40,
            seed: Some(5),
            end: Some(UtcDateTime::parse("2024-01-01T00:00:00Z").expect("ts")),
            ..DashboardSettings::default()
        };
        Dashboard::open(
            SyntheticSource,
            SeriesCache::new(),
            settings,
            Symbol::parse("NVDA").expect("symbol"),
        )
        .await
        .expect("opens")
    }

    fn config(ticks: u32) -> LiveConfig {
        LiveConfig {
            ticks,
            tick_every: Duration::from_millis(10),
            window: 40,
            reset_every: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn runs_requested_number_of_ticks() {
        let mut dashboard = dashboard().await;
        let (_tx, rx) = watch::channel(false);
        let mut updates = Vec::new();

        let report = run(&mut dashboard, config(5), rx, |update| {
            updates.push(update.clone());
            Ok(())
        })
        .await
        .expect("runs");

        assert_eq!(
            report,
            LiveReport {
                ticks_completed: 5,
                resets: 0,
                cancelled: false,
            }
        );
        assert_eq!(updates.len(), 5);
        assert_eq!(updates[4].tick, 5);
        for pair in updates.windows(2) {
            assert_eq!(pair[1].bar.open, pair[0].bar.close);
        }
        assert_eq!(dashboard.current().series.len(), 40);
        assert!(updates.iter().all(|u| (0.0..=100.0).contains(&u.rsi)));
    }

    #[tokio::test(start_paused = true)]
    async fn stop_signal_cancels_at_tick_boundary() {
        let mut dashboard = dashboard().await;
        let (tx, rx) = watch::channel(false);
        let mut seen = 0;

        let report = run(&mut dashboard, config(50), rx, |update| {
            seen += 1;
            if update.tick == 3 {
                tx.send(true).expect("receiver alive");
            }
            Ok(())
        })
        .await
        .expect("runs");

        assert!(report.cancelled);
        assert_eq!(report.ticks_completed, 3);
        assert_eq!(seen, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn already_stopped_signal_runs_no_ticks() {
        let mut dashboard = dashboard().await;
        let (_tx, rx) = watch::channel(true);

        let report = run(&mut dashboard, config(10), rx, |_| Ok(()))
            .await
            .expect("runs");

        assert_eq!(
            report,
            LiveReport {
                ticks_completed: 0,
                resets: 0,
                cancelled: true,
            }
        );
        assert_eq!(dashboard.ticks(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn callback_errors_abort_the_loop() {
        let mut dashboard = dashboard().await;
        let (_tx, rx) = watch::channel(false);

        let err = run(&mut dashboard, config(10), rx, |_| {
            Err(CliError::Command(String::from("sink closed")))
        })
        .await
        .expect_err("must fail");

        assert!(matches!(err, CliError::Command(_)));
        assert_eq!(dashboard.ticks(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_tick_interval_is_rejected() {
        let mut dashboard = dashboard().await;
        let (_tx, rx) = watch::channel(false);
        let config = LiveConfig {
            tick_every: Duration::ZERO,
            ..config(2)
        };

        let err = run(&mut dashboard, config, rx, |_| Ok(()))
            .await
            .expect_err("must fail");

        assert!(matches!(err, CliError::Command(_)));
        assert_eq!(err.exit_code(), 2);
        assert_eq!(dashboard.ticks(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_every_regenerates_the_chart() {
        let mut dashboard = dashboard().await;
        let opened = dashboard.current();
        let (_tx, rx) = watch::channel(false);
        let config = LiveConfig {
            reset_every: Some(2),
            ..config(5)
        };
        let mut updates = Vec::new();

        let report = run(&mut dashboard, config, rx, |update| {
            updates.push(update.clone());
            Ok(())
        })
        .await
        .expect("runs");

        assert_eq!(report.ticks_completed, 5);
        assert_eq!(report.resets, 2);
        let resets: Vec<bool> = updates.iter().map(|u| u.reset).collect();
        assert_eq!(resets, [false, false, true, false, true]);

        // A reset replays the seeded history, so the first bar after it repeats.
        assert_eq!(updates[2].bar, updates[0].bar);
        assert_eq!(updates[4].bar, updates[0].bar);
        assert_eq!(updates[2].bar.open, opened.series.last().close);
        assert_eq!(dashboard.ticks(), 1);
    }
}
