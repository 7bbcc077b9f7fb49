use std::io::Write;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tracing::info;
use tradevision_core::{MarketSummary, SeriesCache};

use crate::cli::{LiveArgs, OutputFormat};
use crate::error::CliError;
use crate::live::{self, LiveConfig, LiveReport, LiveUpdate};
use crate::output::{self, price, signed_pct};
use crate::session::DashboardSettings;

use super::{open_dashboard, unlisted_warning, CommandResult};

#[derive(Debug, Serialize)]
struct LiveResponseData<'a> {
    #[serde(flatten)]
    report: LiveReport,
    window: usize,
    summary: &'a MarketSummary,
}

pub async fn run<W: Write>(
    args: &LiveArgs,
    cache: SeriesCache,
    format: OutputFormat,
    out: &mut W,
) -> Result<CommandResult, CliError> {
    let settings = DashboardSettings::from_args(&args.generation, Some(&args.windows))?;
    let window = args.window.unwrap_or(settings.point_count);
    let mut dashboard = open_dashboard(&args.symbol, settings, cache).await?;

    let (stop_tx, stop_rx) = watch::channel(false);
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, stopping live simulation");
            let _ = stop_tx.send(true);
        }
    });

    let config = LiveConfig {
        ticks: args.ticks,
        tick_every: Duration::from_millis(args.tick_ms),
        window,
        reset_every: args.reset_every,
    };

    let report = live::run(&mut dashboard, config, stop_rx, |update| {
        output::emit_event(&mut *out, update, Some(tick_line(update)), format)
    })
    .await;
    ctrl_c.abort();
    let report = report?;

    let snapshot = dashboard.current();
    let data = serde_json::to_value(LiveResponseData {
        report,
        window,
        summary: &snapshot.summary,
    })?;

    let mut result = CommandResult::ok(data, dashboard.source_name());
    if report.cancelled {
        result = result.with_warning(format!(
            "live simulation cancelled after {}/{} ticks",
            report.ticks_completed, args.ticks
        ));
    }
    if let Some(warning) = unlisted_warning(dashboard.symbol()) {
        result = result.with_warning(warning);
    }
    Ok(result)
}

fn tick_line(update: &LiveUpdate) -> String {
    let line = format!(
        "[{}/{}] {} {} close={} ({}) rsi={:.1}",
        update.tick,
        update.of,
        update.bar.ts,
        update.summary.symbol,
        price(update.bar.close),
        signed_pct(update.summary.change_pct),
        update.rsi
    );
    if update.reset {
        format!("{line} [reset]")
    } else {
        line
    }
}
