use serde::Serialize;
use tradevision_core::catalog::{self, AssetClass};
use tradevision_core::{MarketSummary, SeriesCache, Symbol, SyntheticSource};

use crate::cli::WatchlistArgs;
use crate::error::CliError;
use crate::output::{price, signed_pct, Table};
use crate::session::{Dashboard, DashboardSettings};

use super::CommandResult;

#[derive(Debug, Serialize)]
struct WatchlistRow {
    name: String,
    asset_class: AssetClass,
    #[serde(flatten)]
    summary: MarketSummary,
}

#[derive(Debug, Serialize)]
struct WatchlistResponseData {
    symbols: Vec<WatchlistRow>,
}

pub async fn run(args: &WatchlistArgs, cache: SeriesCache) -> Result<CommandResult, CliError> {
    let mut settings = DashboardSettings::from_args(&args.generation, None)?;
    let base_seed = settings.seed;
    let profiles = catalog::watchlist();
    let Some(first) = profiles.first() else {
        return Err(CliError::Command(String::from("watchlist is empty")));
    };

    settings.seed = row_seed(base_seed, &first.symbol);
    let mut dashboard =
        Dashboard::open(SyntheticSource, cache, settings, first.symbol.clone()).await?;
    let mut table = Table::new(vec!["symbol", "name", "last", "change"]);
    let mut rows = Vec::with_capacity(profiles.len());

    for profile in profiles {
        dashboard.reseed(row_seed(base_seed, &profile.symbol));
        let snapshot = dashboard.select(profile.symbol.clone()).await?;
        let summary = snapshot.summary.clone();
        let marker = if summary.is_up() { "▲" } else { "▼" };

        table.push_row(vec![
            summary.symbol.to_string(),
            profile.name.clone(),
            price(summary.last),
            format!("{marker} {}", signed_pct(summary.change_pct)),
        ]);
        rows.push(WatchlistRow {
            name: profile.name,
            asset_class: profile.asset_class,
            summary,
        });
    }

    let data = serde_json::to_value(WatchlistResponseData { symbols: rows })?;
    Ok(CommandResult::ok(data, dashboard.source_name()).with_table(table))
}

/// An explicit seed is mixed with each symbol so rows do not share one walk.
fn row_seed(seed: Option<u64>, symbol: &Symbol) -> Option<u64> {
    seed.map(|seed| seed ^ symbol.seed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_seed_differs_per_symbol() {
        let aapl = Symbol::parse("AAPL").expect("symbol");
        let msft = Symbol::parse("MSFT").expect("symbol");
        assert_ne!(row_seed(Some(7), &aapl), row_seed(Some(7), &msft));
        assert_eq!(row_seed(None, &aapl), None);
    }
}
