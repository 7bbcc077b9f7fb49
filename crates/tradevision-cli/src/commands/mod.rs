mod alert;
mod indicators;
mod live;
mod order;
mod portfolio;
mod series;
mod summary;
mod watchlist;

use std::io::Write;

use serde_json::Value;
use tracing::debug;
use tradevision_core::{CoreError, SeriesCache, Symbol, SyntheticSource};

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::metadata::{Envelope, EnvelopeMeta};
use crate::output::Table;
use crate::session::{Dashboard, DashboardSettings};

pub struct CommandResult {
    pub data: Value,
    pub table: Option<Table>,
    pub warnings: Vec<String>,
    pub cache_hit: bool,
    pub source: &'static str,
}

impl CommandResult {
    pub fn ok(data: Value, source: &'static str) -> Self {
        Self {
            data,
            table: None,
            warnings: Vec::new(),
            cache_hit: false,
            source,
        }
    }

    pub fn with_table(mut self, table: Table) -> Self {
        self.table = Some(table);
        self
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_cache_hit(mut self, cache_hit: bool) -> Self {
        self.cache_hit = cache_hit;
        self
    }
}

/// Run the selected command. `out` receives incremental output (live ticks);
/// the final result is returned wrapped in an envelope.
pub async fn run<W: Write>(
    cli: &Cli,
    out: &mut W,
) -> Result<(Envelope<Value>, Option<Table>), CliError> {
    let cache = SeriesCache::new();
    debug!(command = ?cli.command, "dispatching command");

    let result = match &cli.command {
        Command::Series(args) => series::run(args, cache).await?,
        Command::Indicators(args) => indicators::run(args, cache).await?,
        Command::Summary(args) => summary::run(args, cache).await?,
        Command::Watchlist(args) => watchlist::run(args, cache).await?,
        Command::Live(args) => live::run(args, cache, cli.format, out).await?,
        Command::Order(args) => order::run(args, cache).await?,
        Command::Alert(args) => alert::run(args, cache).await?,
        Command::Portfolio(args) => portfolio::run(args, cache).await?,
    };

    let CommandResult {
        data,
        table,
        warnings,
        cache_hit,
        source,
    } = result;

    let mut meta = EnvelopeMeta::new(source, cache_hit);
    for warning in warnings {
        meta.push_warning(warning);
    }

    Ok((Envelope { meta, data }, table))
}

/// Parse the symbol and open a synthetic dashboard on it.
async fn open_dashboard(
    raw_symbol: &str,
    settings: DashboardSettings,
    cache: SeriesCache,
) -> Result<Dashboard<SyntheticSource>, CliError> {
    let symbol = parse_symbol(raw_symbol)?;
    Ok(Dashboard::open(SyntheticSource, cache, settings, symbol).await?)
}

/// Parse a symbol typed by the user; rejections are invalid arguments.
fn parse_symbol(raw_symbol: &str) -> Result<Symbol, CliError> {
    Symbol::parse(raw_symbol)
        .map_err(|err| CoreError::invalid_argument("symbol", err.to_string()).into())
}

/// Warning attached when a symbol is not in the watchlist catalog.
fn unlisted_warning(symbol: &Symbol) -> Option<String> {
    (!tradevision_core::catalog::is_listed(symbol)).then(|| {
        format!("{symbol} is not in the watchlist; using default base price and volatility")
    })
}
