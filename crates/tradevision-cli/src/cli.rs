//! CLI argument definitions for TradeVision.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `series` | Generate a synthetic OHLCV series |
//! | `indicators` | Series plus SMA short/long and RSI |
//! | `summary` | Headline metrics for the latest bar |
//! | `watchlist` | One summary row per catalog symbol |
//! | `live` | Run the live simulation |
//! | `order` | Print a buy/sell acknowledgement |
//! | `alert` | Print a price-alert acknowledgement |
//! | `portfolio` | Value a static holding set |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, ndjson, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--log-level` | `warn` | stderr log level (`TRADEVISION_LOG` overrides) |
//!
//! # Examples
//!
//! ```bash
//! tradevision series AAPL --points 50 --seed 42 --pretty
//! tradevision indicators BTCUSD --short 10 --long 30 --format table
//! tradevision series MSFT --chart line --format table
//! tradevision live NVDA --ticks 20 --tick-ms 250 --reset-every 10 --format ndjson
//! tradevision order buy TSLA --quantity 5
//! tradevision portfolio --holding AAPL=10 --holding BTCUSD=1 --cash 2500
//! ```

use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// 📊 TradeVision - synthetic market data dashboard
#[derive(Debug, Parser)]
#[command(
    name = "tradevision",
    author,
    version,
    about = "Synthetic market data dashboard",
    long_about = "TradeVision generates reproducible synthetic price series, computes \
chart indicators, and simulates a live feed.\n\
\n\
  • Geometric random walk OHLCV bars seeded per symbol\n\
  • SMA short/long and RSI with growing warm-up windows\n\
  • Cancellable live simulation (Ctrl-C stops at the next tick)\n\
\n\
Data is simulated for demonstration purposes. Not financial advice."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Log level for stderr diagnostics.
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format for terminal display.
    Table,
    /// Single JSON object output.
    Json,
    /// Newline-delimited JSON (one object per line).
    Ndjson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// 📈 Generate a synthetic OHLCV series.
    ///
    /// # Examples
    ///
    ///   tradevision series AAPL
    ///   tradevision series BTCUSD --points 50 --interval 1h --seed 7
    Series(SeriesArgs),

    /// 📉 Generate a series and compute SMA short/long and RSI.
    ///
    /// # Examples
    ///
    ///   tradevision indicators AAPL
    ///   tradevision indicators MSFT --short 10 --long 30 --rsi 7
    Indicators(IndicatorsArgs),

    /// 💰 Show price, change, high, low and volume for the latest bar.
    Summary(IndicatorsArgs),

    /// 📍 Summarize every symbol in the watchlist.
    Watchlist(WatchlistArgs),

    /// ▶️ Run the live simulation, appending one bar per tick.
    ///
    /// Each tick drops the oldest bar so the window size stays fixed.
    /// Ctrl-C stops the loop at the next tick boundary.
    ///
    /// # Examples
    ///
    ///   tradevision live AAPL --ticks 50 --tick-ms 300
    Live(LiveArgs),

    /// 🎯 Acknowledge a buy or sell order. Nothing is executed or stored.
    ///
    /// # Examples
    ///
    ///   tradevision order buy AAPL --quantity 10
    ///   tradevision order sell TSLA --order-type limit --price 245.50
    Order(OrderArgs),

    /// 🔔 Acknowledge a price alert. Nothing is stored or monitored.
    ///
    /// # Examples
    ///
    ///   tradevision alert AAPL
    ///   tradevision alert BTCUSD --condition below --price 60000
    Alert(AlertArgs),

    /// 💼 Value a static set of holdings at the latest synthetic prices.
    ///
    /// # Examples
    ///
    ///   tradevision portfolio
    ///   tradevision portfolio --holding AAPL=10 --holding NVDA=25 --cash 5000
    Portfolio(PortfolioArgs),
}

/// Parameters shared by every command that generates a series.
#[derive(Debug, Clone, Args)]
pub struct GenerationArgs {
    /// Number of bars to generate.
    #[arg(long, default_value_t = 200)]
    pub points: usize,

    /// Random seed. Defaults to a stable hash of the symbol.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Bar spacing: 1m, 5m, 15m, 1h, 4h, 1d.
    #[arg(long, default_value = "1m")]
    pub interval: String,

    /// RFC3339 UTC timestamp of the last bar (defaults to now).
    #[arg(long)]
    pub end: Option<String>,
}

/// Indicator window sizes.
#[derive(Debug, Clone, Args)]
pub struct WindowArgs {
    /// Short SMA window.
    #[arg(long, default_value_t = 20)]
    pub short: usize,

    /// Long SMA window.
    #[arg(long, default_value_t = 50)]
    pub long: usize,

    /// RSI period.
    #[arg(long, default_value_t = 14)]
    pub rsi: usize,
}

/// How `series` shapes its output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ChartTypeArg {
    #[default]
    Candlestick,
    Line,
    Area,
}

/// Arguments for the `series` command.
#[derive(Debug, Args)]
pub struct SeriesArgs {
    /// Market symbol (e.g., AAPL, BTCUSD).
    pub symbol: String,

    #[command(flatten)]
    pub generation: GenerationArgs,

    /// Chart type the output is shaped for.
    #[arg(long, value_enum, default_value_t = ChartTypeArg::Candlestick)]
    pub chart: ChartTypeArg,
}

/// Arguments for the `indicators` and `summary` commands.
#[derive(Debug, Args)]
pub struct IndicatorsArgs {
    /// Market symbol (e.g., AAPL, BTCUSD).
    pub symbol: String,

    #[command(flatten)]
    pub generation: GenerationArgs,

    #[command(flatten)]
    pub windows: WindowArgs,
}

/// Arguments for the `watchlist` command.
#[derive(Debug, Args)]
pub struct WatchlistArgs {
    #[command(flatten)]
    pub generation: GenerationArgs,
}

/// Arguments for the `live` command.
#[derive(Debug, Args)]
pub struct LiveArgs {
    /// Market symbol (e.g., AAPL, BTCUSD).
    pub symbol: String,

    #[command(flatten)]
    pub generation: GenerationArgs,

    #[command(flatten)]
    pub windows: WindowArgs,

    /// Number of live ticks to simulate.
    #[arg(long, default_value_t = 50)]
    pub ticks: u32,

    /// Delay between ticks in milliseconds.
    #[arg(long, default_value_t = 300, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Sliding window size. Defaults to `--points`.
    #[arg(long)]
    pub window: Option<usize>,

    /// Reset the chart to a freshly generated series every N ticks.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub reset_every: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderSideArg {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderTypeArg {
    Market,
    Limit,
    Stop,
}

/// Arguments for the `order` command.
#[derive(Debug, Args)]
pub struct OrderArgs {
    /// Order side.
    #[arg(value_enum)]
    pub side: OrderSideArg,

    /// Market symbol.
    pub symbol: String,

    /// Number of shares/units.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub quantity: u32,

    /// Order type.
    #[arg(long, value_enum, default_value_t = OrderTypeArg::Market)]
    pub order_type: OrderTypeArg,

    /// Limit/stop price. Ignored for market orders.
    #[arg(long)]
    pub price: Option<f64>,

    #[command(flatten)]
    pub generation: GenerationArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlertConditionArg {
    Above,
    Below,
}

/// Arguments for the `alert` command.
#[derive(Debug, Args)]
pub struct AlertArgs {
    /// Market symbol.
    pub symbol: String,

    /// Fire when the price crosses above or below the level.
    #[arg(long, value_enum, default_value_t = AlertConditionArg::Above)]
    pub condition: AlertConditionArg,

    /// Alert level. Defaults to the current price.
    #[arg(long)]
    pub price: Option<f64>,

    #[command(flatten)]
    pub generation: GenerationArgs,
}

/// `SYMBOL=QTY` pair given to `--holding`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldingArg {
    pub symbol: String,
    pub quantity: u32,
}

impl FromStr for HoldingArg {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (symbol, quantity) = value
            .rsplit_once('=')
            .ok_or_else(|| format!("expected SYMBOL=QTY, got '{value}'"))?;
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(format!("missing symbol in '{value}'"));
        }
        let quantity = quantity
            .trim()
            .parse::<u32>()
            .map_err(|err| format!("invalid quantity in '{value}': {err}"))?;
        Ok(Self {
            symbol: symbol.to_owned(),
            quantity,
        })
    }
}

/// Arguments for the `portfolio` command.
#[derive(Debug, Args)]
pub struct PortfolioArgs {
    /// Position as SYMBOL=QTY. Repeatable. Defaults to AAPL=10.
    #[arg(long = "holding", value_name = "SYMBOL=QTY")]
    pub holdings: Vec<HoldingArg>,

    /// Cash balance.
    #[arg(long, default_value_t = 10_000.0)]
    pub cash: f64,

    #[command(flatten)]
    pub generation: GenerationArgs,
}
