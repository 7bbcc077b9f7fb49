//! # TradeVision Core
//!
//! Synthetic market data for a charting dashboard.
//!
//! ## Overview
//!
//! - **Domain models**: validated [`Bar`], [`Series`], [`Symbol`], [`Interval`]
//! - **Generator**: reproducible geometric random walk OHLCV series plus a
//!   single-bar step for live simulation
//! - **Indicators**: short/long SMA and RSI with a growing warm-up window
//! - **Catalog**: static watchlist with base prices and volatility classes
//! - **Cache**: snapshot cache for the orchestration layer
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Snapshot cache keyed by symbol, size, seed and windows |
//! | [`catalog`] | Watchlist profiles and fallbacks |
//! | [`domain`] | Domain models |
//! | [`error`] | Core error types |
//! | [`generator`] | Series generation and live bars |
//! | [`indicators`] | SMA / RSI |
//! | [`snapshot`] | Series + indicators + summary bundle |
//! | [`source`] | Series source trait |
//! | [`summary`] | Market summary metrics |
//!
//! ## Quick Start
//!
//! ```rust
//! use tradevision_core::{compute_indicators, generate_series, Symbol};
//!
//! let symbol = Symbol::parse("AAPL").unwrap();
//! let series = generate_series(&symbol, 120, Some(42)).unwrap();
//! let indicators = compute_indicators(&series, 20, 50, 14).unwrap();
//!
//! assert_eq!(indicators.len(), series.len());
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Catalog         │────▶│ Generator        │
//! └─────────────────┘     └────────┬─────────┘
//!                                  │ Series
//!                                  ▼
//!                         ┌──────────────────┐
//!                         │ Indicators       │
//!                         └────────┬─────────┘
//!                                  │ IndicatorSet
//!                                  ▼
//!                         ┌──────────────────┐
//!                         │ Presentation     │
//!                         │ (cache, live)    │
//!                         └──────────────────┘
//! ```
//!
//! Generation and indicator functions are pure and do no I/O. The only
//! runtime piece is [`SeriesCache`], which needs `tokio::sync` and nothing
//! else; timers and the live loop belong to the caller.

pub mod cache;
pub mod catalog;
pub mod domain;
pub mod error;
pub mod generator;
pub mod indicators;
pub mod snapshot;
pub mod source;
pub mod summary;

pub use cache::{CacheMode, SeriesCache, SnapshotKey};
pub use catalog::{AssetClass, SymbolProfile, VolatilityClass};
pub use domain::{Bar, Interval, Series, Symbol, UtcDateTime};
pub use error::{CoreError, ValidationError};
pub use generator::{append_live_bar, generate_series, SeriesRequest};
pub use indicators::{compute_indicators, IndicatorParams, IndicatorSet};
pub use snapshot::ChartSnapshot;
pub use source::{SeriesSource, SyntheticSource};
pub use summary::MarketSummary;
