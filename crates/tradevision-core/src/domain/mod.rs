//! # Domain Models
//!
//! Validated value types shared by the generator, the indicator calculator
//! and the presentation layer.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Bar`] | OHLCV bar with timestamp |
//! | [`Series`] | Non-empty, time-ordered bars for one symbol |
//! | [`Symbol`] | Normalized ticker |
//! | [`Interval`] | Bar spacing (1m, 5m, 15m, 1h, 4h, 1d) |
//! | [`UtcDateTime`] | UTC timestamp |
//!
//! ## Validation
//!
//! Construction enforces the OHLC invariant
//! `low <= min(open, close) <= max(open, close) <= high`:
//!
//! ```rust
//! use tradevision_core::{Bar, UtcDateTime, ValidationError};
//!
//! let ts = UtcDateTime::parse("2024-01-01T00:00:00Z").unwrap();
//! assert!(Bar::new(ts, 100.0, 105.0, 95.0, 102.0, 1_000).is_ok());
//!
//! let invalid = Bar::new(ts, 100.0, 95.0, 105.0, 102.0, 1_000);
//! assert!(matches!(invalid, Err(ValidationError::InvalidBarRange)));
//! ```

mod interval;
mod models;
mod symbol;
mod timestamp;

pub use interval::Interval;
pub use models::{Bar, Series};
pub use symbol::Symbol;
pub use timestamp::UtcDateTime;
