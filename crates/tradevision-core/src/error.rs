use thiserror::Error;

/// Validation and contract errors exposed by `tradevision-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol contains whitespace or control character {ch:?} at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("invalid interval '{value}', expected one of 1m, 5m, 15m, 1h, 4h, 1d")]
    InvalidInterval { value: String },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },
    #[error("timestamp is out of the representable range")]
    TimestampOutOfRange,

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be positive")]
    NonPositiveValue { field: &'static str },

    #[error("bar high must be >= low")]
    InvalidBarRange,
    #[error("bar open/close must be within high/low range")]
    InvalidBarBounds,

    #[error("series must contain at least one bar")]
    EmptySeries,
    #[error("series timestamps must be strictly increasing (index {index})")]
    UnorderedSeries { index: usize },
}

/// Top-level error type for core operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CoreError {
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

/// Reject zero-sized counts and windows.
pub(crate) fn require_positive(name: &'static str, value: usize) -> Result<usize, CoreError> {
    if value == 0 {
        return Err(CoreError::invalid_argument(name, "must be greater than zero"));
    }
    Ok(value)
}
