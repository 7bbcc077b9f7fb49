use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 32;

/// Normalized ticker, e.g. `AAPL`, `BTCUSD`, `EUR/USD` or `^GSPC`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parse and normalize a symbol to uppercase.
    ///
    /// Any non-empty identifier is accepted as long as it has no whitespace
    /// or control characters; unknown tickers fall back to the default
    /// catalog profile.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        let normalized = trimmed.to_ascii_uppercase();
        let len = normalized.chars().count();
        if len > MAX_SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_SYMBOL_LEN,
            });
        }

        if let Some((index, ch)) = normalized
            .chars()
            .enumerate()
            .find(|(_, ch)| ch.is_whitespace() || ch.is_control())
        {
            return Err(ValidationError::SymbolInvalidChar { ch, index });
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Portable seed derived from the symbol text.
    ///
    /// A multiply-by-33 fold over the bytes, so the value is identical on
    /// every platform and build, unlike `std::hash`.
    pub fn seed(&self) -> u64 {
        self.0.bytes().fold(5381_u64, |acc, byte| {
            acc.wrapping_mul(33).wrapping_add(u64::from(byte))
        })
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Symbol {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_symbol() {
        let parsed = Symbol::parse(" btcusd ").expect("symbol should parse");
        assert_eq!(parsed.as_str(), "BTCUSD");
    }

    #[test]
    fn accepts_dashboard_style_tickers() {
        for (raw, normalized) in [
            ("EUR/USD", "EUR/USD"),
            ("^gspc", "^GSPC"),
            ("1inch", "1INCH"),
            ("x:btcusd", "X:BTCUSD"),
            ("BRK.B", "BRK.B"),
        ] {
            let parsed = Symbol::parse(raw).expect("symbol should parse");
            assert_eq!(parsed.as_str(), normalized);
        }
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert_eq!(Symbol::parse(""), Err(ValidationError::EmptySymbol));
        assert_eq!(Symbol::parse("   "), Err(ValidationError::EmptySymbol));
    }

    #[test]
    fn rejects_inner_whitespace_and_control_chars() {
        let err = Symbol::parse("EUR USD").expect_err("must fail");
        assert!(matches!(err, ValidationError::SymbolInvalidChar { ch: ' ', index: 3 }));

        let err = Symbol::parse("AA\u{7}PL").expect_err("must fail");
        assert!(matches!(err, ValidationError::SymbolInvalidChar { index: 2, .. }));
    }

    #[test]
    fn seed_is_stable_and_case_insensitive() {
        let upper = Symbol::parse("AAPL").expect("valid");
        let lower = Symbol::parse("aapl").expect("valid");
        assert_eq!(upper.seed(), lower.seed());
        // djb2 over "AAPL"
        assert_eq!(upper.seed(), 6_383_850_307);
        assert_ne!(upper.seed(), Symbol::parse("MSFT").expect("valid").seed());
    }
}
