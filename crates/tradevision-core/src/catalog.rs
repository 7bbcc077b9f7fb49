//! Static watchlist catalog used to seed synthetic generation.

use serde::{Deserialize, Serialize};

use crate::Symbol;

/// Base price used for symbols missing from the catalog.
pub const DEFAULT_BASE_PRICE: f64 = 100.0;

/// Instrument class shown next to watchlist rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    Equity,
    Crypto,
    Other,
}

/// How wild the synthetic walk for a symbol should be.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatilityClass {
    #[default]
    Normal,
    High,
}

impl VolatilityClass {
    /// Standard deviation of the per-bar log return.
    pub const fn per_bar_sigma(self) -> f64 {
        match self {
            Self::Normal => 0.004,
            Self::High => 0.007,
        }
    }
}

/// Generation profile for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolProfile {
    pub symbol: Symbol,
    pub name: String,
    pub base_price: f64,
    pub volatility: VolatilityClass,
    pub asset_class: AssetClass,
}

const WATCHLIST: [(&str, &str, f64, VolatilityClass, AssetClass); 6] = [
    ("AAPL", "Apple Inc.", 180.0, VolatilityClass::Normal, AssetClass::Equity),
    ("MSFT", "Microsoft Corp.", 420.0, VolatilityClass::Normal, AssetClass::Equity),
    ("TSLA", "Tesla Inc.", 250.0, VolatilityClass::Normal, AssetClass::Equity),
    ("GOOGL", "Google LLC", 2800.0, VolatilityClass::Normal, AssetClass::Equity),
    ("NVDA", "NVIDIA Corp.", 120.0, VolatilityClass::Normal, AssetClass::Equity),
    ("BTCUSD", "Bitcoin / USD", 65000.0, VolatilityClass::High, AssetClass::Crypto),
];

/// Catalog entries in watchlist order.
pub fn watchlist() -> Vec<SymbolProfile> {
    WATCHLIST
        .iter()
        .filter_map(|(symbol, name, base_price, volatility, asset_class)| {
            let symbol = Symbol::parse(symbol).ok()?;
            Some(SymbolProfile {
                symbol,
                name: (*name).to_owned(),
                base_price: *base_price,
                volatility: *volatility,
                asset_class: *asset_class,
            })
        })
        .collect()
}

/// Resolve a profile, falling back to defaults for unknown symbols.
pub fn profile(symbol: &Symbol) -> SymbolProfile {
    WATCHLIST
        .iter()
        .find(|(candidate, ..)| *candidate == symbol.as_str())
        .map(|(_, name, base_price, volatility, asset_class)| SymbolProfile {
            symbol: symbol.clone(),
            name: (*name).to_owned(),
            base_price: *base_price,
            volatility: *volatility,
            asset_class: *asset_class,
        })
        .unwrap_or_else(|| SymbolProfile {
            symbol: symbol.clone(),
            name: symbol.as_str().to_owned(),
            base_price: DEFAULT_BASE_PRICE,
            volatility: VolatilityClass::Normal,
            asset_class: AssetClass::Other,
        })
}

pub fn is_listed(symbol: &Symbol) -> bool {
    WATCHLIST
        .iter()
        .any(|(candidate, ..)| *candidate == symbol.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watchlist_entries_are_all_valid() {
        let entries = watchlist();
        assert_eq!(entries.len(), WATCHLIST.len());
        assert_eq!(entries[0].symbol.as_str(), "AAPL");
    }

    #[test]
    fn crypto_uses_high_volatility() {
        let btc = profile(&Symbol::parse("btcusd").expect("valid"));
        assert_eq!(btc.volatility, VolatilityClass::High);
        assert_eq!(btc.base_price, 65000.0);
        assert!(btc.volatility.per_bar_sigma() > VolatilityClass::Normal.per_bar_sigma());
    }

    #[test]
    fn unknown_symbol_falls_back_to_defaults() {
        let symbol = Symbol::parse("ZZZZ").expect("valid");
        let fallback = profile(&symbol);
        assert!(!is_listed(&symbol));
        assert_eq!(fallback.base_price, DEFAULT_BASE_PRICE);
        assert_eq!(fallback.volatility, VolatilityClass::Normal);
        assert_eq!(fallback.name, "ZZZZ");
    }

    #[test]
    fn pair_and_index_tickers_fall_back_to_defaults() {
        for raw in ["EUR/USD", "^GSPC"] {
            let symbol = Symbol::parse(raw).expect("valid");
            let fallback = profile(&symbol);
            assert!(!is_listed(&symbol));
            assert_eq!(fallback.base_price, DEFAULT_BASE_PRICE);
            assert_eq!(fallback.asset_class, AssetClass::Other);
        }
    }
}
