//! Static portfolio valuation. Holdings come from the command line and are
//! never stored.

use serde::Serialize;
use tradevision_core::{SeriesCache, Symbol, SyntheticSource};

use crate::cli::{HoldingArg, PortfolioArgs};
use crate::error::CliError;
use crate::output::{price, Table};
use crate::session::{Dashboard, DashboardSettings};

use super::{parse_symbol, unlisted_warning, CommandResult};

/// Holdings valued when none are given.
const DEFAULT_HOLDINGS: [(&str, u32); 1] = [("AAPL", 10)];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Position {
    pub symbol: Symbol,
    pub quantity: u32,
    pub price: f64,
    pub value: f64,
}

impl Position {
    pub fn new(symbol: Symbol, quantity: u32, price: f64) -> Self {
        Self {
            symbol,
            quantity,
            price,
            value: price * f64::from(quantity),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioValuation {
    pub positions: Vec<Position>,
    pub cash: f64,
    pub invested: f64,
    pub total: f64,
}

impl PortfolioValuation {
    pub fn new(positions: Vec<Position>, cash: f64) -> Result<Self, CliError> {
        if !cash.is_finite() || cash < 0.0 {
            return Err(CliError::Command(format!(
                "cash must be a non-negative number, got {cash}"
            )));
        }

        let invested = positions.iter().map(|position| position.value).sum::<f64>();
        Ok(Self {
            positions,
            cash,
            invested,
            total: invested + cash,
        })
    }
}

pub async fn run(args: &PortfolioArgs, cache: SeriesCache) -> Result<CommandResult, CliError> {
    let settings = DashboardSettings::from_args(&args.generation, None)?;
    let holdings = holdings(&args.holdings)?;
    let Some((first, _)) = holdings.first() else {
        return Err(CliError::Command(String::from("portfolio has no holdings")));
    };

    let mut dashboard = Dashboard::open(SyntheticSource, cache, settings, first.clone()).await?;
    let mut positions = Vec::with_capacity(holdings.len());
    let mut warnings = Vec::new();

    for (symbol, quantity) in holdings {
        let snapshot = dashboard.select(symbol.clone()).await?;
        warnings.extend(unlisted_warning(&symbol));
        positions.push(Position::new(symbol, quantity, snapshot.summary.last));
    }

    let valuation = PortfolioValuation::new(positions, args.cash)?;

    let mut table = Table::new(vec!["asset", "qty", "price", "value"]);
    for position in &valuation.positions {
        table.push_row(vec![
            position.symbol.to_string(),
            position.quantity.to_string(),
            price(position.price),
            price(position.value),
        ]);
    }
    table.push_row(vec![
        String::from("CASH"),
        String::new(),
        String::new(),
        price(valuation.cash),
    ]);
    table.push_row(vec![
        String::from("TOTAL"),
        String::new(),
        String::new(),
        price(valuation.total),
    ]);

    let data = serde_json::to_value(&valuation)?;
    let mut result = CommandResult::ok(data, dashboard.source_name()).with_table(table);
    for warning in warnings {
        result = result.with_warning(warning);
    }
    Ok(result)
}

fn holdings(args: &[HoldingArg]) -> Result<Vec<(Symbol, u32)>, CliError> {
    if args.is_empty() {
        return DEFAULT_HOLDINGS
            .iter()
            .map(|(symbol, quantity)| parse_symbol(symbol).map(|symbol| (symbol, *quantity)))
            .collect();
    }

    args.iter()
        .map(|holding| parse_symbol(&holding.symbol).map(|symbol| (symbol, holding.quantity)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(raw: &str) -> Symbol {
        Symbol::parse(raw).expect("symbol")
    }

    #[test]
    fn valuation_adds_cash_to_positions() {
        let positions = vec![
            Position::new(symbol("AAPL"), 10, 180.0),
            Position::new(symbol("NVDA"), 2, 120.5),
        ];
        let valuation = PortfolioValuation::new(positions, 10_000.0).expect("valuation");

        assert_eq!(valuation.positions[0].value, 1800.0);
        assert_eq!(valuation.invested, 2041.0);
        assert_eq!(valuation.total, 12_041.0);
    }

    #[test]
    fn negative_cash_is_rejected() {
        let err = PortfolioValuation::new(Vec::new(), -1.0);
        assert!(matches!(err, Err(CliError::Command(_))));
    }

    #[test]
    fn empty_holdings_use_defaults() {
        let defaults = holdings(&[]).expect("defaults");
        assert_eq!(defaults, vec![(symbol("AAPL"), 10)]);

        let given = holdings(&[HoldingArg {
            symbol: String::from("eur/usd"),
            quantity: 4,
        }])
        .expect("holdings");
        assert_eq!(given, vec![(symbol("EUR/USD"), 4)]);
    }
}
