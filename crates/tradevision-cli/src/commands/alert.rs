//! Price-alert acknowledgements. Nothing is stored or monitored.

use serde::Serialize;
use tradevision_core::{SeriesCache, Symbol};

use crate::cli::{AlertArgs, AlertConditionArg};
use crate::error::CliError;
use crate::output::{price, signed_pct, Table};
use crate::session::DashboardSettings;

use super::{open_dashboard, unlisted_warning, CommandResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertCondition {
    Above,
    Below,
}

/// An alert level checked against the latest close.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertTicket {
    pub symbol: Symbol,
    pub condition: AlertCondition,
    pub level: f64,
    pub last: f64,
}

impl AlertTicket {
    /// Without a requested level the alert sits at the current price.
    pub fn new(
        symbol: Symbol,
        condition: AlertCondition,
        requested_level: Option<f64>,
        last: f64,
    ) -> Result<Self, CliError> {
        let level = match requested_level {
            None => last,
            Some(level) if level.is_finite() && level > 0.0 => level,
            Some(level) => {
                return Err(CliError::Command(format!(
                    "alert price must be a positive number, got {level}"
                )))
            }
        };

        Ok(Self {
            symbol,
            condition,
            level,
            last,
        })
    }

    /// Percent move from the last close needed to reach the level.
    pub fn distance_pct(&self) -> f64 {
        (self.level - self.last) / self.last * 100.0
    }

    /// Whether the latest close is already past the level.
    pub fn is_triggered(&self) -> bool {
        match self.condition {
            AlertCondition::Above => self.last > self.level,
            AlertCondition::Below => self.last < self.level,
        }
    }

    pub fn acknowledgement(&self) -> String {
        let condition = match self.condition {
            AlertCondition::Above => "above",
            AlertCondition::Below => "below",
        };
        format!(
            "Alert created for {} when price crosses {condition} ${}",
            self.symbol,
            price(self.level)
        )
    }
}

#[derive(Debug, Serialize)]
struct AlertResponseData<'a> {
    acknowledgement: String,
    distance_pct: f64,
    triggered: bool,
    #[serde(flatten)]
    ticket: &'a AlertTicket,
}

pub async fn run(args: &AlertArgs, cache: SeriesCache) -> Result<CommandResult, CliError> {
    let settings = DashboardSettings::from_args(&args.generation, None)?;
    let dashboard = open_dashboard(&args.symbol, settings, cache).await?;
    let snapshot = dashboard.current();

    let ticket = AlertTicket::new(
        snapshot.summary.symbol.clone(),
        args.condition.into(),
        args.price,
        snapshot.summary.last,
    )?;

    let mut table = Table::new(vec!["symbol", "condition", "level", "last", "distance"]);
    table.push_row(vec![
        ticket.symbol.to_string(),
        format!("{:?}", ticket.condition).to_ascii_lowercase(),
        price(ticket.level),
        price(ticket.last),
        signed_pct(ticket.distance_pct()),
    ]);

    let data = serde_json::to_value(AlertResponseData {
        acknowledgement: ticket.acknowledgement(),
        distance_pct: ticket.distance_pct(),
        triggered: ticket.is_triggered(),
        ticket: &ticket,
    })?;

    let mut result = CommandResult::ok(data, dashboard.source_name())
        .with_table(table)
        .with_cache_hit(dashboard.cache_hit())
        .with_warning("alerts are acknowledged only; nothing is monitored");
    if ticket.is_triggered() {
        result = result.with_warning(format!(
            "{} is already {} the alert level",
            ticket.symbol,
            match ticket.condition {
                AlertCondition::Above => "above",
                AlertCondition::Below => "below",
            }
        ));
    }
    if let Some(warning) = unlisted_warning(&ticket.symbol) {
        result = result.with_warning(warning);
    }
    Ok(result)
}

impl From<AlertConditionArg> for AlertCondition {
    fn from(value: AlertConditionArg) -> Self {
        match value {
            AlertConditionArg::Above => Self::Above,
            AlertConditionArg::Below => Self::Below,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aapl() -> Symbol {
        Symbol::parse("AAPL").expect("symbol")
    }

    #[test]
    fn default_level_is_current_price() {
        let ticket =
            AlertTicket::new(aapl(), AlertCondition::Above, None, 181.234).expect("ticket");

        assert_eq!(ticket.level, 181.234);
        assert_eq!(ticket.distance_pct(), 0.0);
        assert!(!ticket.is_triggered());
        assert_eq!(
            ticket.acknowledgement(),
            "Alert created for AAPL when price crosses above $181.23"
        );
    }

    #[test]
    fn explicit_level_measures_distance() {
        let ticket =
            AlertTicket::new(aapl(), AlertCondition::Below, Some(90.0), 100.0).expect("ticket");

        assert!((ticket.distance_pct() + 10.0).abs() < 1e-9);
        assert!(!ticket.is_triggered());

        let passed =
            AlertTicket::new(aapl(), AlertCondition::Above, Some(95.0), 100.0).expect("ticket");
        assert!(passed.is_triggered());
    }

    #[test]
    fn non_positive_level_is_rejected() {
        let err = AlertTicket::new(aapl(), AlertCondition::Above, Some(0.0), 100.0);
        assert!(matches!(err, Err(CliError::Command(_))));

        let err = AlertTicket::new(aapl(), AlertCondition::Above, Some(f64::NAN), 100.0);
        assert!(matches!(err, Err(CliError::Command(_))));
    }
}
