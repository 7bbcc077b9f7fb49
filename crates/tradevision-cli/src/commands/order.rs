//! Order acknowledgements. Nothing is matched, executed or persisted.

use serde::Serialize;
use tradevision_core::{SeriesCache, Symbol};

use crate::cli::{OrderArgs, OrderSideArg, OrderTypeArg};
use crate::error::CliError;
use crate::output::{price, Table};
use crate::session::DashboardSettings;

use super::{open_dashboard, CommandResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSide {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    Market,
    Limit,
    Stop,
}

/// A priced order ticket ready to acknowledge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderTicket {
    pub side: OrderSide,
    pub order_type: OrderType,
    pub symbol: Symbol,
    pub quantity: u32,
    pub price: f64,
}

impl OrderTicket {
    /// Market orders fill at `last`; limit and stop orders need a price.
    pub fn new(
        side: OrderSide,
        order_type: OrderType,
        symbol: Symbol,
        quantity: u32,
        requested_price: Option<f64>,
        last: f64,
    ) -> Result<Self, CliError> {
        if quantity == 0 {
            return Err(CliError::Command(String::from("quantity must be at least 1")));
        }

        let fill = match (order_type, requested_price) {
            (OrderType::Market, _) => last,
            (_, Some(requested)) if requested.is_finite() && requested > 0.0 => requested,
            (_, Some(requested)) => {
                return Err(CliError::Command(format!(
                    "price must be a positive number, got {requested}"
                )))
            }
            (_, None) => {
                return Err(CliError::Command(String::from(
                    "--price is required for limit and stop orders",
                )))
            }
        };

        Ok(Self {
            side,
            order_type,
            symbol,
            quantity,
            price: fill,
        })
    }

    pub fn notional(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    pub fn acknowledgement(&self) -> String {
        let side = match self.side {
            OrderSide::Buy => "Buy",
            OrderSide::Sell => "Sell",
        };
        let order_type = match self.order_type {
            OrderType::Market => "market",
            OrderType::Limit => "limit",
            OrderType::Stop => "stop",
        };
        format!(
            "{side} {order_type} order for {} {} at ${} acknowledged",
            self.quantity,
            self.symbol,
            price(self.price)
        )
    }
}

#[derive(Debug, Serialize)]
struct OrderResponseData<'a> {
    acknowledgement: String,
    notional: f64,
    last: f64,
    #[serde(flatten)]
    ticket: &'a OrderTicket,
}

pub async fn run(args: &OrderArgs, cache: SeriesCache) -> Result<CommandResult, CliError> {
    let settings = DashboardSettings::from_args(&args.generation, None)?;
    let dashboard = open_dashboard(&args.symbol, settings, cache).await?;
    let snapshot = dashboard.current();
    let last = snapshot.summary.last;

    let ticket = OrderTicket::new(
        args.side.into(),
        args.order_type.into(),
        snapshot.summary.symbol.clone(),
        args.quantity,
        args.price,
        last,
    )?;

    let mut table = Table::new(vec!["side", "type", "symbol", "qty", "price", "notional"]);
    table.push_row(vec![
        format!("{:?}", ticket.side).to_ascii_uppercase(),
        format!("{:?}", ticket.order_type).to_ascii_lowercase(),
        ticket.symbol.to_string(),
        ticket.quantity.to_string(),
        price(ticket.price),
        price(ticket.notional()),
    ]);

    let data = serde_json::to_value(OrderResponseData {
        acknowledgement: ticket.acknowledgement(),
        notional: ticket.notional(),
        last,
        ticket: &ticket,
    })?;

    let mut result = CommandResult::ok(data, dashboard.source_name())
        .with_table(table)
        .with_cache_hit(dashboard.cache_hit())
        .with_warning("orders are acknowledged only; nothing is executed");
    if args.order_type == OrderTypeArg::Market && args.price.is_some() {
        result = result.with_warning("--price is ignored for market orders");
    }
    Ok(result)
}

impl From<OrderSideArg> for OrderSide {
    fn from(value: OrderSideArg) -> Self {
        match value {
            OrderSideArg::Buy => Self::Buy,
            OrderSideArg::Sell => Self::Sell,
        }
    }
}

impl From<OrderTypeArg> for OrderType {
    fn from(value: OrderTypeArg) -> Self {
        match value {
            OrderTypeArg::Market => Self::Market,
            OrderTypeArg::Limit => Self::Limit,
            OrderTypeArg::Stop => Self::Stop,
        }
    }
}
