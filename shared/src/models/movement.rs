//! Movement line items

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product line belonging to exactly one Incoming or Outgoing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub product_id: String,
    pub quantity: i64,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub buying_price: Option<Decimal>,
    pub date: Option<DateTime<Utc>>,
    pub state: Option<bool>,
}

/// Total value of a movement list, ignoring lines without a price
pub fn movements_value(movements: &[Movement]) -> Decimal {
    movements
        .iter()
        .filter_map(|m| m.buying_price.map(|price| price * Decimal::from(m.quantity)))
        .sum()
}
