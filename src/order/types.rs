//! Order request and result types

use crate::binance::types::{OrderType, Side};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

/// Placeholder for response fields the exchange did not return
pub const NOT_AVAILABLE: &str = "N/A";

/// Unvalidated order fields as received from the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawOrder<'a> {
    pub symbol: &'a str,
    pub side: &'a str,
    pub order_type: &'a str,
    pub quantity: &'a str,
    pub price: Option<&'a str>,
}

/// A validated order
///
/// Only constructed by the validator: the symbol is a normalised USDT pair,
/// quantity is positive, and `price` is present exactly when the order type
/// is LIMIT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    pub(crate) symbol: String,
    pub(crate) side: Side,
    pub(crate) order_type: OrderType,
    pub(crate) quantity: Decimal,
    pub(crate) price: Option<Decimal>,
}

impl OrderRequest {
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn price(&self) -> Option<Decimal> {
        self.price
    }
}

/// Display-relevant fields of an order placement response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResult {
    pub order_id: String,
    pub client_order_id: String,
    pub symbol: String,
    pub side: String,
    #[serde(rename = "type")]
    pub order_type: String,
    pub status: String,
    pub orig_qty: String,
    pub executed_qty: String,
    pub avg_price: String,
    pub price: String,
    pub time_in_force: String,
}

impl OrderResult {
    /// Projects a response body, substituting [`NOT_AVAILABLE`] for missing fields
    pub fn from_response(body: &Value) -> Self {
        Self {
            order_id: field(body, "orderId"),
            client_order_id: field(body, "clientOrderId"),
            symbol: field(body, "symbol"),
            side: field(body, "side"),
            order_type: field(body, "type"),
            status: field(body, "status"),
            orig_qty: field(body, "origQty"),
            executed_qty: field(body, "executedQty"),
            avg_price: field(body, "avgPrice"),
            price: field(body, "price"),
            time_in_force: field(body, "timeInForce"),
        }
    }
}

fn field(body: &Value, key: &str) -> String {
    match body.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => NOT_AVAILABLE.to_string(),
        Some(other) => other.to_string(),
    }
}
