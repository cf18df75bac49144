//! Order input validation
//!
//! Pure checks run before any network call. Fields are validated in a fixed
//! order (symbol, side, order type, quantity, price) so the first violation
//! reported is deterministic.

use crate::binance::types::{OrderType, Side};
use crate::error::{Field, ValidationError};
use crate::order::types::{OrderRequest, RawOrder};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Only USDT-margined linear contracts are supported
pub const QUOTE_ASSET: &str = "USDT";
pub const MIN_SYMBOL_LEN: usize = 5;

/// Validates every field and builds an [`OrderRequest`]
pub fn validate_order(raw: &RawOrder<'_>) -> Result<OrderRequest, ValidationError> {
    let symbol = validate_symbol(raw.symbol)?;
    let side = validate_side(raw.side)?;
    let order_type = validate_order_type(raw.order_type)?;
    let quantity = validate_quantity(raw.quantity)?;
    let price = validate_price(raw.price, order_type)?;

    Ok(OrderRequest {
        symbol,
        side,
        order_type,
        quantity,
        price,
    })
}

pub fn validate_symbol(raw: &str) -> Result<String, ValidationError> {
    let symbol = raw.trim().to_uppercase();

    if symbol.is_empty() {
        return Err(ValidationError::new(
            Field::Symbol,
            "must be a non-empty string",
        ));
    }
    if !symbol.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::new(
            Field::Symbol,
            format!("must contain only letters, got: '{}'", symbol),
        ));
    }
    if !symbol.ends_with(QUOTE_ASSET) {
        return Err(ValidationError::new(
            Field::Symbol,
            format!(
                "only USDT-M futures pairs are supported, symbol must end with '{}', got: '{}'",
                QUOTE_ASSET, symbol
            ),
        ));
    }
    if symbol.len() < MIN_SYMBOL_LEN {
        return Err(ValidationError::new(
            Field::Symbol,
            format!("too short: '{}'", symbol),
        ));
    }

    Ok(symbol)
}

pub fn validate_side(raw: &str) -> Result<Side, ValidationError> {
    let side = normalise(Field::Side, raw)?;
    Side::ALL
        .into_iter()
        .find(|s| s.as_binance() == side)
        .ok_or_else(|| {
            ValidationError::new(
                Field::Side,
                format!("must be one of BUY, SELL, got: '{}'", side),
            )
        })
}

pub fn validate_order_type(raw: &str) -> Result<OrderType, ValidationError> {
    let order_type = normalise(Field::OrderType, raw)?;
    OrderType::ALL
        .into_iter()
        .find(|t| t.as_binance() == order_type)
        .ok_or_else(|| {
            ValidationError::new(
                Field::OrderType,
                format!("must be one of MARKET, LIMIT, got: '{}'", order_type),
            )
        })
}

pub fn validate_quantity(raw: &str) -> Result<Decimal, ValidationError> {
    parse_positive(Field::Quantity, raw)
}

/// Price is required for LIMIT and discarded for MARKET
pub fn validate_price(
    raw: Option<&str>,
    order_type: OrderType,
) -> Result<Option<Decimal>, ValidationError> {
    if !order_type.needs_price() {
        return Ok(None);
    }

    match raw.filter(|p| !p.trim().is_empty()) {
        Some(price) => parse_positive(Field::Price, price).map(Some),
        None => Err(ValidationError::new(
            Field::Price,
            "price is required for LIMIT orders",
        )),
    }
}

fn normalise(field: Field, raw: &str) -> Result<String, ValidationError> {
    let value = raw.trim().to_uppercase();
    if value.is_empty() {
        return Err(ValidationError::new(field, "must be a non-empty string"));
    }
    Ok(value)
}

fn parse_positive(field: Field, raw: &str) -> Result<Decimal, ValidationError> {
    let trimmed = raw.trim();
    let value = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ValidationError::new(field, format!("must be a number, got: '{}'", raw)))?;

    if value <= Decimal::ZERO {
        return Err(ValidationError::new(
            field,
            format!("must be positive, got: {}", value),
        ));
    }

    Ok(value.normalize())
}
