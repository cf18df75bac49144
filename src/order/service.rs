//! Order placement
//!
//! Orchestrates validation, parameter building, the signed POST and the
//! projection of the response. Adds no error semantics of its own: every
//! failure reaches the caller as the typed error its component produced.
//!
//! Placement is not idempotent. Two calls with the same request create two
//! orders on the exchange; no client order id is generated for deduplication.

use crate::binance::client::BinanceClient;
use crate::binance::http::{HttpExecutor, ReqwestExecutor};
use crate::binance::params::Params;
use crate::binance::types::TimeInForce;
use crate::config::{ClientSettings, Credentials};
use crate::diagnostics::Diagnostics;
use crate::error::{ConfigError, OrderError};
use crate::order::types::{OrderRequest, OrderResult, RawOrder};
use crate::order::validation::validate_order;

/// USDT-M futures order placement endpoint
pub const ORDER_ENDPOINT: &str = "/fapi/v1/order";

const COMPONENT: &str = "orders";

/// Places single futures orders
#[derive(Debug)]
pub struct OrderService<E = ReqwestExecutor> {
    client: BinanceClient<E>,
    diagnostics: Diagnostics,
}

impl OrderService<ReqwestExecutor> {
    /// Service backed by a `reqwest` client built from `settings`
    pub fn connect(
        credentials: Credentials,
        settings: &ClientSettings,
        diagnostics: Diagnostics,
    ) -> Result<Self, ConfigError> {
        let client = BinanceClient::new(credentials, settings, diagnostics.clone())?;
        Ok(Self::new(client, diagnostics))
    }
}

impl<E: HttpExecutor> OrderService<E> {
    pub fn new(client: BinanceClient<E>, diagnostics: Diagnostics) -> Self {
        Self {
            client,
            diagnostics,
        }
    }

    /// Validates raw fields, then submits the order
    ///
    /// Validation failures return before any network call is made.
    pub async fn place_order(&self, raw: &RawOrder<'_>) -> Result<OrderResult, OrderError> {
        self.diagnostics
            .info(COMPONENT, "=== Starting order placement ===");
        self.diagnostics.debug(
            COMPONENT,
            format!(
                "Raw inputs: symbol={}, side={}, orderType={}, quantity={}, price={:?}",
                raw.symbol, raw.side, raw.order_type, raw.quantity, raw.price
            ),
        );

        let request = validate_order(raw).map_err(|err| {
            self.diagnostics
                .error(COMPONENT, format!("Validation failed: {}", err));
            err
        })?;
        self.diagnostics
            .info(COMPONENT, "All inputs validated successfully");

        self.submit(&request).await
    }

    /// Submits an already validated order as a signed POST
    pub async fn submit(&self, request: &OrderRequest) -> Result<OrderResult, OrderError> {
        let params = order_params(request);

        self.diagnostics.info(
            COMPONENT,
            format!(
                "Placing {} {} order: symbol={} qty={} price={}",
                request.side(),
                request.order_type(),
                request.symbol(),
                request.quantity(),
                request
                    .price()
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "-".to_string())
            ),
        );
        self.diagnostics.debug(
            COMPONENT,
            format!("Final API params: {}", params.to_query_string()),
        );

        let body = self.client.post(ORDER_ENDPOINT, params, true).await?;
        let result = OrderResult::from_response(&body);

        self.diagnostics.info(
            COMPONENT,
            format!(
                "Order placed, orderId={}, status={}",
                result.order_id, result.status
            ),
        );
        self.diagnostics
            .info(COMPONENT, "=== Order placement complete ===");
        Ok(result)
    }
}

/// Endpoint parameters for `request`, in signing order
///
/// Always `symbol, side, type, quantity`; LIMIT orders append
/// `price, timeInForce=GTC`.
pub fn order_params(request: &OrderRequest) -> Params {
    let mut params = Params::new()
        .with("symbol", request.symbol())
        .with("side", request.side())
        .with("type", request.order_type())
        .with("quantity", request.quantity());

    if let Some(price) = request.price() {
        params.set("price", price);
        params.set("timeInForce", TimeInForce::Gtc);
    }

    params
}

/// One-shot placement: builds a client from `credentials` and `settings`,
/// then validates and submits `raw`
pub async fn place_order(
    credentials: Credentials,
    settings: &ClientSettings,
    diagnostics: Diagnostics,
    raw: &RawOrder<'_>,
) -> Result<OrderResult, OrderError> {
    let service = OrderService::connect(credentials, settings, diagnostics)?;
    service.place_order(raw).await
}
