use crate::{service, settings, API_KEY, API_SECRET};
use binance_futures_order::config::{ClientSettings, Credentials};
use binance_futures_order::diagnostics::Diagnostics;
use binance_futures_order::error::{ConfigError, Field, OrderError};
use binance_futures_order::order::{place_order, RawOrder, ORDER_ENDPOINT};
use httpmock::prelude::*;
use serde_json::json;

fn market_buy() -> RawOrder<'static> {
    RawOrder {
        symbol: "btcusdt",
        side: "buy",
        order_type: "market",
        quantity: "0.01",
        price: None,
    }
}

#[tokio::test]
async fn test_market_order_is_placed() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(ORDER_ENDPOINT)
                .header("X-MBX-APIKEY", API_KEY)
                .header("content-type", "application/x-www-form-urlencoded");
            then.status(200).json_body(json!({
                "orderId": 4056029187u64,
                "clientOrderId": "x-mock",
                "symbol": "BTCUSDT",
                "side": "BUY",
                "type": "MARKET",
                "status": "NEW",
                "origQty": "0.010",
                "executedQty": "0.000",
                "avgPrice": "0.00",
                "price": "0.00",
                "timeInForce": "GTC"
            }));
        })
        .await;

    let result = service(&settings(&server.base_url()))
        .place_order(&market_buy())
        .await
        .unwrap();

    mock.assert_hits_async(1).await;
    assert_eq!(result.order_id, "4056029187");
    assert_eq!(result.symbol, "BTCUSDT");
    assert_eq!(result.status, "NEW");
}

#[tokio::test]
async fn test_limit_order_reports_missing_fields() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(ORDER_ENDPOINT);
            then.status(200).json_body(json!({"orderId": 12, "status": "NEW"}));
        })
        .await;

    let result = service(&settings(&server.base_url()))
        .place_order(&RawOrder {
            symbol: "ETHUSDT",
            side: "SELL",
            order_type: "LIMIT",
            quantity: "0.5",
            price: Some("3500"),
        })
        .await
        .unwrap();

    mock.assert_hits_async(1).await;
    assert_eq!(result.order_id, "12");
    assert_eq!(result.avg_price, "N/A");
    assert_eq!(result.time_in_force, "N/A");
}

#[tokio::test]
async fn test_api_rejection_is_not_retried() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(ORDER_ENDPOINT);
            then.status(400).json_body(json!({
                "code": -1021,
                "msg": "Timestamp for this request is outside of the recvWindow."
            }));
        })
        .await;

    let err = service(&settings(&server.base_url()))
        .place_order(&market_buy())
        .await
        .unwrap_err();

    mock.assert_hits_async(1).await;
    match err {
        OrderError::Api(api) => {
            assert_eq!(api.http_status, 400);
            assert_eq!(api.code, -1021);
            assert_eq!(api.reason(), Some("invalid_timestamp"));
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_negative_code_on_success_status_is_rejection() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(ORDER_ENDPOINT);
            then.status(200)
                .json_body(json!({"code": -2019, "msg": "Margin is insufficient."}));
        })
        .await;

    let err = service(&settings(&server.base_url()))
        .place_order(&market_buy())
        .await
        .unwrap_err();

    assert_eq!(err.error_type(), "api_error");
}

#[tokio::test]
async fn test_html_error_page_is_malformed_response() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(ORDER_ENDPOINT);
            then.status(502)
                .header("content-type", "text/html")
                .body("<html><body>Bad Gateway</body></html>");
        })
        .await;

    let err = service(&settings(&server.base_url()))
        .place_order(&market_buy())
        .await
        .unwrap_err();

    mock.assert_hits_async(1).await;
    match err {
        OrderError::MalformedResponse(malformed) => {
            assert_eq!(malformed.status, 502);
            assert!(malformed.body_snippet.contains("Bad Gateway"));
        }
        other => panic!("expected malformed response, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_order_never_reaches_server() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(ORDER_ENDPOINT);
            then.status(200).json_body(json!({"orderId": 1}));
        })
        .await;

    let err = service(&settings(&server.base_url()))
        .place_order(&RawOrder {
            symbol: "BTCUSDT",
            side: "BUY",
            order_type: "LIMIT",
            quantity: "0.01",
            price: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::Validation(ref v) if v.field == Field::Price));
    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_one_shot_placement() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(ORDER_ENDPOINT)
                .header("X-MBX-APIKEY", API_KEY);
            then.status(200)
                .json_body(json!({"orderId": 555, "status": "FILLED", "executedQty": "0.010"}));
        })
        .await;

    let credentials = Credentials::new(API_KEY, API_SECRET).unwrap();
    let result = place_order(
        credentials,
        &settings(&server.base_url()),
        Diagnostics::silent(),
        &market_buy(),
    )
    .await
    .unwrap();

    mock.assert_hits_async(1).await;
    assert_eq!(result.order_id, "555");
    assert_eq!(result.status, "FILLED");
    assert_eq!(result.executed_qty, "0.010");
    assert_eq!(result.client_order_id, "N/A");
}

#[tokio::test]
async fn test_one_shot_placement_reports_unusable_base_url() {
    let credentials = Credentials::new(API_KEY, API_SECRET).unwrap();

    let err = place_order(
        credentials,
        &ClientSettings::with_base_url("testnet.binancefuture.com"),
        Diagnostics::silent(),
        &market_buy(),
    )
    .await
    .unwrap_err();

    assert_eq!(err.error_type(), "configuration_error");
    assert!(matches!(
        err,
        OrderError::Configuration(ConfigError::InvalidVar {
            name: "BINANCE_FUTURES_BASE_URL",
            ..
        })
    ));
}
