use crate::{service, settings};
use binance_futures_order::config::ClientSettings;
use binance_futures_order::error::{FaultKind, OrderError};
use binance_futures_order::order::{RawOrder, ORDER_ENDPOINT};
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;

const ORDER: RawOrder<'static> = RawOrder {
    symbol: "SOLUSDT",
    side: "BUY",
    order_type: "MARKET",
    quantity: "2",
    price: None,
};

#[tokio::test]
async fn test_connection_refused_exhausts_attempts() {
    // Nothing listens on port 1
    let err = service(&settings("http://127.0.0.1:1"))
        .place_order(&ORDER)
        .await
        .unwrap_err();

    match err {
        OrderError::Transport(fault) => {
            assert_eq!(fault.kind, FaultKind::Connect);
            assert_eq!(fault.attempts, 3);
        }
        other => panic!("expected transport fault, got {:?}", other),
    }
}

#[tokio::test]
async fn test_timeouts_are_retried_then_reported() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(ORDER_ENDPOINT);
            then.status(200)
                .delay(Duration::from_secs(2))
                .json_body(json!({"orderId": 1}));
        })
        .await;

    let settings = ClientSettings {
        timeout: Duration::from_millis(100),
        ..settings(&server.base_url())
    };

    let err = service(&settings).place_order(&ORDER).await.unwrap_err();

    assert!(err.is_retryable());
    match err {
        OrderError::Transport(fault) => {
            assert_eq!(fault.kind, FaultKind::Timeout);
            assert_eq!(fault.attempts, 3);
        }
        other => panic!("expected transport fault, got {:?}", other),
    }
    mock.assert_hits_async(3).await;
}

#[tokio::test]
async fn test_server_error_with_json_body_is_not_retried() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(ORDER_ENDPOINT);
            then.status(503)
                .json_body(json!({"code": -1001, "msg": "Internal error; unable to process your request."}));
        })
        .await;

    let err = service(&settings(&server.base_url()))
        .place_order(&ORDER)
        .await
        .unwrap_err();

    assert!(!err.is_retryable());
    assert_eq!(err.error_type(), "api_error");
    mock.assert_hits_async(1).await;
}
