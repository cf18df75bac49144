// Integration tests against a local mock of the futures REST API
//
// Organized by concern:
// - order_placement: validation, signing and response handling end to end
// - transport: retry behavior on connection failures and timeouts

mod order_placement;
mod transport;

use binance_futures_order::binance::RetryPolicy;
use binance_futures_order::config::{ClientSettings, Credentials};
use binance_futures_order::diagnostics::Diagnostics;
use binance_futures_order::order::OrderService;
use std::time::Duration;

pub const API_KEY: &str = "test-key";
pub const API_SECRET: &str = "test-secret";

/// Settings pointed at `base_url` with immediate retries
pub fn settings(base_url: &str) -> ClientSettings {
    ClientSettings {
        retry: RetryPolicy::new(3, Duration::ZERO),
        ..ClientSettings::with_base_url(base_url)
    }
}

pub fn service(settings: &ClientSettings) -> OrderService {
    let credentials = Credentials::new(API_KEY, API_SECRET).expect("valid credentials");
    OrderService::connect(credentials, settings, Diagnostics::silent()).expect("client builds")
}
