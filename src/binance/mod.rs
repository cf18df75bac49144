//! Binance API Client
//!
//! Signed REST access to the USDT-M futures API.

pub mod client;
pub mod http;
pub mod params;
pub mod response;
pub mod retry;
pub mod signer;
pub mod types;

// Re-export commonly used types
pub use client::BinanceClient;
pub use http::{HttpExecutor, HttpRequest, HttpResponse, ReqwestExecutor, SendError};
pub use params::Params;
pub use retry::RetryPolicy;
pub use signer::{Clock, FixedClock, Signer, SystemClock};
pub use types::{ApiResponse, OrderType, Side, TimeInForce};
