// Library exports for binance-futures-order

pub mod diagnostics; // Injected diagnostic sink
pub mod error;

// Binance API integration modules
pub mod binance; // Signed REST client
pub mod config; // Credentials and client settings

pub mod order; // Validation and order placement
