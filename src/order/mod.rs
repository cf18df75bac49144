//! Order placement
//!
//! Validation of raw order fields, the placement service and CLI report
//! rendering.

pub mod report;
pub mod service;
pub mod types;
pub mod validation;

pub use service::{place_order, OrderService, ORDER_ENDPOINT};
pub use types::{OrderRequest, OrderResult, RawOrder, NOT_AVAILABLE};
pub use validation::validate_order;
