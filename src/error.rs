use thiserror::Error;

/// Order fields checked by the validator, in validation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Symbol,
    Side,
    OrderType,
    Quantity,
    Price,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Symbol => "symbol",
            Field::Side => "side",
            Field::OrderType => "order type",
            Field::Quantity => "quantity",
            Field::Price => "price",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller input violates a field contract
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: Field,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: Field, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Credentials or client settings are missing or unusable
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} not set. Add it to a .env file or export it as an environment variable")]
    MissingVar(&'static str),

    #[error("{0} is empty after trimming whitespace")]
    EmptyVar(&'static str),

    #[error("{name} has invalid value '{value}': {reason}")]
    InvalidVar {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid API secret: {0}")]
    InvalidSecret(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Classification of a failed network attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// Connection refused, reset, DNS failure
    Connect,
    /// No response within the per-call timeout
    Timeout,
    /// Anything else the HTTP stack reports (request build, body decode, ...)
    Other,
}

impl FaultKind {
    /// Only faults with no indication the server processed the request
    pub fn is_transient(&self) -> bool {
        matches!(self, FaultKind::Connect | FaultKind::Timeout)
    }
}

impl std::fmt::Display for FaultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FaultKind::Connect => f.write_str("connection error"),
            FaultKind::Timeout => f.write_str("timeout"),
            FaultKind::Other => f.write_str("request error"),
        }
    }
}

/// Network-level failure surfaced after the retry budget is spent,
/// or on the first non-transient fault
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} after {attempts} attempt(s): {message}")]
pub struct TransportFault {
    pub kind: FaultKind,
    pub attempts: u32,
    pub message: String,
}

/// The server answered, but the body is not JSON
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("HTTP {status}: response body is not valid JSON: {body_snippet}")]
pub struct MalformedResponse {
    pub status: u16,
    pub body_snippet: String,
}

/// Authoritative rejection by the exchange
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Binance API Error [{http_status}] code={code} msg={message}")]
pub struct ApiError {
    pub http_status: u16,
    pub code: i64,
    pub message: String,
}

impl ApiError {
    /// Short label for well-known rejection causes
    pub fn reason(&self) -> Option<&'static str> {
        match (self.http_status, self.code) {
            (_, -1022) => Some("invalid_signature"),
            (_, -1021) => Some("invalid_timestamp"),
            (_, -2015) => Some("invalid_api_key_or_permissions"),
            (_, -2014) => Some("invalid_api_key_format"),
            (401, _) => Some("unauthorized"),
            (403, _) => Some("forbidden"),
            (429, _) => Some("rate_limited"),
            _ => None,
        }
    }
}

/// Every way placing an order can fail
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Transport fault: {0}")]
    Transport(#[from] TransportFault),

    #[error("Malformed response: {0}")]
    MalformedResponse(#[from] MalformedResponse),

    #[error("{0}")]
    Api(#[from] ApiError),
}

impl OrderError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, OrderError::Transport(fault) if fault.kind.is_transient())
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            OrderError::Validation(_) => "validation_error",
            OrderError::Configuration(_) => "configuration_error",
            OrderError::Transport(_) => "transport_fault",
            OrderError::MalformedResponse(_) => "malformed_response",
            OrderError::Api(_) => "api_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, OrderError>;
