//! Response classification
//!
//! Turns a raw status code and body into the decoded JSON body on success,
//! an [`ApiError`] when the exchange rejected the request, or a
//! [`MalformedResponse`] when the body could not be interpreted at all.

use crate::binance::types::ApiResponse;
use crate::error::{ApiError, MalformedResponse, OrderError};
use serde_json::Value;

/// Raw-body excerpt used as the message when an error body has no `msg`
pub const ERROR_MESSAGE_MAX_CHARS: usize = 200;
/// Raw-body excerpt kept for unparseable bodies
pub const MALFORMED_SNIPPET_MAX_CHARS: usize = 500;

/// Decodes `body` as JSON
pub fn decode(status: u16, body: &str) -> Result<ApiResponse, MalformedResponse> {
    serde_json::from_str(body)
        .map(|body| ApiResponse { status, body })
        .map_err(|_| MalformedResponse {
            status,
            body_snippet: snippet(body, MALFORMED_SNIPPET_MAX_CHARS),
        })
}

/// Splits a decoded response into success data or an exchange rejection
///
/// A response is a rejection when the status is 400 or above, or when the
/// body is an object whose numeric `code` is negative.
pub fn classify(response: ApiResponse, raw_body: &str) -> Result<Value, ApiError> {
    let api_code = response.body.get("code").and_then(numeric_code);

    if response.status < 400 && !api_code.is_some_and(|code| code < 0) {
        return Ok(response.body);
    }

    let code = api_code.unwrap_or(i64::from(response.status));
    let message = match response.body.get("msg") {
        Some(Value::String(msg)) => msg.clone(),
        Some(Value::Null) | None => snippet(raw_body, ERROR_MESSAGE_MAX_CHARS),
        Some(other) => other.to_string(),
    };

    Err(ApiError {
        http_status: response.status,
        code,
        message,
    })
}

/// Decode then classify
pub fn interpret(status: u16, body: &str) -> Result<Value, OrderError> {
    let response = decode(status, body)?;
    Ok(classify(response, body)?)
}

/// Integer value of a numeric `code`; fractions are floored so the sign is kept
fn numeric_code(code: &Value) -> Option<i64> {
    code.as_i64()
        .or_else(|| code.as_f64().map(|c| c.floor() as i64))
}

fn snippet(body: &str, max_chars: usize) -> String {
    body.chars().take(max_chars).collect()
}
