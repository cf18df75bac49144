//! HTTP execution
//!
//! One outbound attempt, no retries and no status interpretation. The
//! [`HttpExecutor`] trait lets the client run against `reqwest` in production
//! and a scripted executor in tests.

use crate::binance::retry::Fault;
use crate::config::SecretString;
use crate::error::{ConfigError, FaultKind};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Header carrying the API key on every request
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";
/// Content type of POST bodies
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

const USER_AGENT: &str = concat!("binance-futures-order/", env!("CARGO_PKG_VERSION"));

/// A fully encoded request, ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL, including the query string for GET
    pub url: String,
    pub api_key: SecretString,
    /// Form-encoded body for POST
    pub body: Option<String>,
}

/// Raw response: status code and undecoded body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// A single attempt that produced no response
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct SendError {
    pub kind: FaultKind,
    pub message: String,
}

impl SendError {
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl Fault for SendError {
    fn kind(&self) -> FaultKind {
        self.kind
    }
}

impl From<reqwest::Error> for SendError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            FaultKind::Timeout
        } else if err.is_connect() {
            FaultKind::Connect
        } else {
            FaultKind::Other
        };
        SendError::new(kind, err.to_string())
    }
}

/// Performs one HTTP round trip
pub trait HttpExecutor: Send + Sync {
    fn execute(
        &self,
        request: &HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, SendError>> + Send;
}

impl<E: HttpExecutor> HttpExecutor for Arc<E> {
    fn execute(
        &self,
        request: &HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, SendError>> + Send {
        (**self).execute(request)
    }
}

/// `reqwest`-backed executor with a fixed per-call timeout
#[derive(Debug, Clone)]
pub struct ReqwestExecutor {
    client: Client,
}

impl ReqwestExecutor {
    pub fn new(timeout: Duration) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self { client })
    }
}

impl HttpExecutor for ReqwestExecutor {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, SendError> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .header(API_KEY_HEADER, request.api_key.expose_secret());

        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}
