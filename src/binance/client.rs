//! Binance HTTP Client
//!
//! Executes one logical REST request against the futures API: optional
//! signing, form encoding, bounded retries on transient faults, and
//! response classification.

use crate::binance::http::{HttpExecutor, HttpRequest, HttpResponse, ReqwestExecutor};
use crate::binance::params::Params;
use crate::binance::response;
use crate::binance::retry::RetryPolicy;
use crate::binance::signer::Signer;
use crate::config::{ClientSettings, Credentials, SecretString};
use crate::diagnostics::Diagnostics;
use crate::error::{ConfigError, OrderError, TransportFault};
use reqwest::Method;
use serde_json::Value;
use url::Url;

const COMPONENT: &str = "transport";
const LOGGED_BODY_MAX_CHARS: usize = 1000;

/// Binance USDT-M futures REST client
///
/// Generic over the [`HttpExecutor`] performing the actual network call so
/// the retry and classification path can run against a scripted executor.
pub struct BinanceClient<E = ReqwestExecutor> {
    executor: E,
    base_url: String,
    api_key: SecretString,
    signer: Signer,
    retry: RetryPolicy,
    recv_window: Option<u64>,
    diagnostics: Diagnostics,
}

impl<E> std::fmt::Debug for BinanceClient<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key)
            .field("retry", &self.retry)
            .field("recv_window", &self.recv_window)
            .finish_non_exhaustive()
    }
}

impl BinanceClient<ReqwestExecutor> {
    /// Creates a client backed by `reqwest` with the configured timeout
    ///
    /// Fails when the base URL is not an absolute http(s) URL.
    pub fn new(
        credentials: Credentials,
        settings: &ClientSettings,
        diagnostics: Diagnostics,
    ) -> Result<Self, ConfigError> {
        check_base_url(&settings.base_url)?;
        let executor = ReqwestExecutor::new(settings.timeout)?;
        diagnostics.info(
            COMPONENT,
            format!("BinanceClient initialised, base URL: {}", settings.base_url),
        );
        Ok(Self::with_executor(
            executor,
            credentials,
            settings,
            diagnostics,
        ))
    }
}

impl<E: HttpExecutor> BinanceClient<E> {
    pub fn with_executor(
        executor: E,
        credentials: Credentials,
        settings: &ClientSettings,
        diagnostics: Diagnostics,
    ) -> Self {
        diagnostics.debug(
            COMPONENT,
            format!(
                "API key loaded: {}, API secret loaded: {}",
                credentials.api_key, credentials.api_secret
            ),
        );
        Self {
            executor,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: credentials.api_key,
            signer: Signer::new(credentials.api_secret),
            retry: settings.retry,
            recv_window: settings.recv_window,
            diagnostics,
        }
    }

    /// Replaces the signer, e.g. with one reading a fixed clock
    pub fn with_signer(mut self, signer: Signer) -> Self {
        self.signer = signer;
        self
    }

    /// GET with parameters in the query string
    pub async fn get(&self, path: &str, params: Params, signed: bool) -> Result<Value, OrderError> {
        self.diagnostics
            .debug(COMPONENT, format!("GET {} (signed={})", path, signed));
        self.request(Method::GET, path, params, signed).await
    }

    /// POST with parameters in a form-encoded body
    pub async fn post(&self, path: &str, params: Params, signed: bool) -> Result<Value, OrderError> {
        self.diagnostics
            .debug(COMPONENT, format!("POST {} (signed={})", path, signed));
        self.request(Method::POST, path, params, signed).await
    }

    /// Executes one logical request
    ///
    /// Connection failures and timeouts are retried per the retry policy.
    /// Any response that arrives, whatever its status, is classified once
    /// and never retried.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        params: Params,
        signed: bool,
    ) -> Result<Value, OrderError> {
        self.diagnostics
            .info(COMPONENT, format!("Preparing {} request to {}", method, path));
        self.diagnostics.debug(
            COMPONENT,
            format!("Raw params before signing: {}", params.to_query_string()),
        );

        let params = if signed {
            self.sign(params)?
        } else {
            params
        };

        let request = self.build_request(method, path, &params);
        self.diagnostics.info(
            COMPONENT,
            format!(">>> Sending {} {}{}", request.method, self.base_url, path),
        );

        let response = self.send(&request).await?;

        self.diagnostics
            .info(COMPONENT, format!("<<< Response status: {}", response.status));
        self.diagnostics.debug(
            COMPONENT,
            format!(
                "<<< Response body: {}",
                response
                    .body
                    .chars()
                    .take(LOGGED_BODY_MAX_CHARS)
                    .collect::<String>()
            ),
        );

        match response::interpret(response.status, &response.body) {
            Ok(body) => {
                self.diagnostics
                    .debug(COMPONENT, "Request completed successfully");
                Ok(body)
            }
            Err(err) => {
                self.diagnostics.error(COMPONENT, err.to_string());
                Err(err)
            }
        }
    }

    fn sign(&self, mut params: Params) -> Result<Params, ConfigError> {
        if let Some(window) = self.recv_window {
            if !params.contains("recvWindow") {
                params.set("recvWindow", window);
            }
        }

        let signed = self.signer.sign(params)?;
        let signature = signed.get("signature").unwrap_or_default();
        self.diagnostics.debug(
            COMPONENT,
            format!(
                "Signed request at timestamp {}, signature {}...",
                signed.get("timestamp").unwrap_or_default(),
                signature.get(..8).unwrap_or(signature)
            ),
        );
        Ok(signed)
    }

    fn build_request(&self, method: Method, path: &str, params: &Params) -> HttpRequest {
        let mut url = format!("{}{}", self.base_url, path);
        let encoded = params.to_query_string();

        let body = if method == Method::GET {
            if !encoded.is_empty() {
                url.push('?');
                url.push_str(&encoded);
            }
            None
        } else {
            Some(encoded)
        };

        HttpRequest {
            method,
            url,
            api_key: self.api_key.clone(),
            body,
        }
    }

    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportFault> {
        let max_attempts = self.retry.max_attempts();

        self.retry
            .run(
                |attempt| {
                    self.diagnostics
                        .debug(COMPONENT, format!("Attempt {}/{}", attempt, max_attempts));
                    self.executor.execute(request)
                },
                |attempt, err, delay| {
                    self.diagnostics.warn(
                        COMPONENT,
                        format!(
                            "{} on attempt {}/{}: {}",
                            err.kind, attempt, max_attempts, err.message
                        ),
                    );
                    self.diagnostics
                        .debug(COMPONENT, format!("Sleeping {:?} before retry", delay));
                },
            )
            .await
            .map_err(|failure| {
                if failure.exhausted {
                    self.diagnostics.error(
                        COMPONENT,
                        format!(
                            "All {} request attempts failed, giving up: {}",
                            failure.attempts, failure.last
                        ),
                    );
                } else {
                    self.diagnostics.error(
                        COMPONENT,
                        format!(
                            "Request failed on attempt {}: {}",
                            failure.attempts, failure.last
                        ),
                    );
                }
                TransportFault {
                    kind: failure.last.kind,
                    attempts: failure.attempts,
                    message: failure.last.message,
                }
            })
    }
}

fn check_base_url(base_url: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidVar {
        name: "BINANCE_FUTURES_BASE_URL",
        value: base_url.to_string(),
        reason,
    };
    let url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}
