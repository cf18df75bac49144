//! Client Settings
//!
//! Endpoint, timeout and retry configuration for the REST client.

use crate::binance::retry::RetryPolicy;
use crate::error::ConfigError;
use std::str::FromStr;
use std::time::Duration;

/// USDT-M futures testnet
pub const DEFAULT_BASE_URL: &str = "https://testnet.binancefuture.com";
/// Fixed per-call timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// REST client settings
///
/// ## Environment Variables
///
/// - `BINANCE_FUTURES_BASE_URL`: API base URL (default: https://testnet.binancefuture.com)
/// - `BINANCE_REQUEST_TIMEOUT_SECS`: Per-call timeout (default: 10)
/// - `BINANCE_MAX_ATTEMPTS`: Total attempts on transient faults (default: 3)
/// - `BINANCE_RETRY_BACKOFF_MS`: Linear backoff base (default: 1000)
/// - `BINANCE_RECV_WINDOW_MS`: Optional `recvWindow` for signed requests (default: unset)
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
    pub recv_window: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry: RetryPolicy::default(),
            recv_window: None,
        }
    }
}

impl ClientSettings {
    /// Settings pointed at `base_url`, defaults elsewhere
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("BINANCE_FUTURES_BASE_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if base_url.is_empty() {
            return Err(ConfigError::EmptyVar("BINANCE_FUTURES_BASE_URL"));
        }

        let timeout_secs: u64 =
            parse_var(&lookup, "BINANCE_REQUEST_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidVar {
                name: "BINANCE_REQUEST_TIMEOUT_SECS",
                value: "0".to_string(),
                reason: "timeout must be at least one second".to_string(),
            });
        }
        let max_attempts: u32 = parse_var(
            &lookup,
            "BINANCE_MAX_ATTEMPTS",
            RetryPolicy::DEFAULT_MAX_ATTEMPTS,
        )?;
        if max_attempts == 0 {
            return Err(ConfigError::InvalidVar {
                name: "BINANCE_MAX_ATTEMPTS",
                value: "0".to_string(),
                reason: "at least one attempt is required".to_string(),
            });
        }
        let backoff_ms: u64 = parse_var(
            &lookup,
            "BINANCE_RETRY_BACKOFF_MS",
            RetryPolicy::DEFAULT_BASE_DELAY.as_millis() as u64,
        )?;
        let recv_window = match lookup("BINANCE_RECV_WINDOW_MS") {
            Some(raw) => Some(parse_value("BINANCE_RECV_WINDOW_MS", &raw)?),
            None => None,
        };

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            retry: RetryPolicy::new(max_attempts, Duration::from_millis(backoff_ms)),
            recv_window,
        })
    }
}

fn parse_var<T, F>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => parse_value(name, &raw),
        None => Ok(default),
    }
}

fn parse_value<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidVar {
        name,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
