//! API Credential Management
//!
//! Binance testnet credentials loaded from environment variables.
//! Credentials are never logged in full and are masked when displayed.

use crate::error::ConfigError;
use std::fmt;

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "BINANCE_TESTNET_API_KEY";
/// Environment variable holding the API secret
pub const API_SECRET_VAR: &str = "BINANCE_TESTNET_API_SECRET";

/// Secure string wrapper that masks sensitive data in logs
///
/// Debug output shows only `SecretString(***)` and Display shows the
/// truncated form `first4...last4`.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(value: String) -> Self {
        SecretString(value)
    }

    /// Returns a reference to the inner string
    ///
    /// Only use this when actually needed for signing or the API key header.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Format: `first4...last4` (e.g., "abcd...wxyz"), `***` for short values
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 8 {
            return "***".to_string();
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretString(***)")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        SecretString::new(s)
    }
}

/// Binance API credentials
///
/// Immutable once loaded; both parts are guaranteed non-empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    /// Sent as the `X-MBX-APIKEY` header on every request
    pub api_key: SecretString,
    /// HMAC-SHA256 signing key
    pub api_secret: SecretString,
}

impl Credentials {
    /// Builds credentials from explicit values, trimming whitespace
    pub fn new(api_key: &str, api_secret: &str) -> Result<Self, ConfigError> {
        let api_key = api_key.trim();
        let api_secret = api_secret.trim();

        if api_key.is_empty() {
            return Err(ConfigError::EmptyVar(API_KEY_VAR));
        }
        if api_secret.is_empty() {
            return Err(ConfigError::EmptyVar(API_SECRET_VAR));
        }

        Ok(Self {
            api_key: SecretString::new(api_key.to_string()),
            api_secret: SecretString::new(api_secret.to_string()),
        })
    }

    /// Loads credentials from `BINANCE_TESTNET_API_KEY` and `BINANCE_TESTNET_API_SECRET`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads credentials through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR).ok_or(ConfigError::MissingVar(API_KEY_VAR))?;
        let api_secret = lookup(API_SECRET_VAR).ok_or(ConfigError::MissingVar(API_SECRET_VAR))?;
        Self::new(&api_key, &api_secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_loads_and_trims() {
        let creds = Credentials::from_lookup(lookup_from(&[
            (API_KEY_VAR, "  key-1234567890  "),
            (API_SECRET_VAR, "secret-abcdefgh\n"),
        ]))
        .unwrap();

        assert_eq!(creds.api_key.expose_secret(), "key-1234567890");
        assert_eq!(creds.api_secret.expose_secret(), "secret-abcdefgh");
    }

    #[test]
    fn test_missing_secret_is_config_error() {
        let err = Credentials::from_lookup(lookup_from(&[(API_KEY_VAR, "key")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar(API_SECRET_VAR));
    }

    #[test]
    fn test_blank_key_is_config_error() {
        let err = Credentials::new("   ", "secret").unwrap_err();
        assert_eq!(err, ConfigError::EmptyVar(API_KEY_VAR));
    }

    #[test]
    fn test_secret_never_printed_in_full() {
        let secret = SecretString::new("abcd1234efgh5678".to_string());
        assert_eq!(format!("{:?}", secret), "SecretString(***)");
        assert_eq!(secret.to_string(), "abcd...5678");
        assert_eq!(SecretString::new("short".to_string()).masked(), "***");
    }
}
