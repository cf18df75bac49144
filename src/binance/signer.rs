//! Request signing
//!
//! Appends a millisecond `timestamp` and a lowercase hex HMAC-SHA256
//! `signature` computed over the form-encoded parameters.

use crate::binance::params::Params;
use crate::config::SecretString;
use crate::error::ConfigError;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

type HmacSha256 = Hmac<Sha256>;

/// Source of wall-clock time in milliseconds since the Unix epoch
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// System wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Clock frozen at a given instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// Signs parameter sets with the account secret
#[derive(Clone)]
pub struct Signer {
    secret: SecretString,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("secret", &self.secret)
            .finish_non_exhaustive()
    }
}

impl Signer {
    pub fn new(secret: SecretString) -> Self {
        Self::with_clock(secret, Arc::new(SystemClock))
    }

    pub fn with_clock(secret: SecretString, clock: Arc<dyn Clock>) -> Self {
        Self { secret, clock }
    }

    /// Signs `params` at the current clock time
    pub fn sign(&self, params: Params) -> Result<Params, ConfigError> {
        self.sign_at(params, self.clock.now_millis())
    }

    /// Signs `params` with an explicit timestamp
    ///
    /// Any stale `signature` is dropped and `timestamp` is set before the
    /// payload is encoded; `signature` is always the last parameter.
    pub fn sign_at(&self, mut params: Params, timestamp: i64) -> Result<Params, ConfigError> {
        params.remove("signature");
        params.set("timestamp", timestamp);

        let signature = self.signature(&params.to_query_string())?;
        params.set("signature", signature);
        Ok(params)
    }

    /// Hex-encoded HMAC-SHA256 of `payload`
    pub fn signature(&self, payload: &str) -> Result<String, ConfigError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|e| ConfigError::InvalidSecret(e.to_string()))?;
        mac.update(payload.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Published example from the Binance API documentation
    const DOC_SECRET: &str = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";
    const DOC_SIGNATURE: &str = "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71";

    fn doc_params() -> Params {
        Params::new()
            .with("symbol", "LTCBTC")
            .with("side", "BUY")
            .with("type", "LIMIT")
            .with("timeInForce", "GTC")
            .with("quantity", "1")
            .with("price", "0.1")
            .with("recvWindow", "5000")
    }

    fn signer() -> Signer {
        Signer::with_clock(
            SecretString::new(DOC_SECRET.to_string()),
            Arc::new(FixedClock(1499827319559)),
        )
    }

    #[test]
    fn test_matches_documented_signature() {
        let signed = signer().sign(doc_params()).unwrap();

        assert_eq!(signed.get("timestamp"), Some("1499827319559"));
        assert_eq!(signed.get("signature"), Some(DOC_SIGNATURE));
        assert_eq!(signed.keys().last(), Some("signature"));
    }

    #[test]
    fn test_deterministic_for_fixed_timestamp() {
        let a = signer().sign_at(doc_params(), 42).unwrap();
        let b = signer().sign_at(doc_params(), 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_any_value_change_changes_signature() {
        let base = signer().sign_at(doc_params(), 42).unwrap();
        let changed = signer()
            .sign_at(doc_params().with("quantity", "2"), 42)
            .unwrap();
        let later = signer().sign_at(doc_params(), 43).unwrap();

        assert_ne!(base.get("signature"), changed.get("signature"));
        assert_ne!(base.get("signature"), later.get("signature"));
    }

    #[test]
    fn test_resigning_replaces_previous_signature() {
        let once = signer().sign_at(doc_params(), 42).unwrap();
        let twice = signer().sign_at(once.clone(), 42).unwrap();

        assert_eq!(once, twice);
        assert_eq!(twice.keys().filter(|k| *k == "signature").count(), 1);
    }

    #[test]
    fn test_signature_is_lowercase_hex() {
        let signature = signer().signature("symbol=BTCUSDT").unwrap();
        assert_eq!(signature.len(), 64);
        assert!(signature
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}
