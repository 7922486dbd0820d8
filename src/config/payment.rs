//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (HMAC-callback gateway)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Gateway API key id (basic auth username)
    pub key_id: String,

    /// Gateway API key secret (basic auth password)
    pub key_secret: SecretString,

    /// Shared secret the gateway signs callbacks with
    pub callback_secret: SecretString,

    /// Base URL of the gateway API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-call timeout in seconds; calls are never retried in-pipeline
    #[serde(default = "default_gateway_timeout")]
    pub gateway_timeout_secs: u64,

    /// Dedup window for retried order creations, in seconds
    #[serde(default = "default_idempotency_window")]
    pub idempotency_window_secs: u64,
}

impl PaymentConfig {
    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.key_id.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__KEY_ID"));
        }
        if self.key_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__KEY_SECRET"));
        }
        if self.callback_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__CALLBACK_SECRET"));
        }
        if self.gateway_timeout_secs == 0 || self.gateway_timeout_secs > 60 {
            return Err(ValidationError::InvalidGatewayTimeout);
        }
        if self.idempotency_window_secs < 60 || self.idempotency_window_secs > 3600 {
            return Err(ValidationError::InvalidIdempotencyWindow);
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "https://api.gateway.example".to_string()
}

fn default_gateway_timeout() -> u64 {
    10
}

fn default_idempotency_window() -> u64 {
    900
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PaymentConfig {
        PaymentConfig {
            key_id: "key_test_abc".to_string(),
            key_secret: SecretString::new("secret".to_string()),
            callback_secret: SecretString::new("cbsecret".to_string()),
            base_url: default_base_url(),
            gateway_timeout_secs: default_gateway_timeout(),
            idempotency_window_secs: default_idempotency_window(),
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn missing_secrets_are_rejected() {
        let mut cfg = config();
        cfg.key_secret = SecretString::new(String::new());
        assert!(cfg.validate().is_err());

        let mut cfg = config();
        cfg.callback_secret = SecretString::new(String::new());
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn timeout_bounds_are_enforced() {
        let mut cfg = config();
        cfg.gateway_timeout_secs = 0;
        assert!(cfg.validate().is_err());
        cfg.gateway_timeout_secs = 120;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn idempotency_window_bounds_are_enforced() {
        let mut cfg = config();
        cfg.idempotency_window_secs = 10;
        assert!(cfg.validate().is_err());
        cfg.idempotency_window_secs = 7200;
        assert!(cfg.validate().is_err());
    }
}
