//! REST payment gateway adapter.
//!
//! Speaks the order-creation protocol of HMAC-callback gateways
//! (Razorpay-shaped): POST an amount in minor units with basic auth, get
//! the gateway's order id back. The HTTP call carries a bounded timeout
//! and is never retried here; retried client requests are deduplicated
//! upstream via the idempotency key.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::ports::{GatewayError, GatewayOrder, GatewayOrderRequest, PaymentGateway};

/// Default gateway call timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Gateway API configuration.
#[derive(Clone)]
pub struct RestGatewayConfig {
    /// API key id (basic auth username).
    key_id: String,

    /// API key secret (basic auth password).
    key_secret: SecretString,

    /// Base URL of the gateway API.
    base_url: String,

    /// Per-call timeout.
    timeout: Duration,
}

impl RestGatewayConfig {
    pub fn new(
        key_id: impl Into<String>,
        key_secret: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: SecretString::new(key_secret.into()),
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Override the call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Serialize)]
struct CreateOrderBody {
    /// Amount in minor currency units.
    amount: u64,
    currency: String,
    receipt: String,
    notes: OrderNotes,
}

#[derive(Debug, Serialize)]
struct OrderNotes {
    user_id: String,
    plan_type: String,
}

#[derive(Debug, Deserialize)]
struct GatewayOrderResponse {
    id: String,
    amount: u64,
    currency: String,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorResponse {
    #[serde(default)]
    error: GatewayErrorBody,
}

#[derive(Debug, Default, Deserialize)]
struct GatewayErrorBody {
    #[serde(default)]
    description: String,
}

/// REST implementation of the payment gateway port.
pub struct RestPaymentGateway {
    config: RestGatewayConfig,
    http_client: reqwest::Client,
}

impl RestPaymentGateway {
    /// Create a new gateway client with the configured timeout baked into
    /// the underlying HTTP client.
    pub fn new(config: RestGatewayConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();
        Self {
            config,
            http_client,
        }
    }
}

#[async_trait]
impl PaymentGateway for RestPaymentGateway {
    async fn create_order(
        &self,
        request: GatewayOrderRequest,
    ) -> Result<GatewayOrder, GatewayError> {
        let url = format!("{}/v1/orders", self.config.base_url);
        let body = CreateOrderBody {
            amount: request.amount_minor,
            currency: request.currency,
            receipt: request.receipt,
            notes: OrderNotes {
                user_id: request.user_id.to_string(),
                plan_type: request.plan_id.to_string(),
            },
        };

        let response = self
            .http_client
            .post(&url)
            .basic_auth(
                &self.config.key_id,
                Some(self.config.key_secret.expose_secret()),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    GatewayError::unavailable(e.to_string())
                } else {
                    GatewayError::rejected(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_server_error() {
            return Err(GatewayError::unavailable(format!(
                "gateway returned {}",
                status
            )));
        }
        if !status.is_success() {
            let description = response
                .json::<GatewayErrorResponse>()
                .await
                .map(|e| e.error.description)
                .unwrap_or_default();
            return Err(GatewayError::rejected(format!(
                "{} {}",
                status, description
            )));
        }

        let order: GatewayOrderResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::rejected(format!("malformed gateway response: {}", e)))?;

        tracing::debug!(gateway_order_id = %order.id, "gateway order opened");
        Ok(GatewayOrder {
            id: order.id,
            amount_minor: order.amount,
            currency: order.currency,
        })
    }
}
