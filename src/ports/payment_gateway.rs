//! Payment gateway port for external order creation.
//!
//! The gateway is an opaque collaborator: the pipeline asks it to open an
//! order for an amount and receives the gateway's order id back. Callback
//! signature verification is a domain concern and lives in
//! [`SignatureVerifier`], not here.
//!
//! [`SignatureVerifier`]: crate::domain::payment::SignatureVerifier

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;
use crate::domain::plan::PlanId;

/// Request to open an order at the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrderRequest {
    /// Amount in minor currency units, computed from the catalog.
    pub amount_minor: u64,

    /// ISO currency code.
    pub currency: String,

    /// Receipt reference shown in the gateway dashboard.
    pub receipt: String,

    /// Purchasing user, attached as gateway metadata.
    pub user_id: UserId,

    /// Plan being purchased, attached as gateway metadata.
    pub plan_id: PlanId,
}

/// An order as mirrored at the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrder {
    /// The gateway's order id; callbacks reference orders by this.
    pub id: String,

    /// Amount echoed back by the gateway, minor units.
    pub amount_minor: u64,

    /// Currency echoed back by the gateway.
    pub currency: String,
}

/// Errors from gateway operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Timeout or connection failure. The caller may retry with the same
    /// idempotency key; the port itself never retries.
    Unavailable { reason: String },

    /// The gateway actively rejected the request.
    Rejected { reason: String },
}

impl GatewayError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        GatewayError::Unavailable { reason: reason.into() }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        GatewayError::Rejected { reason: reason.into() }
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayError::Unavailable { reason } => write!(f, "gateway unavailable: {}", reason),
            GatewayError::Rejected { reason } => write!(f, "gateway rejected: {}", reason),
        }
    }
}

impl std::error::Error for GatewayError {}

/// Port for the external payment gateway.
///
/// # Contract
///
/// - Calls are bounded by the configured timeout
/// - No automatic retry inside the implementation; duplicate-order safety
///   is the pipeline's idempotency-key dedup, not gateway retries
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open an order at the gateway, returning the gateway order id.
    async fn create_order(&self, request: GatewayOrderRequest) -> Result<GatewayOrder, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn payment_gateway_is_object_safe() {
        fn _accepts_dyn(_gateway: &dyn PaymentGateway) {}
    }

    #[test]
    fn gateway_error_displays_reason() {
        let err = GatewayError::unavailable("connect timeout");
        assert_eq!(err.to_string(), "gateway unavailable: connect timeout");
    }
}
