//! Payment-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | UnknownPlan | 400 |
//! | OrderNotFound | 404 |
//! | AlreadyFinalized | 409 |
//! | SignatureMismatch | 400 (logged as a security event) |
//! | GatewayUnavailable | 502 (retryable) |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::DomainError;

use super::OrderStatus;

/// Errors from the order/verification pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentFlowError {
    /// Requested plan does not exist in the catalog or is not purchasable.
    UnknownPlan(String),

    /// No order matches the callback's gateway order id.
    OrderNotFound(String),

    /// The order already carries a terminal status; replayed callbacks land
    /// here and must not re-apply.
    AlreadyFinalized { status: OrderStatus },

    /// Callback signature did not verify. Treated as potential tampering,
    /// never retried.
    SignatureMismatch,

    /// The gateway call timed out or the gateway is unreachable. Safe to
    /// retry with the same idempotency key.
    GatewayUnavailable { reason: String },

    /// The gateway rejected the order request outright.
    GatewayRejected { reason: String },

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl PaymentFlowError {
    pub fn unknown_plan(name: impl Into<String>) -> Self {
        PaymentFlowError::UnknownPlan(name.into())
    }

    pub fn order_not_found(gateway_order_id: impl Into<String>) -> Self {
        PaymentFlowError::OrderNotFound(gateway_order_id.into())
    }

    pub fn already_finalized(status: OrderStatus) -> Self {
        PaymentFlowError::AlreadyFinalized { status }
    }

    pub fn gateway_unavailable(reason: impl Into<String>) -> Self {
        PaymentFlowError::GatewayUnavailable { reason: reason.into() }
    }

    pub fn gateway_rejected(reason: impl Into<String>) -> Self {
        PaymentFlowError::GatewayRejected { reason: reason.into() }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PaymentFlowError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        PaymentFlowError::Infrastructure(message.into())
    }

    /// Returns true if the caller may safely retry with the same
    /// idempotency key.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PaymentFlowError::GatewayUnavailable { .. })
    }

    /// Human-readable message for API responses.
    pub fn message(&self) -> String {
        match self {
            PaymentFlowError::UnknownPlan(name) => format!("Unknown plan '{}'", name),
            PaymentFlowError::OrderNotFound(id) => format!("Order '{}' not found", id),
            PaymentFlowError::AlreadyFinalized { status } => {
                format!("Order already finalized with status '{}'", status)
            }
            PaymentFlowError::SignatureMismatch => "Invalid payment signature".to_string(),
            PaymentFlowError::GatewayUnavailable { reason } => {
                format!("Payment gateway unavailable: {}", reason)
            }
            PaymentFlowError::GatewayRejected { reason } => {
                format!("Payment gateway rejected the order: {}", reason)
            }
            PaymentFlowError::ValidationFailed { field, message } => {
                format!("Invalid {}: {}", field, message)
            }
            PaymentFlowError::Infrastructure(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for PaymentFlowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for PaymentFlowError {}

impl From<DomainError> for PaymentFlowError {
    fn from(err: DomainError) -> Self {
        PaymentFlowError::Infrastructure(err.to_string())
    }
}
