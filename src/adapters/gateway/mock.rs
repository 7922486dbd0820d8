//! Deterministic in-process payment gateway.
//!
//! Used by tests and by deployments that have no gateway credentials
//! configured: orders get sequential ids and always succeed, and the
//! matching callback signatures can be produced with the shared secret.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::ports::{GatewayError, GatewayOrder, GatewayOrderRequest, PaymentGateway};

/// Always-succeeding gateway with sequential order ids.
#[derive(Default)]
pub struct MockPaymentGateway {
    counter: AtomicU64,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_order(
        &self,
        request: GatewayOrderRequest,
    ) -> Result<GatewayOrder, GatewayError> {
        let seq = self.counter.fetch_add(1, Ordering::SeqCst);
        Ok(GatewayOrder {
            id: format!("order_mock{:08}", seq),
            amount_minor: request.amount_minor,
            currency: request.currency,
        })
    }
}
