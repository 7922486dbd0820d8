//! HTTP DTOs for the payment endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::entitlement::Entitlement;
use crate::domain::payment::{Order, OrderStatus};
use crate::domain::plan::PlanId;

/// Request to start a plan purchase. The amount is never accepted from
/// the client; it comes from the plan catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    /// Wire name of the plan ("basic", "premium", "enterprise").
    pub plan_type: String,
}

/// Request completing a purchase with the gateway's signed callback.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPaymentRequest {
    pub payment_id: String,
    /// The gateway's order id.
    pub order_id: String,
    /// Hex-encoded HMAC over `order_id|payment_id`.
    pub signature: String,
}

/// An order as shown to clients.
#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub gateway_order_id: String,
    pub plan: PlanId,
    pub amount: u64,
    pub currency: String,
    pub status: OrderStatus,
    pub created_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.to_string(),
            gateway_order_id: order.gateway_order_id,
            plan: order.plan_id,
            amount: order.amount_minor,
            currency: order.currency,
            status: order.status,
            created_at: order.created_at.to_rfc3339(),
        }
    }
}

/// A granted entitlement as shown to clients.
#[derive(Debug, Clone, Serialize)]
pub struct EntitlementResponse {
    pub plan: PlanId,
    pub source_order: String,
    pub granted_at: String,
    pub active: bool,
}

impl From<Entitlement> for EntitlementResponse {
    fn from(entitlement: Entitlement) -> Self {
        Self {
            plan: entitlement.plan_id,
            source_order: entitlement.source_order.to_string(),
            granted_at: entitlement.granted_at.to_rfc3339(),
            active: entitlement.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    #[test]
    fn create_order_request_deserializes() {
        let request: CreateOrderRequest =
            serde_json::from_str(r#"{"plan_type": "premium"}"#).unwrap();
        assert_eq!(request.plan_type, "premium");
    }

    #[test]
    fn verify_request_carries_the_callback_triple() {
        let json = r#"{"payment_id": "pay_1", "order_id": "order_gw1", "signature": "abcd"}"#;
        let request: VerifyPaymentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.order_id, "order_gw1");
    }

    #[test]
    fn order_response_echoes_catalog_amount_and_status() {
        let order = Order::create(UserId::new(), PlanId::Premium, 50_000, "INR", "order_gw1", "k");
        let response = OrderResponse::from(order);
        assert_eq!(response.amount, 50_000);
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""status":"created""#));
        assert!(json.contains(r#""plan":"premium""#));
    }
}
