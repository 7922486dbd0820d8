//! Order aggregate entity.
//!
//! An order is terminal after its first verification outcome; replayed
//! callbacks must not re-apply. Repositories persist transitions with a
//! compare-and-swap on the `version` field.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OrderId, StateMachine, Timestamp, UserId};
use crate::domain::plan::PlanId;

use super::PaymentFlowError;

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Persisted locally and mirrored at the gateway, awaiting callback.
    Created,

    /// Callback verified; entitlement granted. Terminal.
    Verified,

    /// Verification failed (tampered signature). Terminal.
    Failed,
}

impl StateMachine for OrderStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use OrderStatus::*;
        matches!((self, target), (Created, Verified) | (Created, Failed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use OrderStatus::*;
        match self {
            Created => vec![Verified, Failed],
            Verified | Failed => vec![],
        }
    }
}

impl OrderStatus {
    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "created",
            OrderStatus::Verified => "verified",
            OrderStatus::Failed => "failed",
        }
    }

    /// Parses a status from its wire representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "created" => Some(OrderStatus::Created),
            "verified" => Some(OrderStatus::Verified),
            "failed" => Some(OrderStatus::Failed),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A plan purchase order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Platform identifier, immutable.
    pub id: OrderId,

    /// Purchasing user.
    pub user_id: UserId,

    /// Plan being purchased.
    pub plan_id: PlanId,

    /// Amount in minor currency units, taken from the catalog.
    pub amount_minor: u64,

    /// ISO currency code.
    pub currency: String,

    /// Identifier assigned by the external gateway; the callback references
    /// orders by this id.
    pub gateway_order_id: String,

    /// Client-supplied key used to deduplicate retried creations.
    pub idempotency_key: String,

    /// Lifecycle status.
    pub status: OrderStatus,

    /// Optimistic-concurrency version, incremented on every mutation.
    pub version: u64,

    /// When the order was created.
    pub created_at: Timestamp,

    /// When the order reached a terminal status.
    pub finalized_at: Option<Timestamp>,
}

impl Order {
    /// Creates an order in `Created` status.
    pub fn create(
        user_id: UserId,
        plan_id: PlanId,
        amount_minor: u64,
        currency: impl Into<String>,
        gateway_order_id: impl Into<String>,
        idempotency_key: impl Into<String>,
    ) -> Self {
        Self {
            id: OrderId::new(),
            user_id,
            plan_id,
            amount_minor,
            currency: currency.into(),
            gateway_order_id: gateway_order_id.into(),
            idempotency_key: idempotency_key.into(),
            status: OrderStatus::Created,
            version: 0,
            created_at: Timestamp::now(),
            finalized_at: None,
        }
    }

    /// True once the order carries a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Marks the order verified.
    ///
    /// # Errors
    ///
    /// `AlreadyFinalized` if the order is already terminal - the replay
    /// guard the verification pipeline relies on.
    pub fn mark_verified(&mut self) -> Result<(), PaymentFlowError> {
        self.transition(OrderStatus::Verified)
    }

    /// Marks the order failed (signature mismatch).
    ///
    /// # Errors
    ///
    /// `AlreadyFinalized` if the order is already terminal.
    pub fn mark_failed(&mut self) -> Result<(), PaymentFlowError> {
        self.transition(OrderStatus::Failed)
    }

    fn transition(&mut self, target: OrderStatus) -> Result<(), PaymentFlowError> {
        if !self.status.can_transition_to(&target) {
            return Err(PaymentFlowError::already_finalized(self.status));
        }
        self.status = target;
        self.version += 1;
        self.finalized_at = Some(Timestamp::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Order {
        Order::create(
            UserId::new(),
            PlanId::Premium,
            50_000,
            "INR",
            "order_G9YabCdEf",
            "idem-1",
        )
    }

    #[test]
    fn created_order_is_not_terminal() {
        let order = order();
        assert_eq!(order.status, OrderStatus::Created);
        assert!(!order.is_terminal());
        assert!(order.finalized_at.is_none());
    }

    #[test]
    fn verify_finalizes_exactly_once() {
        let mut order = order();
        order.mark_verified().unwrap();
        assert_eq!(order.status, OrderStatus::Verified);
        assert!(order.finalized_at.is_some());

        let err = order.mark_verified().unwrap_err();
        assert!(matches!(err, PaymentFlowError::AlreadyFinalized { .. }));
        assert_eq!(order.status, OrderStatus::Verified);
    }

    #[test]
    fn failed_order_cannot_be_verified_later() {
        let mut order = order();
        order.mark_failed().unwrap();
        assert!(order.mark_verified().is_err());
        assert_eq!(order.status, OrderStatus::Failed);
    }

    #[test]
    fn transitions_bump_the_version() {
        let mut order = order();
        assert_eq!(order.version, 0);
        order.mark_verified().unwrap();
        assert_eq!(order.version, 1);
    }

    #[test]
    fn terminal_statuses_admit_no_transition() {
        assert!(OrderStatus::Verified.is_terminal());
        assert!(OrderStatus::Failed.is_terminal());
        assert!(!OrderStatus::Created.is_terminal());
    }
}
