//! Entitlement record.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EntitlementId, OrderId, Timestamp, UserId};
use crate::domain::plan::PlanId;

/// The plan a user holds, with provenance to the purchasing order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entitlement {
    /// Unique identifier.
    pub id: EntitlementId,

    /// Holder of the entitlement.
    pub user_id: UserId,

    /// The granted plan.
    pub plan_id: PlanId,

    /// Order that paid for this entitlement.
    pub source_order: OrderId,

    /// When the grant took effect.
    pub granted_at: Timestamp,

    /// False once superseded by a later grant. History is retained.
    pub active: bool,
}

impl Entitlement {
    /// Creates a fresh, active entitlement.
    pub fn grant(user_id: UserId, plan_id: PlanId, source_order: OrderId) -> Self {
        Self {
            id: EntitlementId::new(),
            user_id,
            plan_id,
            source_order,
            granted_at: Timestamp::now(),
            active: true,
        }
    }

    /// Marks this entitlement as superseded by a newer grant.
    pub fn supersede(&mut self) {
        self.active = false;
    }
}
