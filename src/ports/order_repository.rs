//! Order repository port.
//!
//! Orders are the second resource under exclusive-mutation discipline:
//! every status transition is a compare-and-swap on the version, and the
//! verified-transition-plus-entitlement-grant pair commits inside one
//! transactional boundary so partial application is impossible.

use async_trait::async_trait;

use crate::domain::entitlement::Entitlement;
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::payment::Order;
use crate::domain::plan::PlanId;

/// Repository port for order persistence.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a new order in `Created` status.
    ///
    /// The dedup triple `(user, plan, idempotency_key)` is unique in the
    /// store: of two concurrent creations with one key, exactly one insert
    /// lands.
    ///
    /// # Errors
    ///
    /// - `DuplicateOrder` if an order with the same triple already exists
    async fn insert(&self, order: &Order) -> Result<(), DomainError>;

    /// Find an order by the gateway's order id (the id callbacks carry).
    /// Returns `None` if absent.
    async fn find_by_gateway_order_id(
        &self,
        gateway_order_id: &str,
    ) -> Result<Option<Order>, DomainError>;

    /// Find an order created after `since` matching the dedup triple
    /// `(user, plan, idempotency_key)`. Backs createOrder deduplication.
    async fn find_by_idempotency_key(
        &self,
        user_id: &UserId,
        plan_id: PlanId,
        idempotency_key: &str,
        since: Timestamp,
    ) -> Result<Option<Order>, DomainError>;

    /// Persist a mutated order, compare-and-swap style (used for the
    /// `created → failed` transition).
    ///
    /// # Errors
    ///
    /// - `ConflictingUpdate` if another writer won the race
    /// - `OrderNotFound` if the order does not exist
    async fn update(&self, order: &Order, expected_version: u64) -> Result<(), DomainError>;

    /// Commit a verified order together with its entitlement grant.
    ///
    /// In one transactional boundary: CAS-write the order (same semantics
    /// as [`update`](Self::update)), deactivate the user's prior active
    /// entitlement (record retained), and insert the new one. Either all
    /// three land or none do.
    ///
    /// # Errors
    ///
    /// - `ConflictingUpdate` if another verification won the race
    /// - `OrderNotFound` if the order does not exist
    async fn commit_verification(
        &self,
        order: &Order,
        expected_version: u64,
        entitlement: &Entitlement,
    ) -> Result<(), DomainError>;
}
