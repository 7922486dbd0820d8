//! In-memory implementation of OrderRepository + EntitlementRepository.
//!
//! One store, one mutex: `commit_verification` performs the order
//! compare-and-swap, the supersede of the prior entitlement, and the new
//! grant inside a single lock scope, which is this adapter's transactional
//! boundary.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::entitlement::Entitlement;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::payment::Order;
use crate::domain::plan::PlanId;
use crate::ports::{EntitlementRepository, OrderRepository};

#[derive(Default)]
struct Inner {
    orders: Vec<Order>,
    entitlements: Vec<Entitlement>,
}

/// Orders and entitlements behind one lock.
#[derive(Default)]
pub struct InMemoryPaymentStore {
    inner: Mutex<Inner>,
}

impl InMemoryPaymentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryPaymentStore {
    async fn insert(&self, order: &Order) -> Result<(), DomainError> {
        let mut inner = self.inner.lock().unwrap();
        // The dedup triple is unique; the check and the push share the lock.
        if inner.orders.iter().any(|o| {
            o.user_id == order.user_id
                && o.plan_id == order.plan_id
                && o.idempotency_key == order.idempotency_key
        }) {
            return Err(DomainError::duplicate_order(format!(
                "order for key '{}' already exists",
                order.idempotency_key
            )));
        }
        inner.orders.push(order.clone());
        Ok(())
    }

    async fn find_by_gateway_order_id(
        &self,
        gateway_order_id: &str,
    ) -> Result<Option<Order>, DomainError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .orders
            .iter()
            .find(|o| o.gateway_order_id == gateway_order_id)
            .cloned())
    }

    async fn find_by_idempotency_key(
        &self,
        user_id: &UserId,
        plan_id: PlanId,
        idempotency_key: &str,
        since: Timestamp,
    ) -> Result<Option<Order>, DomainError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .orders
            .iter()
            .find(|o| {
                &o.user_id == user_id
                    && o.plan_id == plan_id
                    && o.idempotency_key == idempotency_key
                    && o.created_at.is_after(&since)
            })
            .cloned())
    }

    async fn update(&self, order: &Order, expected_version: u64) -> Result<(), DomainError> {
        let mut inner = self.inner.lock().unwrap();
        let Some(slot) = inner.orders.iter_mut().find(|o| o.id == order.id) else {
            return Err(DomainError::new(ErrorCode::OrderNotFound, "Order not found"));
        };
        if slot.version != expected_version {
            return Err(DomainError::conflict(format!(
                "order {} version {} != expected {}",
                order.id, slot.version, expected_version
            )));
        }
        *slot = order.clone();
        Ok(())
    }

    async fn commit_verification(
        &self,
        order: &Order,
        expected_version: u64,
        entitlement: &Entitlement,
    ) -> Result<(), DomainError> {
        let mut inner = self.inner.lock().unwrap();

        let Some(slot) = inner.orders.iter_mut().find(|o| o.id == order.id) else {
            return Err(DomainError::new(ErrorCode::OrderNotFound, "Order not found"));
        };
        if slot.version != expected_version {
            return Err(DomainError::conflict(format!(
                "order {} version {} != expected {}",
                order.id, slot.version, expected_version
            )));
        }
        *slot = order.clone();

        for prior in inner
            .entitlements
            .iter_mut()
            .filter(|e| e.user_id == entitlement.user_id && e.active)
        {
            prior.supersede();
        }
        inner.entitlements.push(entitlement.clone());
        Ok(())
    }
}

#[async_trait]
impl EntitlementRepository for InMemoryPaymentStore {
    async fn find_active_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Entitlement>, DomainError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .entitlements
            .iter()
            .find(|e| &e.user_id == user_id && e.active)
            .cloned())
    }

    async fn history_for_user(&self, user_id: &UserId) -> Result<Vec<Entitlement>, DomainError> {
        let mut history: Vec<Entitlement> = self
            .inner
            .lock()
            .unwrap()
            .entitlements
            .iter()
            .filter(|e| &e.user_id == user_id)
            .cloned()
            .collect();
        history.sort_by(|a, b| b.granted_at.cmp(&a.granted_at));
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(user: UserId, gateway_id: &str) -> Order {
        Order::create(user, PlanId::Basic, 10_000, "INR", gateway_id, "k1")
    }

    #[tokio::test]
    async fn commit_applies_order_and_entitlement_together() {
        let store = InMemoryPaymentStore::new();
        let user = UserId::new();
        let mut o = order(user, "order_gw1");
        store.insert(&o).await.unwrap();

        let loaded = o.version;
        o.mark_verified().unwrap();
        let ent = Entitlement::grant(user, o.plan_id, o.id);
        store.commit_verification(&o, loaded, &ent).await.unwrap();

        let stored = store.find_by_gateway_order_id("order_gw1").await.unwrap().unwrap();
        assert!(stored.is_terminal());
        assert_eq!(
            store.find_active_by_user(&user).await.unwrap().unwrap().plan_id,
            PlanId::Basic
        );
    }

    #[tokio::test]
    async fn losing_commit_applies_neither_side() {
        let store = InMemoryPaymentStore::new();
        let user = UserId::new();
        let base = order(user, "order_gw1");
        store.insert(&base).await.unwrap();

        // First verification wins.
        let mut winner = base.clone();
        let winner_loaded = winner.version;
        winner.mark_verified().unwrap();
        store
            .commit_verification(
                &winner,
                winner_loaded,
                &Entitlement::grant(user, base.plan_id, base.id),
            )
            .await
            .unwrap();

        // Replay loses the CAS and must leave no second grant.
        let mut replay = base.clone();
        let replay_loaded = replay.version;
        replay.mark_verified().unwrap();
        let err = store
            .commit_verification(
                &replay,
                replay_loaded,
                &Entitlement::grant(user, base.plan_id, base.id),
            )
            .await
            .unwrap_err();

        assert!(err.is_conflict());
        assert_eq!(store.history_for_user(&user).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn new_grant_supersedes_prior_and_keeps_history() {
        let store = InMemoryPaymentStore::new();
        let user = UserId::new();

        let mut first = order(user, "order_gw1");
        store.insert(&first).await.unwrap();
        let loaded = first.version;
        first.mark_verified().unwrap();
        store
            .commit_verification(&first, loaded, &Entitlement::grant(user, PlanId::Basic, first.id))
            .await
            .unwrap();

        let mut second = Order::create(user, PlanId::Premium, 50_000, "INR", "order_gw2", "k2");
        store.insert(&second).await.unwrap();
        let loaded = second.version;
        second.mark_verified().unwrap();
        store
            .commit_verification(
                &second,
                loaded,
                &Entitlement::grant(user, PlanId::Premium, second.id),
            )
            .await
            .unwrap();

        let active = store.find_active_by_user(&user).await.unwrap().unwrap();
        assert_eq!(active.plan_id, PlanId::Premium);
        let history = store.history_for_user(&user).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.iter().filter(|e| e.active).count(), 1);
    }

    #[tokio::test]
    async fn second_insert_with_same_dedup_triple_is_refused() {
        let store = InMemoryPaymentStore::new();
        let user = UserId::new();
        store.insert(&order(user, "order_gw1")).await.unwrap();

        // Same user, plan and key; a fresh gateway mirror does not help.
        let err = store.insert(&order(user, "order_gw2")).await.unwrap_err();
        assert!(err.is_duplicate_order());

        let survivor = store.find_by_gateway_order_id("order_gw1").await.unwrap();
        assert!(survivor.is_some());
        assert!(store
            .find_by_gateway_order_id("order_gw2")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn idempotency_lookup_respects_the_window() {
        let store = InMemoryPaymentStore::new();
        let user = UserId::new();
        let mut stale = order(user, "order_gw1");
        stale.created_at = Timestamp::now().minus_hours(2);
        store.insert(&stale).await.unwrap();

        let window_start = Timestamp::now().minus_hours(1);
        let hit = store
            .find_by_idempotency_key(&user, PlanId::Basic, "k1", window_start)
            .await
            .unwrap();
        assert!(hit.is_none());
    }
}
