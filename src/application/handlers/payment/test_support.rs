//! Shared mocks for payment handler tests.
//!
//! The order mock enforces the compare-and-swap contract and commits the
//! entitlement grant under the same lock as the order write, mirroring the
//! real adapters' transactional boundary.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::entitlement::Entitlement;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::payment::Order;
use crate::domain::plan::PlanId;
use crate::ports::{
    EntitlementRepository, GatewayError, GatewayOrder, GatewayOrderRequest, OrderRepository,
    PaymentGateway,
};

#[derive(Default)]
struct Store {
    orders: Vec<Order>,
    entitlements: Vec<Entitlement>,
}

/// In-memory order + entitlement store with one lock as the transactional
/// boundary.
#[derive(Default)]
pub struct MockOrderStore {
    store: Mutex<Store>,
}

impl MockOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order_by_gateway_id(&self, gateway_order_id: &str) -> Option<Order> {
        self.store
            .lock()
            .unwrap()
            .orders
            .iter()
            .find(|o| o.gateway_order_id == gateway_order_id)
            .cloned()
    }

    pub fn orders(&self) -> Vec<Order> {
        self.store.lock().unwrap().orders.clone()
    }

    pub fn entitlements(&self) -> Vec<Entitlement> {
        self.store.lock().unwrap().entitlements.clone()
    }

    pub fn seed_order(&self, order: Order) {
        self.store.lock().unwrap().orders.push(order);
    }
}

#[async_trait]
impl OrderRepository for MockOrderStore {
    async fn insert(&self, order: &Order) -> Result<(), DomainError> {
        let mut store = self.store.lock().unwrap();
        // Same unique-triple contract as the real adapters.
        if store.orders.iter().any(|o| {
            o.user_id == order.user_id
                && o.plan_id == order.plan_id
                && o.idempotency_key == order.idempotency_key
        }) {
            return Err(DomainError::duplicate_order("dedup triple already present"));
        }
        store.orders.push(order.clone());
        Ok(())
    }

    async fn find_by_gateway_order_id(
        &self,
        gateway_order_id: &str,
    ) -> Result<Option<Order>, DomainError> {
        Ok(self.order_by_gateway_id(gateway_order_id))
    }

    async fn find_by_idempotency_key(
        &self,
        user_id: &UserId,
        plan_id: PlanId,
        idempotency_key: &str,
        since: Timestamp,
    ) -> Result<Option<Order>, DomainError> {
        Ok(self
            .store
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
        let mut store = self.store.lock().unwrap();
        let Some(slot) = store.orders.iter_mut().find(|o| o.id == order.id) else {
            return Err(DomainError::new(ErrorCode::OrderNotFound, "Order not found"));
        };
        if slot.version != expected_version {
            return Err(DomainError::conflict("order version changed"));
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
        let mut store = self.store.lock().unwrap();
        let Some(slot) = store.orders.iter_mut().find(|o| o.id == order.id) else {
            return Err(DomainError::new(ErrorCode::OrderNotFound, "Order not found"));
        };
        if slot.version != expected_version {
            return Err(DomainError::conflict("order version changed"));
        }
        *slot = order.clone();
        for prior in store
            .entitlements
            .iter_mut()
            .filter(|e| e.user_id == entitlement.user_id && e.active)
        {
            prior.supersede();
        }
        store.entitlements.push(entitlement.clone());
        Ok(())
    }
}

#[async_trait]
impl EntitlementRepository for MockOrderStore {
    async fn find_active_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Entitlement>, DomainError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .entitlements
            .iter()
            .find(|e| &e.user_id == user_id && e.active)
            .cloned())
    }

    async fn history_for_user(&self, user_id: &UserId) -> Result<Vec<Entitlement>, DomainError> {
        let mut history: Vec<Entitlement> = self
            .store
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

/// Deterministic gateway that hands out sequential order ids.
pub struct MockGateway {
    calls: AtomicU32,
    fail_unavailable: bool,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            calls: AtomicU32::new(0),
            fail_unavailable: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            calls: AtomicU32::new(0),
            fail_unavailable: true,
        }
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_order(
        &self,
        request: GatewayOrderRequest,
    ) -> Result<GatewayOrder, GatewayError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_unavailable {
            return Err(GatewayError::unavailable("connect timeout"));
        }
        Ok(GatewayOrder {
            id: format!("order_gw{:06}", call),
            amount_minor: request.amount_minor,
            currency: request.currency,
        })
    }
}
