//! VerifyPaymentHandler - Command handler for the gateway payment callback.
//!
//! Verification order matters: the MAC is checked before any lookup so a
//! forged callback learns nothing about order existence. A mismatch fails
//! the order (when one exists), is logged as a security event, and is never
//! retried. A valid callback commits the order transition and the
//! entitlement grant in one transactional boundary; replays lose the
//! compare-and-swap and surface as `AlreadyFinalized`.

use std::sync::Arc;

use crate::domain::entitlement::Entitlement;
use crate::domain::foundation::AuthenticatedUser;
use crate::domain::payment::{PaymentFlowError, SignatureVerifier};
use crate::ports::OrderRepository;

/// Command carrying the gateway callback fields.
#[derive(Debug, Clone)]
pub struct VerifyPaymentCommand {
    pub actor: AuthenticatedUser,
    pub payment_id: String,
    /// The gateway's order id.
    pub order_id: String,
    /// Hex-encoded HMAC supplied by the gateway.
    pub signature: String,
}

/// Handler for payment verification.
pub struct VerifyPaymentHandler {
    orders: Arc<dyn OrderRepository>,
    verifier: SignatureVerifier,
}

impl VerifyPaymentHandler {
    pub fn new(orders: Arc<dyn OrderRepository>, verifier: SignatureVerifier) -> Self {
        Self { orders, verifier }
    }

    pub async fn handle(&self, cmd: VerifyPaymentCommand) -> Result<Entitlement, PaymentFlowError> {
        // 1. Recompute and compare the MAC, constant-time.
        if let Err(mismatch) = self
            .verifier
            .verify(&cmd.order_id, &cmd.payment_id, &cmd.signature)
        {
            tracing::warn!(
                target: "keepsake::security",
                gateway_order_id = %cmd.order_id,
                payment_id = %cmd.payment_id,
                caller = %cmd.actor.id,
                "payment callback signature mismatch"
            );
            self.fail_order(&cmd.order_id).await;
            return Err(mismatch);
        }

        // 2. Look up the order the callback references.
        let mut order = self
            .orders
            .find_by_gateway_order_id(&cmd.order_id)
            .await?
            .ok_or_else(|| PaymentFlowError::order_not_found(&cmd.order_id))?;

        // 3. Replay guard: a terminal order is never re-applied.
        if order.is_terminal() {
            return Err(PaymentFlowError::already_finalized(order.status));
        }

        // 4. Transition and grant atomically.
        let loaded_version = order.version;
        order.mark_verified()?;
        let entitlement = Entitlement::grant(order.user_id, order.plan_id, order.id);

        match self
            .orders
            .commit_verification(&order, loaded_version, &entitlement)
            .await
        {
            Ok(()) => {
                tracing::info!(
                    order_id = %order.id,
                    user = %order.user_id,
                    plan = %order.plan_id,
                    "payment verified, entitlement granted"
                );
                Ok(entitlement)
            }
            Err(e) if e.is_conflict() => {
                // A concurrent verification won; report the replay.
                let status = self
                    .orders
                    .find_by_gateway_order_id(&cmd.order_id)
                    .await?
                    .map(|o| o.status)
                    .unwrap_or(order.status);
                Err(PaymentFlowError::already_finalized(status))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Best-effort `created → failed` on signature mismatch. Racing another
    /// outcome is fine; the mismatch error is reported regardless.
    async fn fail_order(&self, gateway_order_id: &str) {
        let Ok(Some(mut order)) = self.orders.find_by_gateway_order_id(gateway_order_id).await
        else {
            return;
        };
        if order.is_terminal() {
            return;
        }
        let loaded_version = order.version;
        if order.mark_failed().is_ok() {
            if let Err(e) = self.orders.update(&order, loaded_version).await {
                tracing::debug!(
                    gateway_order_id,
                    error = %e,
                    "could not mark order failed after signature mismatch"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::payment::test_support::MockOrderStore;
    use crate::domain::foundation::{Role, UserId};
    use crate::domain::payment::{sign_callback, Order, OrderStatus};
    use crate::domain::plan::PlanId;

    const SECRET: &str = "gwsec_test_secret";

    fn actor(id: UserId) -> AuthenticatedUser {
        AuthenticatedUser::new(id, "u@example.com", "U", Role::Member)
    }

    fn seeded_order(store: &MockOrderStore, user: UserId, plan: PlanId) -> Order {
        let order = Order::create(user, plan, 50_000, "INR", "order_gw000001", "k1");
        store.seed_order(order.clone());
        order
    }

    fn handler(store: Arc<MockOrderStore>) -> VerifyPaymentHandler {
        VerifyPaymentHandler::new(store, SignatureVerifier::new(SECRET))
    }

    fn command(user: UserId, order: &Order, signature: String) -> VerifyPaymentCommand {
        VerifyPaymentCommand {
            actor: actor(user),
            payment_id: "pay_123".to_string(),
            order_id: order.gateway_order_id.clone(),
            signature,
        }
    }

    #[tokio::test]
    async fn valid_callback_verifies_order_and_grants_entitlement() {
        let store = Arc::new(MockOrderStore::new());
        let user = UserId::new();
        let order = seeded_order(&store, user, PlanId::Premium);
        let signature = sign_callback(SECRET, &order.gateway_order_id, "pay_123");

        let entitlement = handler(store.clone())
            .handle(command(user, &order, signature))
            .await
            .unwrap();

        assert_eq!(entitlement.user_id, user);
        assert_eq!(entitlement.plan_id, PlanId::Premium);
        assert_eq!(entitlement.source_order, order.id);

        let stored = store.order_by_gateway_id(&order.gateway_order_id).unwrap();
        assert_eq!(stored.status, OrderStatus::Verified);
        assert_eq!(store.entitlements().len(), 1);
    }

    #[tokio::test]
    async fn replayed_callback_grants_exactly_one_entitlement() {
        let store = Arc::new(MockOrderStore::new());
        let user = UserId::new();
        let order = seeded_order(&store, user, PlanId::Premium);
        let signature = sign_callback(SECRET, &order.gateway_order_id, "pay_123");
        let handler = handler(store.clone());

        handler
            .handle(command(user, &order, signature.clone()))
            .await
            .unwrap();
        let err = handler
            .handle(command(user, &order, signature))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PaymentFlowError::AlreadyFinalized {
                status: OrderStatus::Verified
            }
        ));
        assert_eq!(store.entitlements().len(), 1);
    }

    #[tokio::test]
    async fn tampered_signature_fails_the_order_and_grants_nothing() {
        let store = Arc::new(MockOrderStore::new());
        let user = UserId::new();
        let order = seeded_order(&store, user, PlanId::Basic);
        let tampered = sign_callback("wrong_secret", &order.gateway_order_id, "pay_123");

        let err = handler(store.clone())
            .handle(command(user, &order, tampered))
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentFlowError::SignatureMismatch));
        let stored = store.order_by_gateway_id(&order.gateway_order_id).unwrap();
        assert_eq!(stored.status, OrderStatus::Failed);
        assert!(store.entitlements().is_empty());
    }

    #[tokio::test]
    async fn failed_order_rejects_a_later_valid_callback() {
        let store = Arc::new(MockOrderStore::new());
        let user = UserId::new();
        let order = seeded_order(&store, user, PlanId::Basic);
        let handler = handler(store.clone());

        let tampered = sign_callback("wrong_secret", &order.gateway_order_id, "pay_123");
        handler
            .handle(command(user, &order, tampered))
            .await
            .unwrap_err();

        let valid = sign_callback(SECRET, &order.gateway_order_id, "pay_123");
        let err = handler.handle(command(user, &order, valid)).await.unwrap_err();

        assert!(matches!(
            err,
            PaymentFlowError::AlreadyFinalized {
                status: OrderStatus::Failed
            }
        ));
        assert!(store.entitlements().is_empty());
    }

    #[tokio::test]
    async fn callback_for_unknown_order_is_not_found() {
        let store = Arc::new(MockOrderStore::new());
        let signature = sign_callback(SECRET, "order_ghost", "pay_123");

        let err = handler(store)
            .handle(VerifyPaymentCommand {
                actor: actor(UserId::new()),
                payment_id: "pay_123".to_string(),
                order_id: "order_ghost".to_string(),
                signature,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentFlowError::OrderNotFound(_)));
    }

    #[tokio::test]
    async fn upgrade_supersedes_the_prior_entitlement() {
        let store = Arc::new(MockOrderStore::new());
        let user = UserId::new();
        let handler = handler(store.clone());

        let basic = Order::create(user, PlanId::Basic, 10_000, "INR", "order_gw_a", "ka");
        store.seed_order(basic.clone());
        let sig = sign_callback(SECRET, "order_gw_a", "pay_a");
        handler
            .handle(VerifyPaymentCommand {
                actor: actor(user),
                payment_id: "pay_a".to_string(),
                order_id: "order_gw_a".to_string(),
                signature: sig,
            })
            .await
            .unwrap();

        let premium = Order::create(user, PlanId::Premium, 50_000, "INR", "order_gw_b", "kb");
        store.seed_order(premium.clone());
        let sig = sign_callback(SECRET, "order_gw_b", "pay_b");
        handler
            .handle(VerifyPaymentCommand {
                actor: actor(user),
                payment_id: "pay_b".to_string(),
                order_id: "order_gw_b".to_string(),
                signature: sig,
            })
            .await
            .unwrap();

        let all = store.entitlements();
        assert_eq!(all.len(), 2);
        let active: Vec<_> = all.iter().filter(|e| e.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].plan_id, PlanId::Premium);
        assert_eq!(active[0].source_order, premium.id);
    }
}
