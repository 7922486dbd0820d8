//! CreateOrderHandler - Command handler for starting a plan purchase.
//!
//! The amount always comes from the plan catalog, never the client. The
//! gateway call is bounded and never retried here; retried client requests
//! are deduplicated on `(user, plan, idempotency key)` within a window, so
//! a double-clicked purchase button cannot open two orders.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, Timestamp};
use crate::domain::payment::{Order, PaymentFlowError};
use crate::domain::plan::PlanCatalog;
use crate::ports::{GatewayError, GatewayOrderRequest, OrderRepository, PaymentGateway};

/// Command to create a purchase order.
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    pub actor: AuthenticatedUser,
    /// Wire name of the plan ("basic", "premium", "enterprise").
    pub plan_name: String,
    /// Client-supplied dedup key for safe retries.
    pub idempotency_key: String,
}

/// Handler for order creation.
pub struct CreateOrderHandler {
    orders: Arc<dyn OrderRepository>,
    gateway: Arc<dyn PaymentGateway>,
    catalog: PlanCatalog,
    /// Dedup window for retried creations, in seconds.
    idempotency_window_secs: u64,
}

impl CreateOrderHandler {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        gateway: Arc<dyn PaymentGateway>,
        idempotency_window_secs: u64,
    ) -> Self {
        Self {
            orders,
            gateway,
            catalog: PlanCatalog::new(),
            idempotency_window_secs,
        }
    }

    pub async fn handle(&self, cmd: CreateOrderCommand) -> Result<Order, PaymentFlowError> {
        // 1. Resolve the plan; the catalog is the only amount source.
        let plan = self
            .catalog
            .find(&cmd.plan_name)
            .ok_or_else(|| PaymentFlowError::unknown_plan(&cmd.plan_name))?;
        if !plan.id.is_paid() {
            return Err(PaymentFlowError::validation(
                "plan_type",
                "the free tier cannot be purchased",
            ));
        }
        if cmd.idempotency_key.trim().is_empty() {
            return Err(PaymentFlowError::validation(
                "idempotency_key",
                "an idempotency key is required",
            ));
        }

        // 2. Deduplicate retried requests inside the window.
        let window_start = window_start_at(Timestamp::now(), self.idempotency_window_secs);
        if let Some(existing) = self
            .orders
            .find_by_idempotency_key(&cmd.actor.id, plan.id, &cmd.idempotency_key, window_start)
            .await?
        {
            tracing::debug!(order_id = %existing.id, "order creation deduplicated");
            return Ok(existing);
        }

        // 3. Mirror the order at the gateway. On failure nothing is
        //    persisted, so retrying with the same key is safe.
        let gateway_order = self
            .gateway
            .create_order(GatewayOrderRequest {
                amount_minor: plan.price_minor,
                currency: plan.currency.to_string(),
                receipt: format!("rcpt_{}", &cmd.idempotency_key),
                user_id: cmd.actor.id,
                plan_id: plan.id,
            })
            .await
            .map_err(|e| match e {
                GatewayError::Unavailable { reason } => {
                    PaymentFlowError::gateway_unavailable(reason)
                }
                GatewayError::Rejected { reason } => PaymentFlowError::gateway_rejected(reason),
            })?;

        // 4. Persist locally; both records now exist. The dedup triple is
        //    unique in the store, so a concurrent creation that slipped
        //    past the read in step 2 loses here instead of landing twice;
        //    the loser is answered with the winner's order.
        let order = Order::create(
            cmd.actor.id,
            plan.id,
            plan.price_minor,
            plan.currency,
            gateway_order.id,
            cmd.idempotency_key.clone(),
        );
        match self.orders.insert(&order).await {
            Ok(()) => {}
            Err(e) if e.is_duplicate_order() => {
                // Unwindowed lookup: the winner exists whatever its age.
                let existing = self
                    .orders
                    .find_by_idempotency_key(
                        &cmd.actor.id,
                        plan.id,
                        &cmd.idempotency_key,
                        Timestamp::from_unix_secs(0),
                    )
                    .await?
                    .ok_or_else(|| {
                        PaymentFlowError::infrastructure(
                            "order vanished while resolving a duplicate creation",
                        )
                    })?;
                tracing::debug!(
                    order_id = %existing.id,
                    "order creation deduplicated on insert"
                );
                return Ok(existing);
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(
            order_id = %order.id,
            gateway_order_id = %order.gateway_order_id,
            plan = %order.plan_id,
            "order created"
        );
        Ok(order)
    }
}

fn window_start_at(now: Timestamp, window_secs: u64) -> Timestamp {
    Timestamp::from_unix_secs(now.as_unix_secs().saturating_sub(window_secs))
}
