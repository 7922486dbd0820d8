//! PostgreSQL implementation of OrderRepository + EntitlementRepository.
//!
//! `commit_verification` runs the order compare-and-swap, the supersede of
//! the prior active entitlement, and the new grant inside one SQL
//! transaction, which is this adapter's transactional boundary. A lost CAS
//! rolls the whole transaction back, so replayed callbacks can never leave
//! a second grant behind.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entitlement::Entitlement;
use crate::domain::foundation::{
    DomainError, EntitlementId, ErrorCode, OrderId, Timestamp, UserId,
};
use crate::domain::payment::{Order, OrderStatus};
use crate::domain::plan::PlanId;
use crate::ports::{EntitlementRepository, OrderRepository};

/// PostgreSQL implementation of the order/entitlement store.
pub struct PostgresPaymentStore {
    pool: PgPool,
}

impl PostgresPaymentStore {
    /// Creates a new store over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an order.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    user_id: Uuid,
    plan: String,
    amount_minor: i64,
    currency: String,
    gateway_order_id: String,
    idempotency_key: String,
    status: String,
    version: i64,
    created_at: DateTime<Utc>,
    finalized_at: Option<DateTime<Utc>>,
}

impl TryFrom<OrderRow> for Order {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Order {
            id: OrderId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            plan_id: parse_plan(&row.plan)?,
            amount_minor: row.amount_minor as u64,
            currency: row.currency,
            gateway_order_id: row.gateway_order_id,
            idempotency_key: row.idempotency_key,
            status: parse_status(&row.status)?,
            version: row.version as u64,
            created_at: Timestamp::from_datetime(row.created_at),
            finalized_at: row.finalized_at.map(Timestamp::from_datetime),
        })
    }
}

/// Database row representation of an entitlement.
#[derive(Debug, sqlx::FromRow)]
struct EntitlementRow {
    id: Uuid,
    user_id: Uuid,
    plan: String,
    source_order: Uuid,
    granted_at: DateTime<Utc>,
    active: bool,
}

impl TryFrom<EntitlementRow> for Entitlement {
    type Error = DomainError;

    fn try_from(row: EntitlementRow) -> Result<Self, Self::Error> {
        Ok(Entitlement {
            id: EntitlementId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            plan_id: parse_plan(&row.plan)?,
            source_order: OrderId::from_uuid(row.source_order),
            granted_at: Timestamp::from_datetime(row.granted_at),
            active: row.active,
        })
    }
}

fn parse_plan(s: &str) -> Result<PlanId, DomainError> {
    PlanId::parse(s).ok_or_else(|| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid plan value: {}", s))
    })
}

fn parse_status(s: &str) -> Result<OrderStatus, DomainError> {
    OrderStatus::parse(s).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid order status value: {}", s),
        )
    })
}

fn db_error(e: sqlx::Error) -> DomainError {
    DomainError::database(format!("payment storage error: {}", e))
}

const SELECT_ORDER: &str = r#"
    SELECT id, user_id, plan, amount_minor, currency, gateway_order_id,
           idempotency_key, status, version, created_at, finalized_at
    FROM orders
"#;

const SELECT_ENTITLEMENT: &str = r#"
    SELECT id, user_id, plan, source_order, granted_at, active
    FROM entitlements
"#;

/// CAS-guarded order update, usable against the pool or a transaction.
async fn cas_update_order<'e, E>(
    executor: E,
    order: &Order,
    expected_version: u64,
) -> Result<u64, DomainError>
where
    E: sqlx::PgExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        UPDATE orders SET
            status = $3,
            version = $4,
            finalized_at = $5
        WHERE id = $1 AND version = $2
        "#,
    )
    .bind(order.id.as_uuid())
    .bind(expected_version as i64)
    .bind(order.status.as_str())
    .bind(order.version as i64)
    .bind(order.finalized_at.map(|t| *t.as_datetime()))
    .execute(executor)
    .await
    .map_err(db_error)?;

    Ok(result.rows_affected())
}

#[async_trait]
impl OrderRepository for PostgresPaymentStore {
    async fn insert(&self, order: &Order) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO orders (
                id, user_id, plan, amount_minor, currency, gateway_order_id,
                idempotency_key, status, version, created_at, finalized_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(order.user_id.as_uuid())
        .bind(order.plan_id.as_str())
        .bind(order.amount_minor as i64)
        .bind(&order.currency)
        .bind(&order.gateway_order_id)
        .bind(&order.idempotency_key)
        .bind(order.status.as_str())
        .bind(order.version as i64)
        .bind(order.created_at.as_datetime())
        .bind(order.finalized_at.map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("idx_orders_dedup") {
                    return DomainError::duplicate_order(format!(
                        "order for key '{}' already exists",
                        order.idempotency_key
                    ));
                }
            }
            db_error(e)
        })?;

        Ok(())
    }

    async fn find_by_gateway_order_id(
        &self,
        gateway_order_id: &str,
    ) -> Result<Option<Order>, DomainError> {
        let row: Option<OrderRow> =
            sqlx::query_as(&format!("{} WHERE gateway_order_id = $1", SELECT_ORDER))
                .bind(gateway_order_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        row.map(Order::try_from).transpose()
    }

    async fn find_by_idempotency_key(
        &self,
        user_id: &UserId,
        plan_id: PlanId,
        idempotency_key: &str,
        since: Timestamp,
    ) -> Result<Option<Order>, DomainError> {
        let row: Option<OrderRow> = sqlx::query_as(&format!(
            "{} WHERE user_id = $1 AND plan = $2 AND idempotency_key = $3 AND created_at > $4 \
             ORDER BY created_at DESC LIMIT 1",
            SELECT_ORDER
        ))
        .bind(user_id.as_uuid())
        .bind(plan_id.as_str())
        .bind(idempotency_key)
        .bind(since.as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(Order::try_from).transpose()
    }

    async fn update(&self, order: &Order, expected_version: u64) -> Result<(), DomainError> {
        if cas_update_order(&self.pool, order, expected_version).await? == 0 {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM orders WHERE id = $1)")
                    .bind(order.id.as_uuid())
                    .fetch_one(&self.pool)
                    .await
                    .map_err(db_error)?;
            return if exists {
                Err(DomainError::conflict(format!(
                    "order {} version changed under writer",
                    order.id
                )))
            } else {
                Err(DomainError::new(ErrorCode::OrderNotFound, "Order not found"))
            };
        }

        Ok(())
    }

    async fn commit_verification(
        &self,
        order: &Order,
        expected_version: u64,
        entitlement: &Entitlement,
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let updated = cas_update_order(&mut *tx, order, expected_version).await?;
        if updated == 0 {
            // Lost the CAS (or the order vanished); nothing is applied.
            tx.rollback().await.map_err(db_error)?;
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM orders WHERE id = $1)")
                    .bind(order.id.as_uuid())
                    .fetch_one(&self.pool)
                    .await
                    .map_err(db_error)?;
            return if exists {
                Err(DomainError::conflict(format!(
                    "order {} was finalized concurrently",
                    order.id
                )))
            } else {
                Err(DomainError::new(ErrorCode::OrderNotFound, "Order not found"))
            };
        }

        sqlx::query("UPDATE entitlements SET active = FALSE WHERE user_id = $1 AND active")
            .bind(entitlement.user_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        sqlx::query(
            r#"
            INSERT INTO entitlements (id, user_id, plan, source_order, granted_at, active)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(entitlement.id.as_uuid())
        .bind(entitlement.user_id.as_uuid())
        .bind(entitlement.plan_id.as_str())
        .bind(entitlement.source_order.as_uuid())
        .bind(entitlement.granted_at.as_datetime())
        .bind(entitlement.active)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        tx.commit().await.map_err(db_error)
    }
}

#[async_trait]
impl EntitlementRepository for PostgresPaymentStore {
    async fn find_active_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Entitlement>, DomainError> {
        let row: Option<EntitlementRow> = sqlx::query_as(&format!(
            "{} WHERE user_id = $1 AND active LIMIT 1",
            SELECT_ENTITLEMENT
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(Entitlement::try_from).transpose()
    }

    async fn history_for_user(&self, user_id: &UserId) -> Result<Vec<Entitlement>, DomainError> {
        let rows: Vec<EntitlementRow> = sqlx::query_as(&format!(
            "{} WHERE user_id = $1 ORDER BY granted_at DESC",
            SELECT_ENTITLEMENT
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(Entitlement::try_from).collect()
    }
}
