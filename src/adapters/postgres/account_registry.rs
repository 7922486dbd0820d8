//! PostgreSQL implementation of AccountRegistry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{AuthError, Role, Timestamp, UserId};
use crate::ports::{AccountRegistry, NewAccount, UserAccount};

/// PostgreSQL implementation of the AccountRegistry port.
pub struct PostgresAccountRegistry {
    pool: PgPool,
}

impl PostgresAccountRegistry {
    /// Creates a new registry over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an account.
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    display_name: String,
    email: String,
    phone: Option<String>,
    role: String,
    password_digest: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for UserAccount {
    type Error = AuthError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let role = parse_role(&row.role)?;
        Ok(UserAccount {
            id: UserId::from_uuid(row.id),
            display_name: row.display_name,
            email: row.email,
            phone: row.phone,
            role,
            password_digest: row.password_digest,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

fn parse_role(s: &str) -> Result<Role, AuthError> {
    Role::parse(s)
        .ok_or_else(|| AuthError::service_unavailable(format!("Invalid role value: {}", s)))
}

fn db_error(e: sqlx::Error) -> AuthError {
    AuthError::service_unavailable(format!("account storage error: {}", e))
}

const SELECT_ACCOUNT: &str = r#"
    SELECT id, display_name, email, phone, role, password_digest, created_at
    FROM users
"#;

#[async_trait]
impl AccountRegistry for PostgresAccountRegistry {
    async fn create(&self, account: NewAccount) -> Result<UserAccount, AuthError> {
        let row: AccountRow = sqlx::query_as(
            r#"
            INSERT INTO users (id, display_name, email, phone, role, password_digest, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, display_name, email, phone, role, password_digest, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&account.display_name)
        .bind(&account.email)
        .bind(&account.phone)
        .bind(account.role.as_str())
        .bind(&account.password_digest)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("users_email_key") {
                    return AuthError::AccountExists;
                }
            }
            db_error(e)
        })?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, AuthError> {
        let row: Option<AccountRow> =
            sqlx::query_as(&format!("{} WHERE id = $1", SELECT_ACCOUNT))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        row.map(UserAccount::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, AuthError> {
        let row: Option<AccountRow> =
            sqlx::query_as(&format!("{} WHERE email = $1", SELECT_ACCOUNT))
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        row.map(UserAccount::try_from).transpose()
    }

    async fn count(&self) -> Result<u64, AuthError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(count as u64)
    }
}
