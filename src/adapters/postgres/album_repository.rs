//! PostgreSQL implementation of AlbumRepository.
//!
//! Albums are read-mostly; the visibility rule is pushed into SQL so the
//! newest-first ordering and the public-or-owned filter hold stably across
//! pages.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::album::{Album, AlbumVisibility};
use crate::domain::foundation::{
    AlbumId, AuthenticatedUser, DomainError, ErrorCode, MediaId, Timestamp, UserId,
};
use crate::ports::{AlbumRepository, Page};

/// PostgreSQL implementation of the AlbumRepository port.
pub struct PostgresAlbumRepository {
    pool: PgPool,
}

impl PostgresAlbumRepository {
    /// Creates a new repository over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an album.
#[derive(Debug, sqlx::FromRow)]
struct AlbumRow {
    id: Uuid,
    owner_id: Uuid,
    title: String,
    theme: Option<String>,
    visibility: String,
    cover_media: Option<Uuid>,
    expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AlbumRow> for Album {
    type Error = DomainError;

    fn try_from(row: AlbumRow) -> Result<Self, Self::Error> {
        Ok(Album {
            id: AlbumId::from_uuid(row.id),
            owner_id: UserId::from_uuid(row.owner_id),
            title: row.title,
            theme: row.theme,
            visibility: parse_visibility(&row.visibility)?,
            cover_media: row.cover_media.map(MediaId::from_uuid),
            expires_at: row.expires_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

fn parse_visibility(s: &str) -> Result<AlbumVisibility, DomainError> {
    AlbumVisibility::parse(s).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid visibility value: {}", s),
        )
    })
}

fn db_error(e: sqlx::Error) -> DomainError {
    DomainError::database(format!("album storage error: {}", e))
}

const SELECT_ALBUM: &str = r#"
    SELECT id, owner_id, title, theme, visibility, cover_media, expires_at, created_at
    FROM albums
"#;

#[async_trait]
impl AlbumRepository for PostgresAlbumRepository {
    async fn insert(&self, album: &Album) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO albums (id, owner_id, title, theme, visibility, cover_media, expires_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(album.id.as_uuid())
        .bind(album.owner_id.as_uuid())
        .bind(&album.title)
        .bind(&album.theme)
        .bind(album.visibility.as_str())
        .bind(album.cover_media.map(|m| *m.as_uuid()))
        .bind(album.expires_at.map(|t| *t.as_datetime()))
        .bind(album.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &AlbumId) -> Result<Option<Album>, DomainError> {
        let row: Option<AlbumRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_ALBUM))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.map(Album::try_from).transpose()
    }

    async fn update(&self, album: &Album) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE albums SET
                title = $2,
                theme = $3,
                visibility = $4,
                cover_media = $5,
                expires_at = $6
            WHERE id = $1
            "#,
        )
        .bind(album.id.as_uuid())
        .bind(&album.title)
        .bind(&album.theme)
        .bind(album.visibility.as_str())
        .bind(album.cover_media.map(|m| *m.as_uuid()))
        .bind(album.expires_at.map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::AlbumNotFound, "Album not found"));
        }

        Ok(())
    }

    async fn list_visible(
        &self,
        viewer: &AuthenticatedUser,
        page: Page,
    ) -> Result<Vec<Album>, DomainError> {
        let rows: Vec<AlbumRow> = if viewer.is_admin() {
            sqlx::query_as(&format!(
                "{} ORDER BY created_at DESC OFFSET $1 LIMIT $2",
                SELECT_ALBUM
            ))
            .bind(page.offset as i64)
            .bind(page.limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?
        } else {
            sqlx::query_as(&format!(
                "{} WHERE visibility = 'public' OR owner_id = $1 \
                 ORDER BY created_at DESC OFFSET $2 LIMIT $3",
                SELECT_ALBUM
            ))
            .bind(viewer.id.as_uuid())
            .bind(page.offset as i64)
            .bind(page.limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?
        };

        rows.into_iter().map(Album::try_from).collect()
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM albums")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(count as u64)
    }
}
