//! PostgreSQL implementation of MediaRepository.
//!
//! Moderation-state writes are a compare-and-swap: the `UPDATE` is guarded
//! by `version = $expected`, so of two concurrent transitions exactly one
//! row-write lands and the loser observes `ConflictingUpdate`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    AlbumId, DomainError, ErrorCode, MediaId, Timestamp, UserId,
};
use crate::domain::media::{MediaItem, MediaKind, ModerationStatus};
use crate::ports::{MediaRepository, MediaStatistics};

/// PostgreSQL implementation of the MediaRepository port.
pub struct PostgresMediaRepository {
    pool: PgPool,
}

impl PostgresMediaRepository {
    /// Creates a new repository over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a media item.
#[derive(Debug, sqlx::FromRow)]
struct MediaRow {
    id: Uuid,
    album_id: Uuid,
    uploader_id: Uuid,
    kind: String,
    storage_key: String,
    url: String,
    caption: Option<String>,
    status: String,
    reporters: Vec<Uuid>,
    version: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<MediaRow> for MediaItem {
    type Error = DomainError;

    fn try_from(row: MediaRow) -> Result<Self, Self::Error> {
        Ok(MediaItem {
            id: MediaId::from_uuid(row.id),
            album_id: AlbumId::from_uuid(row.album_id),
            uploader_id: UserId::from_uuid(row.uploader_id),
            kind: parse_kind(&row.kind)?,
            storage_key: row.storage_key,
            url: row.url,
            caption: row.caption,
            status: parse_status(&row.status)?,
            reporters: row.reporters.into_iter().map(UserId::from_uuid).collect(),
            version: row.version as u64,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

fn parse_kind(s: &str) -> Result<MediaKind, DomainError> {
    MediaKind::parse(s).ok_or_else(|| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid kind value: {}", s))
    })
}

fn parse_status(s: &str) -> Result<ModerationStatus, DomainError> {
    ModerationStatus::parse(s).ok_or_else(|| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid status value: {}", s))
    })
}

fn reporter_uuids(item: &MediaItem) -> Vec<Uuid> {
    item.reporters.iter().map(|r| *r.as_uuid()).collect()
}

fn db_error(e: sqlx::Error) -> DomainError {
    DomainError::database(format!("media storage error: {}", e))
}

const SELECT_MEDIA: &str = r#"
    SELECT id, album_id, uploader_id, kind, storage_key, url, caption,
           status, reporters, version, created_at
    FROM media_items
"#;

#[async_trait]
impl MediaRepository for PostgresMediaRepository {
    async fn insert(&self, item: &MediaItem) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO media_items (
                id, album_id, uploader_id, kind, storage_key, url, caption,
                status, reporters, version, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(item.id.as_uuid())
        .bind(item.album_id.as_uuid())
        .bind(item.uploader_id.as_uuid())
        .bind(item.kind.as_str())
        .bind(&item.storage_key)
        .bind(&item.url)
        .bind(&item.caption)
        .bind(item.status.as_str())
        .bind(reporter_uuids(item))
        .bind(item.version as i64)
        .bind(item.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &MediaId) -> Result<Option<MediaItem>, DomainError> {
        let row: Option<MediaRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_MEDIA))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.map(MediaItem::try_from).transpose()
    }

    async fn update(&self, item: &MediaItem, expected_version: u64) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE media_items SET
                status = $3,
                reporters = $4,
                version = $5
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(item.id.as_uuid())
        .bind(expected_version as i64)
        .bind(item.status.as_str())
        .bind(reporter_uuids(item))
        .bind(item.version as i64)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            // Distinguish a lost race from a missing row.
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM media_items WHERE id = $1)")
                    .bind(item.id.as_uuid())
                    .fetch_one(&self.pool)
                    .await
                    .map_err(db_error)?;
            return if exists {
                Err(DomainError::conflict(format!(
                    "media {} version changed under writer",
                    item.id
                )))
            } else {
                Err(DomainError::new(ErrorCode::MediaNotFound, "Media not found"))
            };
        }

        Ok(())
    }

    async fn list_by_album(&self, album_id: &AlbumId) -> Result<Vec<MediaItem>, DomainError> {
        let rows: Vec<MediaRow> = sqlx::query_as(&format!(
            "{} WHERE album_id = $1 ORDER BY created_at ASC",
            SELECT_MEDIA
        ))
        .bind(album_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(MediaItem::try_from).collect()
    }

    async fn list_flagged(&self) -> Result<Vec<MediaItem>, DomainError> {
        let rows: Vec<MediaRow> = sqlx::query_as(&format!(
            "{} WHERE status = 'flagged' ORDER BY created_at ASC",
            SELECT_MEDIA
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(MediaItem::try_from).collect()
    }

    async fn count_active_by_uploader(&self, uploader: &UserId) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM media_items WHERE uploader_id = $1 AND status != 'rejected'",
        )
        .bind(uploader.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(count as u64)
    }

    async fn statistics(&self, uploaded_since: Timestamp) -> Result<MediaStatistics, DomainError> {
        let (total, flagged, recent): (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE status = 'flagged'),
                   COUNT(*) FILTER (WHERE created_at >= $1)
            FROM media_items
            "#,
        )
        .bind(uploaded_since.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(MediaStatistics {
            total: total as u64,
            flagged: flagged as u64,
            uploaded_since_cutoff: recent as u64,
        })
    }
}
