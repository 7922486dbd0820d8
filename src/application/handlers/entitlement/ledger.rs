//! EntitlementLedger - the read side of plan entitlements.
//!
//! Grants themselves commit inside the order verification transaction; the
//! ledger answers "what plan does this user hold" and "may they upload
//! more", both pure reads.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::plan::{Plan, PlanCatalog};
use crate::ports::{EntitlementRepository, MediaRepository};

/// Ledger over entitlement records and the plan catalog.
pub struct EntitlementLedger {
    entitlements: Arc<dyn EntitlementRepository>,
    media: Arc<dyn MediaRepository>,
    catalog: PlanCatalog,
}

impl EntitlementLedger {
    pub fn new(
        entitlements: Arc<dyn EntitlementRepository>,
        media: Arc<dyn MediaRepository>,
    ) -> Self {
        Self {
            entitlements,
            media,
            catalog: PlanCatalog::new(),
        }
    }

    /// The user's active plan; the catalog's free tier when no entitlement
    /// exists.
    pub async fn active_plan(&self, user_id: &UserId) -> Result<&'static Plan, DomainError> {
        match self.entitlements.find_active_by_user(user_id).await? {
            Some(entitlement) => Ok(self.catalog.get(entitlement.plan_id)),
            None => Ok(self.catalog.default_plan()),
        }
    }

    /// True iff one more upload stays within the active plan's limit.
    ///
    /// Counts the user's non-rejected media; rejected items do not consume
    /// quota.
    pub async fn check_upload_quota(&self, user_id: &UserId) -> Result<bool, DomainError> {
        let plan = self.active_plan(user_id).await?;
        let used = self.media.count_active_by_uploader(user_id).await?;
        Ok(plan.within_upload_limit(used.min(u32::MAX as u64) as u32))
    }

    /// The active plan's upload limit, `None` for unlimited. Used to
    /// phrase quota errors.
    pub async fn upload_limit(&self, user_id: &UserId) -> Result<Option<u32>, DomainError> {
        Ok(self.active_plan(user_id).await?.upload_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entitlement::Entitlement;
    use crate::domain::foundation::{AlbumId, OrderId, Timestamp};
    use crate::domain::media::MediaItem;
    use crate::domain::plan::PlanId;
    use crate::ports::MediaStatistics;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StubEntitlements {
        active: Option<Entitlement>,
    }

    #[async_trait]
    impl EntitlementRepository for StubEntitlements {
        async fn find_active_by_user(
            &self,
            _user_id: &UserId,
        ) -> Result<Option<Entitlement>, DomainError> {
            Ok(self.active.clone())
        }

        async fn history_for_user(
            &self,
            _user_id: &UserId,
        ) -> Result<Vec<Entitlement>, DomainError> {
            Ok(self.active.clone().into_iter().collect())
        }
    }

    struct StubMedia {
        uploaded: Mutex<u64>,
    }

    #[async_trait]
    impl MediaRepository for StubMedia {
        async fn insert(&self, _item: &MediaItem) -> Result<(), DomainError> {
            Ok(())
        }

        async fn find_by_id(
            &self,
            _id: &crate::domain::foundation::MediaId,
        ) -> Result<Option<MediaItem>, DomainError> {
            Ok(None)
        }

        async fn update(
            &self,
            _item: &MediaItem,
            _expected_version: u64,
        ) -> Result<(), DomainError> {
            Ok(())
        }

        async fn list_by_album(&self, _album_id: &AlbumId) -> Result<Vec<MediaItem>, DomainError> {
            Ok(vec![])
        }

        async fn list_flagged(&self) -> Result<Vec<MediaItem>, DomainError> {
            Ok(vec![])
        }

        async fn count_active_by_uploader(&self, _uploader: &UserId) -> Result<u64, DomainError> {
            Ok(*self.uploaded.lock().unwrap())
        }

        async fn statistics(
            &self,
            _uploaded_since: Timestamp,
        ) -> Result<MediaStatistics, DomainError> {
            Ok(MediaStatistics::default())
        }
    }

    fn ledger(active: Option<Entitlement>, uploaded: u64) -> EntitlementLedger {
        EntitlementLedger::new(
            Arc::new(StubEntitlements { active }),
            Arc::new(StubMedia {
                uploaded: Mutex::new(uploaded),
            }),
        )
    }

    #[tokio::test]
    async fn active_plan_defaults_to_free_tier() {
        let ledger = ledger(None, 0);
        let plan = ledger.active_plan(&UserId::new()).await.unwrap();
        assert_eq!(plan.id, PlanId::Free);
    }

    #[tokio::test]
    async fn active_plan_follows_the_entitlement() {
        let user = UserId::new();
        let ent = Entitlement::grant(user, PlanId::Premium, OrderId::new());
        let ledger = ledger(Some(ent), 0);
        assert_eq!(ledger.active_plan(&user).await.unwrap().id, PlanId::Premium);
    }

    #[tokio::test]
    async fn quota_allows_uploads_below_the_free_limit() {
        let ledger = ledger(None, 19);
        assert!(ledger.check_upload_quota(&UserId::new()).await.unwrap());
    }

    #[tokio::test]
    async fn quota_blocks_uploads_at_the_free_limit() {
        let ledger = ledger(None, 20);
        assert!(!ledger.check_upload_quota(&UserId::new()).await.unwrap());
    }

    #[tokio::test]
    async fn enterprise_plan_is_unlimited() {
        let user = UserId::new();
        let ent = Entitlement::grant(user, PlanId::Enterprise, OrderId::new());
        let ledger = ledger(Some(ent), 1_000_000);
        assert!(ledger.check_upload_quota(&user).await.unwrap());
        assert_eq!(ledger.upload_limit(&user).await.unwrap(), None);
    }
}
