//! Entitlement repository port (read side).
//!
//! Writes happen inside [`OrderRepository::commit_verification`] so the
//! grant shares the order's transactional boundary; this port serves the
//! ledger's reads.
//!
//! [`OrderRepository::commit_verification`]: super::OrderRepository::commit_verification

use async_trait::async_trait;

use crate::domain::entitlement::Entitlement;
use crate::domain::foundation::{DomainError, UserId};

/// Repository port for entitlement reads.
#[async_trait]
pub trait EntitlementRepository: Send + Sync {
    /// The user's active entitlement, `None` when the user is on the free
    /// tier.
    async fn find_active_by_user(&self, user_id: &UserId)
        -> Result<Option<Entitlement>, DomainError>;

    /// Full grant history for a user, newest first; superseded records
    /// included.
    async fn history_for_user(&self, user_id: &UserId) -> Result<Vec<Entitlement>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn entitlement_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn EntitlementRepository) {}
    }
}
