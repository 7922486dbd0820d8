//! Automated content screening port.
//!
//! A pluggable hook consulted at upload time. An `Unsafe` verdict lands the
//! new item directly in `Flagged`; everything else starts `Pending`. The
//! threshold/report path is independent of this hook.

use async_trait::async_trait;

/// Verdict from the screening hook.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScreeningVerdict {
    /// Content looks fine; item starts `Pending`.
    Safe,

    /// Content flagged as unsafe with the hook's confidence.
    Unsafe { confidence: f32 },
}

impl ScreeningVerdict {
    /// True when the verdict should flag the upload.
    pub fn is_unsafe(&self) -> bool {
        matches!(self, ScreeningVerdict::Unsafe { .. })
    }
}

/// Port for the automated screening collaborator.
///
/// # Contract
///
/// Screening is advisory: implementations that cannot reach their backend
/// return `Safe` rather than blocking uploads (fail-open).
#[async_trait]
pub trait ScreeningHook: Send + Sync {
    /// Assess uploaded bytes.
    async fn assess(&self, bytes: &[u8], content_type: &str) -> ScreeningVerdict;
}
