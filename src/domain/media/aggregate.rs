//! MediaItem aggregate entity.
//!
//! All moderation-state mutation goes through this type; repositories
//! persist the result with a compare-and-swap on the `version` field so
//! concurrent moderation calls serialize and exactly one terminal decision
//! wins.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AlbumId, AuthenticatedUser, MediaId, StateMachine, Timestamp, UserId,
};

use super::{MediaError, MediaKind, ModerationStatus};

/// Result of recording a report against a media item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    /// This reporter already reported the item; nothing changed.
    AlreadyRecorded,

    /// Report counted; the item did not change state.
    Recorded,

    /// Report counted and pushed the item over the threshold into `Flagged`.
    RecordedAndFlagged,
}

/// An uploaded photo or video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    /// Unique identifier, immutable.
    pub id: MediaId,

    /// Album the item was uploaded into.
    pub album_id: AlbumId,

    /// Uploading user.
    pub uploader_id: UserId,

    /// Image or video.
    pub kind: MediaKind,

    /// Opaque key in the blob store. Retained even after rejection.
    pub storage_key: String,

    /// Public URL returned by the blob store.
    pub url: String,

    /// Optional caption.
    pub caption: Option<String>,

    /// Moderation state; mutated only through this aggregate.
    pub status: ModerationStatus,

    /// Identities that reported this item. Reports are idempotent per
    /// reporter, so the count is the length of this list.
    pub reporters: Vec<UserId>,

    /// Optimistic-concurrency version, incremented on every mutation.
    pub version: u64,

    /// When the item was uploaded.
    pub created_at: Timestamp,
}

impl MediaItem {
    /// Creates a new item after the blob store has confirmed the write.
    ///
    /// Items start `Pending`; an unsafe screening verdict lands them in
    /// `Flagged` immediately.
    pub fn upload(
        album_id: AlbumId,
        uploader_id: UserId,
        kind: MediaKind,
        storage_key: impl Into<String>,
        url: impl Into<String>,
        caption: Option<String>,
        screened_unsafe: bool,
    ) -> Self {
        let status = if screened_unsafe {
            ModerationStatus::Flagged
        } else {
            ModerationStatus::Pending
        };

        Self {
            id: MediaId::new(),
            album_id,
            uploader_id,
            kind,
            storage_key: storage_key.into(),
            url: url.into(),
            caption,
            status,
            reporters: Vec::new(),
            version: 0,
            created_at: Timestamp::now(),
        }
    }

    /// Current report count.
    pub fn report_count(&self) -> u32 {
        self.reporters.len() as u32
    }

    /// Records a report by `reporter`, idempotently.
    ///
    /// A `Pending` item whose distinct-reporter count reaches `threshold`
    /// transitions to `Flagged`. Reports against items in any other state
    /// are counted but never change state; terminal decisions stand.
    pub fn record_report(&mut self, reporter: UserId, threshold: u32) -> ReportOutcome {
        if self.reporters.contains(&reporter) {
            return ReportOutcome::AlreadyRecorded;
        }
        self.reporters.push(reporter);
        self.version += 1;

        if self.status == ModerationStatus::Pending && self.report_count() >= threshold {
            self.status = ModerationStatus::Flagged;
            ReportOutcome::RecordedAndFlagged
        } else {
            ReportOutcome::Recorded
        }
    }

    /// Approves the item. Valid from `Pending` or `Flagged`.
    ///
    /// # Errors
    ///
    /// `InvalidState` if the item already carries a terminal decision.
    pub fn approve(&mut self) -> Result<(), MediaError> {
        self.transition(ModerationStatus::Approved, "approve")
    }

    /// Rejects the item. Valid from `Pending` or `Flagged`.
    ///
    /// The storage key is retained; retrieval is denied to non-admins by the
    /// visibility rule from here on.
    ///
    /// # Errors
    ///
    /// `InvalidState` if the item already carries a terminal decision.
    pub fn reject(&mut self) -> Result<(), MediaError> {
        self.transition(ModerationStatus::Rejected, "reject")
    }

    fn transition(
        &mut self,
        target: ModerationStatus,
        attempted: &'static str,
    ) -> Result<(), MediaError> {
        if !self.status.can_transition_to(&target) {
            return Err(MediaError::invalid_state(self.status, attempted));
        }
        self.status = target;
        self.version += 1;
        Ok(())
    }

    /// Central per-requester visibility rule.
    ///
    /// - `Approved` and `Pending` items are visible to every viewer.
    /// - `Flagged` items are visible to admins and the uploader.
    /// - `Rejected` items are visible to admins only.
    pub fn visible_to(&self, requester: &AuthenticatedUser) -> bool {
        match self.status {
            ModerationStatus::Approved | ModerationStatus::Pending => true,
            ModerationStatus::Flagged => requester.is_admin() || requester.id == self.uploader_id,
            ModerationStatus::Rejected => requester.is_admin(),
        }
    }
}
