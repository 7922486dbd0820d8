//! Media lifecycle command/query handlers.
//!
//! Together these own the moderation state machine end to end: upload,
//! reporting, admin decisions, and the per-requester listings. Every state
//! write is a compare-and-swap through the repository so concurrent calls
//! on one item serialize.

mod approve_media;
mod list_album_media;
mod list_flagged_media;
mod reject_media;
mod report_media;
mod upload_media;

pub use approve_media::{ApproveMediaCommand, ApproveMediaHandler};
pub use list_album_media::{ListAlbumMediaHandler, ListAlbumMediaQuery};
pub use list_flagged_media::{ListFlaggedMediaHandler, ListFlaggedMediaQuery};
pub use reject_media::{RejectMediaCommand, RejectMediaHandler};
pub use report_media::{ReportMediaCommand, ReportMediaHandler};
pub use upload_media::{UploadMediaCommand, UploadMediaHandler};

/// Bounded retry count for compare-and-swap loops that may legitimately
/// lose to benign concurrent writes (e.g. two reports racing).
const CAS_RETRIES: usize = 3;

#[cfg(test)]
pub(crate) mod test_support;
