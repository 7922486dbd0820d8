//! Moderation state machine for uploaded media.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Moderation state of a media item.
///
/// ```text
/// pending ──► flagged ──► approved
///    │           │
///    ├───────────┴──────► rejected
///    └──────────────────► approved
/// ```
///
/// Moderation decisions are valid from `Pending` or `Flagged`; an admin
/// may reject an obviously-bad item without waiting for a report.
/// `Approved` and `Rejected` are terminal: decisions are final and not
/// reversible through the lifecycle operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    /// Initial state after upload; shown to viewers by default.
    Pending,

    /// Reported or auto-screened; held for admin review.
    Flagged,

    /// Cleared by an admin. Terminal.
    Approved,

    /// Removed from general view by an admin; record retained for audit.
    /// Terminal.
    Rejected,
}

impl StateMachine for ModerationStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ModerationStatus::*;
        matches!(
            (self, target),
            (Pending, Flagged)
                | (Pending, Approved)
                | (Pending, Rejected)
                | (Flagged, Approved)
                | (Flagged, Rejected)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ModerationStatus::*;
        match self {
            Pending => vec![Flagged, Approved, Rejected],
            Flagged => vec![Approved, Rejected],
            Approved | Rejected => vec![],
        }
    }
}

impl ModerationStatus {
    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationStatus::Pending => "pending",
            ModerationStatus::Flagged => "flagged",
            ModerationStatus::Approved => "approved",
            ModerationStatus::Rejected => "rejected",
        }
    }

    /// Parses a status from its wire representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ModerationStatus::Pending),
            "flagged" => Some(ModerationStatus::Flagged),
            "approved" => Some(ModerationStatus::Approved),
            "rejected" => Some(ModerationStatus::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
