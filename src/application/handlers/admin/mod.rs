//! Admin gateway handlers.
//!
//! Thin authorization-checked façade: every operation resolves the
//! caller's role first and composes the media lifecycle, album store and
//! account registry underneath.

mod dashboard;

pub use dashboard::{DashboardHandler, DashboardQuery, DashboardSummary};
