//! Entitlement domain module.
//!
//! An entitlement records the active plan a user purchased, with provenance
//! to the order that paid for it. One active entitlement per user; prior
//! records are superseded, never deleted.

mod entitlement;

pub use entitlement::Entitlement;
