//! Entitlement ledger service.

mod ledger;

pub use ledger::EntitlementLedger;
