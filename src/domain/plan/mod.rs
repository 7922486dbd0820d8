//! Plan domain module.
//!
//! Static plan catalog: identifiers, prices, upload limits and features.
//! Plans are not user-mutable; amounts are always taken from here, never
//! from the client.

mod catalog;
mod plan;

pub use catalog::PlanCatalog;
pub use plan::{Plan, PlanId};
