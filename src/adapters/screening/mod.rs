//! Screening hook adapters.

mod disabled;
mod http;

pub use disabled::DisabledScreening;
pub use http::{HttpScreeningConfig, HttpScreeningHook};
