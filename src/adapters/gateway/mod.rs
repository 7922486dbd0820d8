//! Payment gateway adapters.

mod mock;
mod rest;

pub use mock::MockPaymentGateway;
pub use rest::{RestGatewayConfig, RestPaymentGateway};
