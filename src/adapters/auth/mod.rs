//! Identity adapters.

mod jwt;

pub use jwt::{JwtConfig, JwtIdentityGate};
