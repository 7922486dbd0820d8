//! Adapters - implementations of the ports.
//!
//! - `auth` - JWT identity gate and token issuance
//! - `gateway` - REST payment gateway client + deterministic mock
//! - `http` - axum REST surface
//! - `memory` - in-process repositories (tests, single-node deployments)
//! - `postgres` - sqlx repositories
//! - `screening` - HTTP screening hook + disabled default
//! - `storage` - local filesystem blob store

pub mod auth;
pub mod gateway;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod screening;
pub mod storage;
