//! PostgreSQL adapters - database implementations of the repository ports.
//!
//! All queries are runtime (non-macro) sqlx. MediaItem and Order writes go
//! through version-guarded `UPDATE`s; the verification commit runs in a
//! single transaction so the order transition and the entitlement grant
//! land together or not at all.

mod account_registry;
mod album_repository;
mod media_repository;
mod payment_store;

pub use account_registry::PostgresAccountRegistry;
pub use album_repository::PostgresAlbumRepository;
pub use media_repository::PostgresMediaRepository;
pub use payment_store::PostgresPaymentStore;
