//! In-process repository adapters.
//!
//! Mutex-scoped maps with the same compare-and-swap contract as the
//! Postgres adapters. Locks are held only across the synchronous critical
//! section, never across an await, so request handling keeps its
//! no-lock-across-suspension guarantee.

mod account_store;
mod album_store;
mod media_store;
mod payment_store;

pub use account_store::InMemoryAccountRegistry;
pub use album_store::InMemoryAlbumRepository;
pub use media_store::InMemoryMediaRepository;
pub use payment_store::InMemoryPaymentStore;
