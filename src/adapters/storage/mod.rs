//! Blob store adapters.

mod local;

pub use local::LocalBlobStore;
