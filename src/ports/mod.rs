//! Ports - contracts between the application core and the outside world.
//!
//! Every external collaborator (identity, blob store, payment gateway,
//! screening hook) and every persistence concern is expressed as an
//! async trait here; adapters provide the implementations.

mod account_registry;
mod album_repository;
mod blob_store;
mod entitlement_repository;
mod identity_gate;
mod media_repository;
mod order_repository;
mod paging;
mod payment_gateway;
mod screening;

pub use account_registry::{AccountRegistry, NewAccount, UserAccount};
pub use album_repository::AlbumRepository;
pub use blob_store::{BlobStore, BlobStoreError, StoredBlob};
pub use entitlement_repository::EntitlementRepository;
pub use identity_gate::{IdentityGate, TokenIssuer};
pub use media_repository::{MediaRepository, MediaStatistics};
pub use order_repository::OrderRepository;
pub use paging::Page;
pub use payment_gateway::{GatewayError, GatewayOrder, GatewayOrderRequest, PaymentGateway};
pub use screening::{ScreeningHook, ScreeningVerdict};
