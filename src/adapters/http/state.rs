//! Shared application state for the HTTP surface.
//!
//! One `AppState` is built at startup from the wired adapters and cloned
//! per request; handlers are constructed on demand from the Arc-wrapped
//! ports.

use std::sync::Arc;

use crate::application::handlers::admin::DashboardHandler;
use crate::application::handlers::album::{
    CreateAlbumHandler, GetAlbumHandler, ListAlbumsHandler, UpdateAlbumHandler,
};
use crate::application::handlers::entitlement::EntitlementLedger;
use crate::application::handlers::identity::{LoginUserHandler, RegisterUserHandler};
use crate::application::handlers::media::{
    ApproveMediaHandler, ListAlbumMediaHandler, ListFlaggedMediaHandler, RejectMediaHandler,
    ReportMediaHandler, UploadMediaHandler,
};
use crate::application::handlers::payment::{CreateOrderHandler, VerifyPaymentHandler};
use crate::domain::payment::SignatureVerifier;
use crate::ports::{
    AccountRegistry, AlbumRepository, BlobStore, EntitlementRepository, IdentityGate,
    MediaRepository, OrderRepository, PaymentGateway, ScreeningHook, TokenIssuer,
};

/// Everything a request handler can reach.
#[derive(Clone)]
pub struct AppState {
    pub identity_gate: Arc<dyn IdentityGate>,
    pub token_issuer: Arc<dyn TokenIssuer>,
    pub accounts: Arc<dyn AccountRegistry>,
    pub albums: Arc<dyn AlbumRepository>,
    pub media: Arc<dyn MediaRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub entitlements: Arc<dyn EntitlementRepository>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub blobs: Arc<dyn BlobStore>,
    pub screening: Arc<dyn ScreeningHook>,
    pub signature_verifier: SignatureVerifier,

    /// Distinct reporters required to flag a pending item.
    pub report_threshold: u32,

    /// Dedup window for retried order creations, in seconds.
    pub idempotency_window_secs: u64,
}

impl AppState {
    /// Create handlers on demand from the shared state.
    pub fn register_handler(&self) -> RegisterUserHandler {
        RegisterUserHandler::new(self.accounts.clone(), self.token_issuer.clone())
    }

    pub fn login_handler(&self) -> LoginUserHandler {
        LoginUserHandler::new(self.accounts.clone(), self.token_issuer.clone())
    }

    pub fn create_album_handler(&self) -> CreateAlbumHandler {
        CreateAlbumHandler::new(self.albums.clone())
    }

    pub fn get_album_handler(&self) -> GetAlbumHandler {
        GetAlbumHandler::new(self.albums.clone())
    }

    pub fn list_albums_handler(&self) -> ListAlbumsHandler {
        ListAlbumsHandler::new(self.albums.clone())
    }

    pub fn update_album_handler(&self) -> UpdateAlbumHandler {
        UpdateAlbumHandler::new(self.albums.clone())
    }

    pub fn entitlement_ledger(&self) -> Arc<EntitlementLedger> {
        Arc::new(EntitlementLedger::new(
            self.entitlements.clone(),
            self.media.clone(),
        ))
    }

    pub fn upload_media_handler(&self) -> UploadMediaHandler {
        UploadMediaHandler::new(
            self.albums.clone(),
            self.media.clone(),
            self.blobs.clone(),
            self.screening.clone(),
            self.entitlement_ledger(),
        )
    }

    pub fn report_media_handler(&self) -> ReportMediaHandler {
        ReportMediaHandler::new(self.media.clone(), self.report_threshold)
    }

    pub fn approve_media_handler(&self) -> ApproveMediaHandler {
        ApproveMediaHandler::new(self.media.clone())
    }

    pub fn reject_media_handler(&self) -> RejectMediaHandler {
        RejectMediaHandler::new(self.media.clone())
    }

    pub fn list_flagged_handler(&self) -> ListFlaggedMediaHandler {
        ListFlaggedMediaHandler::new(self.media.clone())
    }

    pub fn list_album_media_handler(&self) -> ListAlbumMediaHandler {
        ListAlbumMediaHandler::new(self.albums.clone(), self.media.clone())
    }

    pub fn create_order_handler(&self) -> CreateOrderHandler {
        CreateOrderHandler::new(
            self.orders.clone(),
            self.gateway.clone(),
            self.idempotency_window_secs,
        )
    }

    pub fn verify_payment_handler(&self) -> VerifyPaymentHandler {
        VerifyPaymentHandler::new(self.orders.clone(), self.signature_verifier.clone())
    }

    pub fn dashboard_handler(&self) -> DashboardHandler {
        DashboardHandler::new(self.accounts.clone(), self.albums.clone(), self.media.clone())
    }
}
