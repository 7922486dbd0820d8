//! Keepsake server binary.
//!
//! Loads configuration, initializes tracing, wires the adapter stack
//! (Postgres-backed when a database section is configured, in-process
//! otherwise) and serves the REST API.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use keepsake::adapters::auth::{JwtConfig, JwtIdentityGate};
use keepsake::adapters::gateway::{RestGatewayConfig, RestPaymentGateway};
use keepsake::adapters::http::{api_router, AppState};
use keepsake::adapters::memory::{
    InMemoryAccountRegistry, InMemoryAlbumRepository, InMemoryMediaRepository,
    InMemoryPaymentStore,
};
use keepsake::adapters::postgres::{
    PostgresAccountRegistry, PostgresAlbumRepository, PostgresMediaRepository,
    PostgresPaymentStore,
};
use keepsake::adapters::screening::{DisabledScreening, HttpScreeningConfig, HttpScreeningHook};
use keepsake::adapters::storage::LocalBlobStore;
use keepsake::config::AppConfig;
use keepsake::domain::payment::SignatureVerifier;
use keepsake::ports::{
    AccountRegistry, AlbumRepository, EntitlementRepository, MediaRepository, OrderRepository,
    ScreeningHook,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let state = build_state(&config).await?;
    let app = api_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config));

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "keepsake listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn build_state(config: &AppConfig) -> Result<AppState, Box<dyn std::error::Error>> {
    // Repositories: Postgres when configured, in-process otherwise.
    let (accounts, albums, media, orders, entitlements): (
        Arc<dyn AccountRegistry>,
        Arc<dyn AlbumRepository>,
        Arc<dyn MediaRepository>,
        Arc<dyn OrderRepository>,
        Arc<dyn EntitlementRepository>,
    ) = match &config.database {
        Some(database) => {
            let pool = PgPoolOptions::new()
                .min_connections(database.min_connections)
                .max_connections(database.max_connections)
                .acquire_timeout(database.acquire_timeout())
                .connect(&database.url)
                .await?;

            if database.run_migrations {
                tracing::info!("running database migrations");
                sqlx::migrate!("./migrations").run(&pool).await?;
            }

            let payment_store = Arc::new(PostgresPaymentStore::new(pool.clone()));
            (
                Arc::new(PostgresAccountRegistry::new(pool.clone())),
                Arc::new(PostgresAlbumRepository::new(pool.clone())),
                Arc::new(PostgresMediaRepository::new(pool)),
                payment_store.clone(),
                payment_store,
            )
        }
        None => {
            tracing::warn!("no database configured, using in-process repositories");
            let mut registry = InMemoryAccountRegistry::new();
            if let (Some(email), Some(password)) = (
                &config.auth.bootstrap_admin_email,
                &config.auth.bootstrap_admin_password,
            ) {
                registry = registry.with_admin(email, password.expose_secret());
                tracing::info!(%email, "seeded bootstrap admin account");
            }
            let payment_store = Arc::new(InMemoryPaymentStore::new());
            (
                Arc::new(registry),
                Arc::new(InMemoryAlbumRepository::new()),
                Arc::new(InMemoryMediaRepository::new()),
                payment_store.clone(),
                payment_store,
            )
        }
    };

    let jwt = Arc::new(JwtIdentityGate::new(
        JwtConfig::new(config.auth.jwt_secret.expose_secret())
            .with_ttl_secs(config.auth.token_ttl_secs),
        accounts.clone(),
    ));

    let gateway = Arc::new(RestPaymentGateway::new(
        RestGatewayConfig::new(
            &config.payment.key_id,
            config.payment.key_secret.expose_secret(),
            &config.payment.base_url,
        )
        .with_timeout(Duration::from_secs(config.payment.gateway_timeout_secs)),
    ));

    let screening: Arc<dyn ScreeningHook> = if config.moderation.screening_enabled() {
        let url = config.moderation.screening_url.clone().unwrap_or_default();
        let key = config.moderation.screening_api_key.clone().unwrap_or_default();
        Arc::new(HttpScreeningHook::new(
            HttpScreeningConfig::new(url, key)
                .with_timeout(Duration::from_secs(config.moderation.screening_timeout_secs)),
        ))
    } else {
        Arc::new(DisabledScreening)
    };

    Ok(AppState {
        identity_gate: jwt.clone(),
        token_issuer: jwt,
        accounts,
        albums,
        media,
        orders,
        entitlements,
        gateway,
        blobs: Arc::new(LocalBlobStore::new(
            &config.storage.root,
            &config.storage.public_base_url,
        )),
        screening,
        signature_verifier: SignatureVerifier::new(
            config.payment.callback_secret.expose_secret(),
        ),
        report_threshold: config.moderation.report_threshold,
        idempotency_window_secs: config.payment.idempotency_window_secs,
    })
}
