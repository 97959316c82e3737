//! Core library for the fileboard server: a single-admin file-upload and
//! listing board. An admin verified against an external identity provider
//! may upload and delete files; anyone may list and download them.

pub mod auth;
pub mod config;
pub mod error;
pub mod files;
pub mod handlers;
pub mod middleware;

pub use auth::{AdminGate, Authorizer, IdentityVerifier, JwtIdentityVerifier, SingleAdmin, VerifiedIdentity};
pub use config::AppConfig;
pub use error::{AppError, Result};
pub use files::{FileStore, JsonMetadataStore, MetadataStore};
pub use handlers::routes::create_routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::signal;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub gate: AdminGate,
    pub file_store: FileStore,
    pub metadata: Arc<dyn MetadataStore>,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Self {
        let verifier = JwtIdentityVerifier::from_secret(&config.auth.token_secret);
        let authorizer = Arc::new(SingleAdmin::new(config.auth.admin_email.clone()));

        Self {
            app_name: "Fileboard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            gate: AdminGate::new(verifier, authorizer),
            file_store: FileStore::new(config.files.upload_dir.clone()),
            metadata: Arc::new(JsonMetadataStore::new(config.files.metadata_path.clone())),
        }
    }
}

pub fn create_app(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .merge(create_routes())
        .nest_service("/uploads", ServeDir::new(state.file_store.root()))
        .fallback_service(
            ServeDir::new(&config.files.static_dir).append_index_html_on_directories(true),
        )
        .layer(middleware::cors::cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
