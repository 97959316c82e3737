//! API route table

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::AppState;

use super::{config, files, health};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::handle_health))
        .route("/api/upload", post(files::upload_file))
        .route("/api/files", get(files::list_files))
        .route("/api/files/:filename", delete(files::delete_file))
        .route("/api/config", get(config::client_config))
}
