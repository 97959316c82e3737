//! CORS (Cross-Origin Resource Sharing) middleware configuration

use tower_http::cors::{Any, CorsLayer as TowerCorsLayer};

/// Fully open CORS: any origin, any method, any header. Deliberate for a
/// public-read, admin-write board; the write side is guarded by the bearer
/// token, not by the origin.
pub fn cors_layer() -> TowerCorsLayer {
    TowerCorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600))
}
