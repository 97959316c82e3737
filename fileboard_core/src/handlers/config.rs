use axum::Json;
use serde::Serialize;

/// Identity-provider client configuration passed through to the frontend.
/// Every key is optional in the environment and defaults to an empty string,
/// so this endpoint never fails, whatever the process environment looks like.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
    pub measurement_id: String,
}

impl ClientConfig {
    /// Values are read per request rather than cached at startup.
    pub fn from_env() -> Self {
        let var = |key: &str| std::env::var(key).unwrap_or_default();

        Self {
            api_key: var("FIREBASE_API_KEY"),
            auth_domain: var("FIREBASE_AUTH_DOMAIN"),
            project_id: var("FIREBASE_PROJECT_ID"),
            storage_bucket: var("FIREBASE_STORAGE_BUCKET"),
            messaging_sender_id: var("FIREBASE_MESSAGING_SENDER_ID"),
            app_id: var("FIREBASE_APP_ID"),
            measurement_id: var("FIREBASE_MEASUREMENT_ID"),
        }
    }
}

pub async fn client_config() -> Json<ClientConfig> {
    Json(ClientConfig::from_env())
}
