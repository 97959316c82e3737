use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use fileboard_core::{create_app, AppConfig, AppState};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;
use tempfile::TempDir;
use tower::ServiceExt;

const SECRET: &str = "auth-flow-test-secret";
const ADMIN: &str = "admin@example.com";
const BOUNDARY: &str = "fileboard-auth-boundary";

fn test_config(dir: &TempDir) -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.admin_email = ADMIN.to_string();
    config.auth.token_secret = SECRET.to_string();
    config.files.upload_dir = dir.path().join("uploads");
    config.files.metadata_path = dir.path().join("uploads_metadata.json");
    config.files.static_dir = dir.path().to_path_buf();
    config
}

fn test_app(config: &AppConfig) -> Router {
    config.create_directories().unwrap();
    create_app(AppState::from_config(config), config)
}

#[derive(Serialize)]
struct Claims<'a> {
    sub: &'a str,
    email: &'a str,
    exp: u64,
}

fn mint_token(secret: &str, email: &str) -> String {
    let claims = Claims {
        sub: "user-1",
        email,
        exp: 4102444800,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn upload_request(auth_header: Option<String>) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in [("title", "A title"), ("category", "misc")] {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"a.txt\"\r\nContent-Type: application/octet-stream\r\n\r\ncontent\r\n--{}--\r\n",
            BOUNDARY, BOUNDARY
        )
        .as_bytes(),
    );

    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/api/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        );
    if let Some(value) = auth_header {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::from(body)).unwrap()
}

fn assert_no_mutation(config: &AppConfig) {
    let uploaded: Vec<_> = std::fs::read_dir(&config.files.upload_dir)
        .unwrap()
        .collect();
    assert!(uploaded.is_empty(), "rejected request wrote a file");
    assert!(
        !config.files.metadata_path.exists(),
        "rejected request wrote metadata"
    );
}

#[tokio::test]
async fn test_upload_without_header_is_unauthenticated() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let app = test_app(&config);

    let response = app.oneshot(upload_request(None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_no_mutation(&config);
}

#[tokio::test]
async fn test_upload_with_non_bearer_header_is_unauthenticated() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let app = test_app(&config);

    let response = app
        .oneshot(upload_request(Some("Basic dXNlcjpwdw==".to_string())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_no_mutation(&config);
}

#[tokio::test]
async fn test_upload_with_invalid_token_is_unauthenticated() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let app = test_app(&config);

    let token = mint_token("some-other-secret", ADMIN);
    let response = app
        .oneshot(upload_request(Some(format!("Bearer {}", token))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_no_mutation(&config);
}

#[tokio::test]
async fn test_upload_with_wrong_email_is_forbidden() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let app = test_app(&config);

    let token = mint_token(SECRET, "intruder@example.com");
    let response = app
        .oneshot(upload_request(Some(format!("Bearer {}", token))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_no_mutation(&config);
}

#[tokio::test]
async fn test_upload_with_admin_token_succeeds() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let app = test_app(&config);

    let token = mint_token(SECRET, ADMIN);
    let response = app
        .oneshot(upload_request(Some(format!("Bearer {}", token))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(config.files.upload_dir.join("a.txt").is_file());
}

#[tokio::test]
async fn test_delete_with_wrong_email_is_forbidden() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let app = test_app(&config);

    std::fs::write(config.files.upload_dir.join("protected.txt"), b"keep").unwrap();

    let token = mint_token(SECRET, "intruder@example.com");
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri("/api/files/protected.txt")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(config.files.upload_dir.join("protected.txt").is_file());
}

#[tokio::test]
async fn test_missing_credential_degrades_to_reject_all() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(&dir);
    config.auth.token_secret = String::new();
    let app = test_app(&config);

    // Token minted with the "right" secret still fails: without a configured
    // credential the verifier rejects everything instead of crashing.
    let token = mint_token(SECRET, ADMIN);
    let response = app
        .oneshot(upload_request(Some(format!("Bearer {}", token))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_no_mutation(&config);
}

#[tokio::test]
async fn test_public_endpoints_need_no_token() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let app = test_app(&config);

    for uri in ["/api/files", "/api/config", "/health"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "uri: {}", uri);
    }
}
