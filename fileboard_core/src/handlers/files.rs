use axum::{
    extract::{Multipart, Path, State},
    http::HeaderMap,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    error::{AppError, Result},
    files::{models::public_url, reconcile, sanitize, require_base_name, FileMetadata, FileRecord, MetadataMap},
    AppState,
};

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub status: &'static str,
    pub message: String,
    pub file_url: String,
    pub title: String,
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub status: &'static str,
    pub message: String,
}

struct UploadForm {
    filename: String,
    data: Vec<u8>,
    title: String,
    category: String,
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut title: Option<String> = None;
    let mut category: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        match field.name().unwrap_or("") {
            "file" => {
                let filename = field
                    .file_name()
                    .ok_or_else(|| AppError::BadRequest("Missing filename".to_string()))?
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file data: {}", e)))?;
                file = Some((filename, data.to_vec()));
            }
            "title" => {
                title = Some(field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read title field: {}", e))
                })?);
            }
            "category" => {
                category = Some(field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read category field: {}", e))
                })?);
            }
            _ => {}
        }
    }

    let (filename, data) =
        file.ok_or_else(|| AppError::BadRequest("No file found in request".to_string()))?;
    let title = title.ok_or_else(|| AppError::BadRequest("Missing title field".to_string()))?;
    let category =
        category.ok_or_else(|| AppError::BadRequest("Missing category field".to_string()))?;

    Ok(UploadForm {
        filename,
        data,
        title,
        category,
    })
}

/// `POST /api/upload` - admin only. Writes the file first, then the metadata
/// entry; a metadata failure after a successful write leaves an orphan that
/// the next listing adopts via reconciliation. Never rolled back.
pub async fn upload_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let identity = state.gate.authorize(&headers).await?;

    let form = read_upload_form(multipart).await?;

    // Uploads are permissive: a path-like filename is stripped to its base
    // name. Delete is strict about the same input (see delete_file).
    let filename = sanitize(&form.filename)?;

    let stored_size = state.file_store.write(&filename, &form.data).await?;

    let mut meta = state.metadata.load().await?;
    meta.insert(
        filename.clone(),
        FileMetadata::new(
            &filename,
            form.title.clone(),
            form.category.clone(),
            stored_size,
            Utc::now(),
        ),
    );
    state.metadata.save(&meta).await?;

    info!(
        admin = %identity.email,
        file = %filename,
        size = stored_size,
        "file uploaded"
    );

    Ok(Json(UploadResponse {
        status: "success",
        message: "File uploaded successfully to local storage.".to_string(),
        file_url: public_url(&filename),
        title: form.title,
        category: form.category,
    }))
}

/// `DELETE /api/files/:filename` - admin only. Metadata entry goes first,
/// then the file; either being absent already still counts as success.
pub async fn delete_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(filename): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let identity = state.gate.authorize(&headers).await?;

    let name = require_base_name(&filename)?;

    let mut meta = state.metadata.load().await?;
    if meta.remove(&name).is_some() {
        state.metadata.save(&meta).await?;
    }

    state.file_store.remove(&name).await?;

    info!(admin = %identity.email, file = %name, "file deleted");

    Ok(Json(DeleteResponse {
        status: "success",
        message: format!("'{}' was deleted successfully.", name),
    }))
}

/// `GET /api/files` - public. The directory listing is ground truth; a
/// corrupt metadata file degrades to disk-only records instead of hiding
/// the board.
pub async fn list_files(State(state): State<AppState>) -> Result<Json<Vec<FileRecord>>> {
    let disk = state.file_store.list().await?;

    let meta = match state.metadata.load().await {
        Ok(meta) => meta,
        Err(AppError::CorruptMetadata(msg)) => {
            warn!("Listing without metadata enrichment: {}", msg);
            MetadataMap::new()
        }
        Err(e) => return Err(e),
    };

    Ok(Json(reconcile(&disk, &meta)))
}
