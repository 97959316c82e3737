use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the persisted metadata file, keyed by sanitized filename.
/// Field names match the JSON the board has always written, so an existing
/// metadata file keeps loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileMetadata {
    pub title: String,
    pub category: String,
    pub filename: String,
    #[serde(rename = "originalName")]
    pub original_name: String,
    pub url: String,
    pub size_bytes: u64,
    /// Epoch seconds at upload time.
    pub timestamp: f64,
    pub date_str: String,
}

impl FileMetadata {
    pub fn new(filename: &str, title: String, category: String, size_bytes: u64, uploaded_at: DateTime<Utc>) -> Self {
        Self {
            title,
            category,
            filename: filename.to_string(),
            original_name: filename.to_string(),
            url: public_url(filename),
            size_bytes,
            timestamp: uploaded_at.timestamp() as f64,
            date_str: format_date(uploaded_at),
        }
    }
}

/// One item of the public listing, reconciled from disk state and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,
    pub title: String,
    pub category: String,
    pub filename: String,
    pub url: String,
    pub size: String,
    pub date: String,
    pub timestamp: f64,
}

/// Percent-encoded download path under the public upload prefix.
pub fn public_url(filename: &str) -> String {
    format!("/uploads/{}", urlencoding::encode(filename))
}

pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%Y.%m.%d").to_string()
}

/// Human-readable size: two-decimal MB from 0.1 MB up, whole KB below.
pub fn format_size(size_bytes: u64) -> String {
    let size_mb = size_bytes as f64 / (1024.0 * 1024.0);
    if size_mb >= 0.1 {
        format!("{:.2} MB", size_mb)
    } else {
        format!("{} KB", size_bytes / 1024)
    }
}
