use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::error::{AppError, Result};

use super::models::FileMetadata;

pub type MetadataMap = BTreeMap<String, FileMetadata>;

/// Persisted filename-to-metadata mapping. Kept behind a trait so the
/// full-file-rewrite implementation can later be swapped for an embedded
/// key-value engine without touching callers.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    async fn load(&self) -> Result<MetadataMap>;
    async fn save(&self, map: &MetadataMap) -> Result<()>;
}

/// Single JSON file holding the complete mapping. Every save rewrites the
/// whole file; concurrent savers race with last-write-wins and no locking,
/// which is accepted for a low-traffic single-admin board.
pub struct JsonMetadataStore {
    path: PathBuf,
}

impl JsonMetadataStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MetadataStore for JsonMetadataStore {
    async fn load(&self) -> Result<MetadataMap> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(MetadataMap::new()),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            AppError::CorruptMetadata(format!("{}: {}", self.path.display(), e))
        })
    }

    async fn save(&self, map: &MetadataMap) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(map)?;
        fs::write(&self.path, bytes).await?;
        Ok(())
    }
}
