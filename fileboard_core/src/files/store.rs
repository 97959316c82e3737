use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::Result;

use super::sanitize::require_base_name;

/// Snapshot of one regular file in the upload directory.
#[derive(Debug, Clone)]
pub struct DiskFile {
    pub name: String,
    pub size_bytes: u64,
    pub modified: DateTime<Utc>,
}

/// Flat directory of uploaded files, addressed by sanitized base name.
#[derive(Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Writes `data` under `name`, overwriting any existing file. Returns the
    /// size of the file actually written, re-read from disk so the recorded
    /// size never comes from client-declared metadata.
    pub async fn write(&self, name: &str, data: &[u8]) -> Result<u64> {
        let name = require_base_name(name)?;
        let path = self.root.join(&name);

        let mut file = fs::File::create(&path).await?;
        file.write_all(data).await?;
        file.sync_all().await?;

        Ok(fs::metadata(&path).await?.len())
    }

    /// Removes `name` from disk. Removing an absent file is not an error.
    pub async fn remove(&self, name: &str) -> Result<()> {
        let name = require_base_name(name)?;

        match fs::remove_file(self.root.join(&name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn exists(&self, name: &str) -> bool {
        match require_base_name(name) {
            Ok(name) => fs::metadata(self.root.join(name))
                .await
                .map(|m| m.is_file())
                .unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Lists regular files in the upload directory, skipping hidden entries
    /// and subdirectories. A missing directory lists as empty.
    pub async fn list(&self) -> Result<Vec<DiskFile>> {
        let mut dir = match fs::read_dir(&self.root).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let meta = entry.metadata().await?;
            if !meta.is_file() {
                continue;
            }

            let modified = meta
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(|_| Utc::now());

            files.push(DiskFile {
                name,
                size_bytes: meta.len(),
                modified,
            });
        }

        Ok(files)
    }
}
