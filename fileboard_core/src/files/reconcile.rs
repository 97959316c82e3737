use std::cmp::Ordering;

use super::metadata::MetadataMap;
use super::models::{format_date, format_size, public_url, FileRecord};
use super::store::DiskFile;

/// Derives the public listing from the directory contents and the metadata
/// mapping. The directory is ground truth: every file on disk yields a
/// record, metadata only enriches it. A file without an entry (dropped
/// directly into the directory, or orphaned by a failed metadata write) gets
/// its filename as title, an empty category, and its mtime as timestamp.
/// Size always comes from the filesystem stat.
///
/// Pure function, so the reconciliation policy is testable without I/O.
pub fn reconcile(disk: &[DiskFile], meta: &MetadataMap) -> Vec<FileRecord> {
    let mut records: Vec<FileRecord> = disk
        .iter()
        .map(|file| {
            let entry = meta.get(&file.name);

            let title = entry
                .map(|m| m.title.clone())
                .unwrap_or_else(|| file.name.clone());
            let category = entry.map(|m| m.category.clone()).unwrap_or_default();
            let timestamp = entry
                .map(|m| m.timestamp)
                .unwrap_or(file.modified.timestamp() as f64);
            let date = entry
                .map(|m| m.date_str.clone())
                .unwrap_or_else(|| format_date(file.modified));

            FileRecord {
                id: file.name.clone(),
                title,
                category,
                filename: file.name.clone(),
                url: public_url(&file.name),
                size: format_size(file.size_bytes),
                date,
                timestamp,
            }
        })
        .collect();

    // Newest first; stable sort keeps directory order on equal timestamps.
    records.sort_by(|a, b| {
        b.timestamp
            .partial_cmp(&a.timestamp)
            .unwrap_or(Ordering::Equal)
    });

    records
}
