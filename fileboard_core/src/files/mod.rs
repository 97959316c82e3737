//! File storage, the JSON metadata store and the listing reconciliation.

pub mod metadata;
pub mod models;
pub mod reconcile;
pub mod sanitize;
pub mod store;

pub use metadata::{JsonMetadataStore, MetadataMap, MetadataStore};
pub use models::{FileMetadata, FileRecord};
pub use reconcile::reconcile;
pub use sanitize::{require_base_name, sanitize};
pub use store::{DiskFile, FileStore};
