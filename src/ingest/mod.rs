//! Document text acquisition: one interface, two sources.
//!
//! Direct upload and object-store fetch differ only in where the bytes come
//! from; everything after `fetch_text` is shared. Decoding binary formats
//! (PDF, scans) into text happens upstream of this service; ingest hands
//! the pipeline a single string per document.

pub mod object_store;
pub mod upload;

pub use object_store::{ObjectStoreClient, StoredDocument};
pub use upload::UploadedDocument;

use async_trait::async_trait;

use crate::error::IngestError;

/// A source that yields the text of one submitted document.
///
/// Implementations own transport-level failure handling; the pipeline only
/// sees the final string, or the reason none could be produced.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Source name for logging (e.g. "upload", "object-store").
    fn name(&self) -> &str;

    /// Produce the document text.
    async fn fetch_text(&self) -> Result<String, IngestError>;
}
