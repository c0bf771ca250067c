//! Direct upload source: document text from a multipart request body.

use async_trait::async_trait;

use crate::error::IngestError;
use crate::ingest::DocumentSource;

/// A document submitted directly with the request.
pub struct UploadedDocument {
    filename: Option<String>,
    bytes: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(filename: Option<String>, bytes: Vec<u8>) -> Self {
        Self { filename, bytes }
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }
}

#[async_trait]
impl DocumentSource for UploadedDocument {
    fn name(&self) -> &str {
        "upload"
    }

    async fn fetch_text(&self) -> Result<String, IngestError> {
        if self.bytes.is_empty() {
            return Err(IngestError::EmptyDocument);
        }
        String::from_utf8(self.bytes.clone()).map_err(|_| IngestError::InvalidEncoding)
    }
}
