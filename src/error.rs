//! Error types for SkyVitals.

use crate::report::model::ReportRecord;

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Document acquisition errors.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Uploaded document is empty")]
    EmptyDocument,

    #[error("Document is not valid UTF-8 text")]
    InvalidEncoding,

    #[error("No document named {key} in bucket {bucket}")]
    NotFound { bucket: String, key: String },

    #[error("Failed to fetch {key} from object store: {reason}")]
    Fetch { key: String, reason: String },
}

/// Alert queue errors.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Queue request failed: {0}")]
    Request(String),

    #[error("Queue rejected message with status {status}")]
    Status { status: u16 },
}

/// Report record errors.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Classifier called on a record missing a required field. The pipeline
    /// checks completeness first, so reaching this is a programming error.
    #[error("Report is missing {field}, cannot classify")]
    InvalidReport { field: &'static str },
}

/// Pipeline errors, one per way a single document submission can fail.
///
/// `Incomplete` carries the partial record so the caller can echo it back
/// for manual correction. Nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Document too large: {chars} characters (max {max})")]
    DocumentTooLarge { chars: usize, max: usize },

    #[error("Incomplete report: missing {}", .missing.join(", "))]
    Incomplete {
        missing: Vec<&'static str>,
        record: ReportRecord,
    },

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
