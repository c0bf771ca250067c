//! Publisher trait for the downstream alert queue.

use async_trait::async_trait;

use crate::error::QueueError;
use crate::report::model::ReportRecord;

/// Forwards complete report records to the clinic's alerting queue.
///
/// Callers must only publish complete records. A publish failure surfaces
/// to the caller unchanged; the pipeline never retries.
#[async_trait]
pub trait AlertPublisher: Send + Sync {
    /// Publisher name for logging (e.g. "http-queue").
    fn name(&self) -> &str;

    /// Publish one record. Returns the queue message id.
    async fn publish(&self, report: &ReportRecord) -> Result<String, QueueError>;
}
