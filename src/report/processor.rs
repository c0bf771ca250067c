//! Report processor: runs one document through the full pipeline.
//!
//! Flow:
//! 1. Size guard (bounds regex cost before extraction runs)
//! 2. Field extraction
//! 3. Completeness check; incomplete records never go downstream
//! 4. Threshold classification
//! 5. Alert queue publish
//!
//! Each document is processed independently and statelessly; the extractor
//! and classifier are pure, so concurrent requests need no locking.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::alerts::AlertPublisher;
use crate::error::PipelineError;
use crate::report::extract::FieldExtractor;
use crate::report::insights::InsightEngine;
use crate::report::model::{InsightRecord, ReportRecord};

/// Default maximum accepted document length, in characters.
pub const DEFAULT_MAX_DOCUMENT_CHARS: usize = 200_000;

/// Outcome of processing one document.
#[derive(Debug, Clone)]
pub struct ProcessedReport {
    /// The complete extracted record (also what the queue received).
    pub report: ReportRecord,
    /// Derived clinical classification.
    pub insight: InsightRecord,
    /// Queue message id for the forwarded record.
    pub alert_id: String,
    /// When processing completed.
    pub processed_at: DateTime<Utc>,
}

/// Runs the extraction and classification core for one document at a time
/// and forwards the result to the alert queue.
pub struct ReportProcessor {
    extractor: FieldExtractor,
    insights: InsightEngine,
    publisher: Arc<dyn AlertPublisher>,
    max_document_chars: usize,
}

impl ReportProcessor {
    pub fn new(publisher: Arc<dyn AlertPublisher>, max_document_chars: usize) -> Self {
        Self {
            extractor: FieldExtractor::new(),
            insights: InsightEngine::default_rules(),
            publisher,
            max_document_chars,
        }
    }

    /// Replace the default rule table (clinic-specific thresholds, tests).
    pub fn with_insight_engine(mut self, insights: InsightEngine) -> Self {
        self.insights = insights;
        self
    }

    /// Process one document's text.
    ///
    /// On `Incomplete`, the partial record is carried in the error so the
    /// caller can echo it back for manual correction. Publish failures
    /// propagate unchanged; nothing is retried.
    pub async fn process(&self, text: &str) -> Result<ProcessedReport, PipelineError> {
        let chars = text.chars().count();
        if chars > self.max_document_chars {
            warn!(chars, max = self.max_document_chars, "Rejecting oversized document");
            return Err(PipelineError::DocumentTooLarge {
                chars,
                max: self.max_document_chars,
            });
        }

        let report = self.extractor.extract(text);

        let missing = report.missing_fields();
        if !missing.is_empty() {
            warn!(?missing, "Extracted report is incomplete");
            return Err(PipelineError::Incomplete {
                missing,
                record: report,
            });
        }

        let insight = self.insights.evaluate(&report)?;

        let alert_id = self.publisher.publish(&report).await?;

        info!(
            patient_id = report.patient_id.as_deref().unwrap_or(""),
            test_type = report.test_type.as_deref().unwrap_or(""),
            status = insight.status.label(),
            %alert_id,
            "Report processed and forwarded"
        );

        Ok(ProcessedReport {
            report,
            insight,
            alert_id,
            processed_at: Utc::now(),
        })
    }
}
