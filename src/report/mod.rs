//! Report extraction, classification, and processing.

pub mod extract;
pub mod insights;
pub mod model;
pub mod processor;

pub use extract::FieldExtractor;
pub use insights::{InsightEngine, InsightRule, ThresholdDirection};
pub use model::{InsightRecord, InsightStatus, ReportRecord};
pub use processor::{ProcessedReport, ReportProcessor};
