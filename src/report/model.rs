//! Record types shared across the report pipeline.

use serde::{Deserialize, Serialize};

// ── Report record ───────────────────────────────────────────────────

/// Structured test report extracted from one document.
///
/// This is the exact shape forwarded to the alert queue: a JSON object with
/// keys `patient_id`, `test_type`, `value`, `unit`, `timestamp`. Unmatched
/// fields serialize as null; `timestamp` is always set (backfilled with the
/// extraction instant when the document carries none).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    /// Alphanumeric patient identifier.
    pub patient_id: Option<String>,
    /// Free-text test label, matched case-insensitively downstream.
    pub test_type: Option<String>,
    /// Numeric magnitude of the result. `None` when the document carried no
    /// value or the matched token did not parse as a number.
    pub value: Option<f64>,
    /// Unit token associated with `value`. Set whenever the value pattern
    /// matched, even if the numeric token failed to parse.
    pub unit: Option<String>,
    /// ISO-8601 instant. Never empty.
    pub timestamp: String,
}

impl ReportRecord {
    /// Whether the record carries everything downstream consumers need.
    ///
    /// Incomplete records must never reach the alert queue or the
    /// classifier.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Names of the required fields that are unset.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.patient_id.is_none() {
            missing.push("patient_id");
        }
        if self.test_type.is_none() {
            missing.push("test_type");
        }
        if self.value.is_none() {
            missing.push("value");
        }
        missing
    }
}

// ── Insight record ──────────────────────────────────────────────────

/// Clinical classification of a report record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsightStatus {
    /// Value within the configured thresholds (or no rule applies).
    #[default]
    Normal,
    /// Value breaches a clinical threshold; a clinician is alerted.
    Critical,
}

impl InsightStatus {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Critical => "critical",
        }
    }
}

/// Derived clinical status and guidance for one report.
///
/// Created fresh per request and discarded after rendering, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightRecord {
    pub status: InsightStatus,
    /// Human-readable summary shown on the result page.
    pub message: String,
    /// Empty unless `status` is Critical.
    pub recommendation: Vec<String>,
}
