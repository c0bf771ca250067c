//! Clinical threshold classification: a small data-driven rule table.
//!
//! Each rule pairs a test type with a threshold predicate and a Critical
//! outcome. This is intentionally not a general rules engine: the clinic
//! supports a handful of test types, and a flat table keeps each rule
//! independently testable and trivial to extend.

use tracing::debug;

use crate::error::ReportError;
use crate::report::model::{InsightRecord, InsightStatus, ReportRecord};

/// Message for reports that breach no threshold.
const NORMAL_MESSAGE: &str = "Your test results are within normal range.";

/// Which side of the threshold is critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdDirection {
    /// Values strictly below the threshold are critical.
    Below,
    /// Values strictly above the threshold are critical.
    Above,
}

/// One classification rule.
#[derive(Debug, Clone)]
pub struct InsightRule {
    /// Test type this rule applies to (matched case-insensitively, exact).
    pub test_type: &'static str,
    pub threshold: f64,
    pub direction: ThresholdDirection,
    /// Message shown when the rule fires.
    pub message: &'static str,
    /// Fixed recommendations attached to the Critical outcome.
    pub recommendations: &'static [&'static str],
}

impl InsightRule {
    /// Whether `value` breaches this rule's threshold. Comparisons are
    /// strict; a value exactly on the threshold is normal.
    fn breached(&self, value: f64) -> bool {
        match self.direction {
            ThresholdDirection::Below => value < self.threshold,
            ThresholdDirection::Above => value > self.threshold,
        }
    }
}

/// Threshold classifier for extracted report records.
pub struct InsightEngine {
    rules: Vec<InsightRule>,
}

impl InsightEngine {
    /// Create an engine with the clinic's default thresholds.
    pub fn default_rules() -> Self {
        Self {
            rules: vec![
                InsightRule {
                    test_type: "hemoglobin",
                    threshold: 12.0,
                    direction: ThresholdDirection::Below,
                    message: "Your Hemoglobin level is below the normal threshold.",
                    recommendations: &[
                        "Eat iron-rich foods: spinach, lentils, red meat",
                        "Include vitamin C sources to boost absorption",
                        "Avoid coffee/tea right after meals",
                    ],
                },
                InsightRule {
                    test_type: "blood sugar",
                    threshold: 200.0,
                    direction: ThresholdDirection::Above,
                    message: "Your blood sugar level is too high.",
                    recommendations: &[
                        "Avoid sugary drinks and snacks",
                        "Exercise regularly",
                        "Consult a doctor for medication options",
                    ],
                },
            ],
        }
    }

    /// Create an engine with no rules (everything classifies Normal).
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule. Rules are evaluated in insertion order, first match
    /// wins.
    pub fn add_rule(&mut self, rule: InsightRule) {
        self.rules.push(rule);
    }

    /// Classify a report against the rule table.
    ///
    /// The first rule whose test type matches and whose threshold is
    /// breached produces a Critical record; otherwise the default Normal
    /// record. Test types with no rule fall through to Normal. Fails if
    /// `test_type` or `value` is unset; callers check completeness first,
    /// so that error marks a programming bug, not bad input.
    pub fn evaluate(&self, report: &ReportRecord) -> Result<InsightRecord, ReportError> {
        let test_type = report
            .test_type
            .as_deref()
            .ok_or(ReportError::InvalidReport { field: "test_type" })?;
        let value = report
            .value
            .ok_or(ReportError::InvalidReport { field: "value" })?;

        for rule in &self.rules {
            if rule.test_type.eq_ignore_ascii_case(test_type) && rule.breached(value) {
                debug!(
                    test_type,
                    value,
                    threshold = rule.threshold,
                    "Report breached clinical threshold"
                );
                return Ok(InsightRecord {
                    status: InsightStatus::Critical,
                    message: rule.message.to_string(),
                    recommendation: rule
                        .recommendations
                        .iter()
                        .map(|r| r.to_string())
                        .collect(),
                });
            }
        }

        // In-range values and unrecognized test types both land here.
        Ok(InsightRecord {
            status: InsightStatus::Normal,
            message: NORMAL_MESSAGE.to_string(),
            recommendation: Vec::new(),
        })
    }
}
