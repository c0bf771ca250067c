//! Field extraction: pattern search over raw document text.
//!
//! Patterns are deliberately permissive: case-insensitive, first match
//! anywhere in the text, not anchored. Reports arrive with inconsistent
//! casing and leading boilerplate, so this trades precision for recall.

use chrono::{SecondsFormat, Utc};
use regex::Regex;
use tracing::debug;

use crate::report::model::ReportRecord;

/// Extracts structured report fields from document text.
///
/// Holds the compiled patterns; build once, reuse across requests.
pub struct FieldExtractor {
    patient_id: Regex,
    test_type: Regex,
    value_unit: Regex,
    timestamp: Regex,
}

impl FieldExtractor {
    pub fn new() -> Self {
        Self {
            patient_id: Regex::new(r"(?i)Patient ID\s*[:\-]\s*([A-Za-z0-9]+)").unwrap(),
            test_type: Regex::new(r"(?i)Test Type\s*[:\-]\s*([A-Za-z ]+)").unwrap(),
            value_unit: Regex::new(r"(?i)Test Value\s*[:\-]\s*([0-9.]+)\s*([A-Za-z/%]+)").unwrap(),
            timestamp: Regex::new(r"(?i)(?:Test Time|Timestamp)\s*[:\-]\s*([\dT:.Z-]+)").unwrap(),
        }
    }

    /// Extract fields from document text.
    ///
    /// Never fails: unmatched fields stay `None`, and an absent (or literal
    /// "now") timestamp is backfilled with the current UTC instant. A value
    /// token that matches but does not parse as a number leaves `value`
    /// unset while `unit` is still recorded; the completeness check
    /// downstream rejects such records.
    pub fn extract(&self, text: &str) -> ReportRecord {
        let patient_id = self
            .patient_id
            .captures(text)
            .map(|caps| caps[1].trim().to_string());

        let test_type = self
            .test_type
            .captures(text)
            .map(|caps| caps[1].trim().to_string());

        let (value, unit) = match self.value_unit.captures(text) {
            Some(caps) => {
                let token = caps[1].trim();
                let value = token.parse::<f64>().ok();
                if value.is_none() {
                    debug!(token, "Value token did not parse as a number");
                }
                (value, Some(caps[2].trim().to_string()))
            }
            None => (None, None),
        };

        let timestamp = normalize_timestamp(
            self.timestamp
                .captures(text)
                .map(|caps| caps[1].trim().to_string()),
        );

        ReportRecord {
            patient_id,
            test_type,
            value,
            unit,
            timestamp,
        }
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace an absent, empty, or literal "now" timestamp with the current
/// UTC instant in ISO-8601 with a trailing `Z`.
fn normalize_timestamp(raw: Option<String>) -> String {
    match raw {
        Some(ts) if !ts.is_empty() && !ts.eq_ignore_ascii_case("now") => ts,
        _ => Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> FieldExtractor {
        FieldExtractor::new()
    }

    #[test]
    fn extracts_all_fields_from_well_formed_report() {
        let text = "Patient ID: P100\nTest Type: Hemoglobin\nTest Value: 9.5 g/dL\nTimestamp: 2025-01-01T00:00:00Z";
        let record = extractor().extract(text);
        assert_eq!(record.patient_id.as_deref(), Some("P100"));
        assert_eq!(record.test_type.as_deref(), Some("Hemoglobin"));
        assert_eq!(record.value, Some(9.5));
        assert_eq!(record.unit.as_deref(), Some("g/dL"));
        assert_eq!(record.timestamp, "2025-01-01T00:00:00Z");
    }

    #[test]
    fn labels_match_case_insensitively() {
        let text = "patient id - p42\ntest type - blood sugar\ntest value - 250 mg/dL";
        let record = extractor().extract(text);
        assert_eq!(record.patient_id.as_deref(), Some("p42"));
        assert_eq!(record.test_type.as_deref(), Some("blood sugar"));
        assert_eq!(record.value, Some(250.0));
        assert_eq!(record.unit.as_deref(), Some("mg/dL"));
    }

    #[test]
    fn tolerates_leading_boilerplate() {
        let text = "SkyVitals Clinic\nConfidential. For patient use only.\n\nPatient ID: A7\nTest Type: Hemoglobin\nTest Value: 13.1 g/dL";
        let record = extractor().extract(text);
        assert_eq!(record.patient_id.as_deref(), Some("A7"));
        assert_eq!(record.value, Some(13.1));
    }

    #[test]
    fn no_matches_yields_nulls_with_backfilled_timestamp() {
        let record = extractor().extract("completely unrelated text");
        assert!(record.patient_id.is_none());
        assert!(record.test_type.is_none());
        assert!(record.value.is_none());
        assert!(record.unit.is_none());
        assert!(record.timestamp.ends_with('Z'));
        assert!(!record.timestamp.is_empty());
    }

    #[test]
    fn missing_value_label_leaves_value_and_unit_unset() {
        let record = extractor().extract("Patient ID: P1\nTest Type: Hemoglobin");
        assert!(record.value.is_none());
        assert!(record.unit.is_none());
    }

    #[test]
    fn percent_unit_is_captured() {
        let record = extractor().extract("Test Value: 37.2 %");
        assert_eq!(record.value, Some(37.2));
        assert_eq!(record.unit.as_deref(), Some("%"));
    }

    #[test]
    fn malformed_numeric_keeps_unit_but_not_value() {
        // Two decimal points: the token matches the pattern but fails to
        // parse, leaving an incomplete record.
        let record = extractor().extract("Test Value: 12.5.6 mg/dL");
        assert!(record.value.is_none());
        assert_eq!(record.unit.as_deref(), Some("mg/dL"));
    }

    #[test]
    fn integer_value_parses() {
        let record = extractor().extract("Test Value: 250 mg/dL");
        assert_eq!(record.value, Some(250.0));
    }

    #[test]
    fn test_time_label_also_captures_timestamp() {
        let record = extractor().extract("Test Time: 2024-12-31T23:59:59.123Z");
        assert_eq!(record.timestamp, "2024-12-31T23:59:59.123Z");
    }

    #[test]
    fn first_match_wins_for_each_field() {
        let text = "Patient ID: FIRST\nPatient ID: SECOND\nTest Value: 1 g\nTest Value: 2 g";
        let record = extractor().extract(text);
        assert_eq!(record.patient_id.as_deref(), Some("FIRST"));
        assert_eq!(record.value, Some(1.0));
    }

    #[test]
    fn test_type_capture_is_trimmed() {
        let record = extractor().extract("Test Type:   Blood Sugar   \nTest Value: 90 mg/dL");
        assert_eq!(record.test_type.as_deref(), Some("Blood Sugar"));
    }

    #[test]
    fn absent_timestamp_is_backfilled_close_to_now() {
        let before = Utc::now();
        let record = extractor().extract("Patient ID: P1");
        let after = Utc::now();
        let parsed = chrono::DateTime::parse_from_rfc3339(&record.timestamp)
            .expect("backfilled timestamp should be RFC 3339");
        assert!(parsed >= before - chrono::Duration::seconds(1));
        assert!(parsed <= after + chrono::Duration::seconds(1));
    }

    #[test]
    fn extraction_is_idempotent_apart_from_backfill() {
        let text = "Patient ID: P9\nTest Type: Hemoglobin\nTest Value: 11 g/dL\nTimestamp: 2025-02-02T10:00:00Z";
        let ex = extractor();
        assert_eq!(ex.extract(text), ex.extract(text));
    }

    #[test]
    fn normalize_timestamp_keeps_real_token() {
        assert_eq!(
            normalize_timestamp(Some("2025-01-01T00:00:00Z".into())),
            "2025-01-01T00:00:00Z"
        );
    }

    #[test]
    fn normalize_timestamp_replaces_now_and_empty() {
        for raw in [Some("now".to_string()), Some("NOW".to_string()), Some(String::new()), None] {
            let ts = normalize_timestamp(raw);
            assert!(ts.ends_with('Z'));
            assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
        }
    }
}
