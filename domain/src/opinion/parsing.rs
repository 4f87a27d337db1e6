//! Opinion extraction from raw provider responses.
//!
//! Providers answer in JSON mode but the payloads are still
//! model-generated, so every field is checked on the way in. This is pure
//! domain logic with no I/O.
//!
//! Range violations are reported, never repaired: a `risk_score` of 150
//! fails parsing rather than being clamped to 100.

use crate::opinion::entities::{Opinion, ReviewFindings, TriageLevel};
use crate::opinion::role::Role;
use serde_json::Value;
use thiserror::Error;

/// A provider response that could not be turned into an opinion
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OpinionParseError {
    #[error("{role} response is not a JSON object")]
    NotAnObject { role: Role },

    #[error("{role} response is not valid JSON: {detail}")]
    InvalidJson { role: Role, detail: String },

    #[error("{role} field `{field}` has value {value} outside [0, 100]")]
    OutOfRange {
        role: Role,
        field: &'static str,
        value: f64,
    },

    #[error("{role} field `{field}` is not a number")]
    NotANumber { role: Role, field: &'static str },

    #[error("{role} reported unknown triage level: {value}")]
    UnknownTriageLevel { role: Role, value: String },
}

/// Fields lifted into the structured [`Opinion`]; everything else the
/// provider returned lands in `extra`.
const KNOWN_FIELDS: [&str; 4] = ["triage_level", "risk_score", "confidence", "red_flags"];

/// Parse a Round 1 classify response into an [`Opinion`].
///
/// Missing fields are tolerated where a role legitimately omits them
/// (Evidence reports no triage level, Ethics may report no scores); a
/// present field with a bad value is always an error.
pub fn parse_opinion(role: Role, raw: &str) -> Result<Opinion, OpinionParseError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| OpinionParseError::InvalidJson {
        role,
        detail: e.to_string(),
    })?;
    let object = value
        .as_object()
        .ok_or(OpinionParseError::NotAnObject { role })?;

    let triage_level = match object.get("triage_level") {
        Some(Value::String(s)) => {
            s.parse::<TriageLevel>()
                .map_err(|_| OpinionParseError::UnknownTriageLevel {
                    role,
                    value: s.clone(),
                })?
        }
        // Absent or null means the role declined to place the case
        Some(Value::Null) | None => TriageLevel::Unknown,
        Some(other) => {
            return Err(OpinionParseError::UnknownTriageLevel {
                role,
                value: other.to_string(),
            });
        }
    };

    let mut opinion = Opinion::new(role, triage_level)
        .with_red_flags(string_list(object.get("red_flags")));
    opinion.risk_score = score_field(role, object, "risk_score")?;
    opinion.confidence = score_field(role, object, "confidence")?;
    opinion.veto = object.get("veto").and_then(Value::as_bool);

    for (key, val) in object {
        if !KNOWN_FIELDS.contains(&key.as_str()) && key != "veto" {
            opinion.extra.insert(key.clone(), val.clone());
        }
    }

    Ok(opinion)
}

/// Parse a Round 2 review response into [`ReviewFindings`].
///
/// Only red flags and the veto are lifted; a review with neither simply
/// contributes nothing new.
pub fn parse_review(role: Role, raw: &str) -> Result<ReviewFindings, OpinionParseError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| OpinionParseError::InvalidJson {
        role,
        detail: e.to_string(),
    })?;
    let object = value
        .as_object()
        .ok_or(OpinionParseError::NotAnObject { role })?;

    let mut findings =
        ReviewFindings::new(role).with_red_flags(string_list(object.get("red_flags")));
    findings.veto = object.get("veto").and_then(Value::as_bool);

    for (key, val) in object {
        if key != "red_flags" && key != "veto" {
            findings.extra.insert(key.clone(), val.clone());
        }
    }

    Ok(findings)
}

/// Extract an optional score field, enforcing the [0, 100] range
fn score_field(
    role: Role,
    object: &serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<Option<u8>, OpinionParseError> {
    match object.get(field) {
        Some(Value::Null) | None => Ok(None),
        Some(value) => {
            let number = value
                .as_f64()
                .ok_or(OpinionParseError::NotANumber { role, field })?;
            if !(0.0..=100.0).contains(&number) {
                return Err(OpinionParseError::OutOfRange {
                    role,
                    field,
                    value: number,
                });
            }
            Ok(Some(number.round() as u8))
        }
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_opinion() {
        let raw = r#"{
            "triage_level": "consult",
            "risk_score": 50,
            "confidence": 80,
            "red_flags": [],
            "symptom_summary": "Headache, mild fever"
        }"#;

        let opinion = parse_opinion(Role::Symptom, raw).unwrap();
        assert_eq!(opinion.triage_level, TriageLevel::Consult);
        assert_eq!(opinion.risk_score, Some(50));
        assert_eq!(opinion.confidence, Some(80));
        assert!(opinion.red_flags.is_empty());
        assert!(opinion.extra.contains_key("symptom_summary"));
    }

    #[test]
    fn test_parse_hyphenated_level() {
        let raw = r#"{"triage_level": "self-care", "risk_score": 10, "confidence": 90}"#;
        let opinion = parse_opinion(Role::Symptom, raw).unwrap();
        assert_eq!(opinion.triage_level, TriageLevel::SelfCare);
    }

    #[test]
    fn test_missing_scores_tolerated() {
        // Evidence reports confidence only; Ethics may report only a veto
        let raw = r#"{"confidence": 90, "data_quality_score": 80}"#;
        let opinion = parse_opinion(Role::Evidence, raw).unwrap();
        assert_eq!(opinion.triage_level, TriageLevel::Unknown);
        assert_eq!(opinion.risk_score, None);
        assert_eq!(opinion.confidence, Some(90));
    }

    #[test]
    fn test_out_of_range_score_rejected() {
        let raw = r#"{"triage_level": "urgent", "risk_score": 150}"#;
        let err = parse_opinion(Role::Risk, raw).unwrap_err();
        assert!(matches!(
            err,
            OpinionParseError::OutOfRange {
                role: Role::Risk,
                field: "risk_score",
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_triage_level_rejected() {
        let raw = r#"{"triage_level": "critical"}"#;
        let err = parse_opinion(Role::Symptom, raw).unwrap_err();
        assert!(matches!(err, OpinionParseError::UnknownTriageLevel { .. }));
    }

    #[test]
    fn test_non_json_rejected() {
        let err = parse_opinion(Role::Ethics, "I cannot answer that").unwrap_err();
        assert!(matches!(err, OpinionParseError::InvalidJson { .. }));
    }

    #[test]
    fn test_parse_review_lifts_flags_and_veto() {
        let raw = r#"{"red_flags": ["missed sepsis risk"], "veto": false}"#;
        let findings = parse_review(Role::Risk, raw).unwrap();
        assert_eq!(findings.red_flags, vec!["missed sepsis risk".to_string()]);
        assert!(!findings.has_veto());
    }

    #[test]
    fn test_parse_review_veto() {
        let raw = r#"{"veto": true, "refusal_reason": "unsafe reassurance"}"#;
        let findings = parse_review(Role::Ethics, raw).unwrap();
        assert!(findings.has_veto());
        assert!(findings.extra.contains_key("refusal_reason"));
    }
}
