//! The decision gate - deterministic safety gating over aggregate metrics
//!
//! An ordered rule list, first match wins. The gate is a total function:
//! given well-formed metrics it always produces a decision category and a
//! confidence label, with no side effects and no hidden state. Identical
//! metrics always yield the identical outcome.

use crate::deliberation::metrics::Metrics;
use serde::{Deserialize, Serialize};

/// Final triage category for a deliberation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinalDecision {
    SelfCare,
    Consult,
    Urgent,
    /// The panel declines to triage: veto, low confidence, or high
    /// disagreement
    Refused,
}

impl FinalDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinalDecision::SelfCare => "SELF_CARE",
            FinalDecision::Consult => "CONSULT",
            FinalDecision::Urgent => "URGENT",
            FinalDecision::Refused => "REFUSED",
        }
    }

    /// Whether this outcome triggers specialist referral matching
    pub fn needs_referral(&self) -> bool {
        matches!(self, FinalDecision::Consult | FinalDecision::Urgent)
    }
}

impl std::fmt::Display for FinalDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Confidence label derived from the panel's minimum confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    /// Label for a minimum-confidence value.
    ///
    /// `Low` is only observable alongside an outcome decided by a rule
    /// above the low-confidence refusal (a veto or a red flag).
    pub fn from_min_confidence(min_confidence: u8) -> Self {
        match min_confidence {
            70.. => ConfidenceLevel::High,
            40..70 => ConfidenceLevel::Medium,
            _ => ConfidenceLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::Low => "Low",
            ConfidenceLevel::Medium => "Medium",
            ConfidenceLevel::High => "High",
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Apply the safety-gating rules to aggregate metrics.
///
/// Rule order is load-bearing and must not be rearranged:
///
/// 1. Ethics veto → `Refused` (absolute override)
/// 2. Any red flag → `Urgent`
/// 3. Minimum confidence below 40 → `Refused`
/// 4. Disagreement above 50 → `Refused`
/// 5. Average risk above 70 → `Consult`
/// 6. Otherwise → `SelfCare`
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
/// use triage_domain::{FinalDecision, Metrics, decide};
///
/// let metrics = Metrics {
///     max_risk: 30,
///     avg_risk: 25.0,
///     min_confidence: 85,
///     red_flag_union: BTreeSet::new(),
///     disagreement_score: 0,
///     veto: false,
/// };
/// assert_eq!(decide(&metrics).0, FinalDecision::SelfCare);
/// ```
pub fn decide(metrics: &Metrics) -> (FinalDecision, ConfidenceLevel) {
    let confidence = ConfidenceLevel::from_min_confidence(metrics.min_confidence);

    let decision = if metrics.veto {
        FinalDecision::Refused
    } else if !metrics.red_flag_union.is_empty() {
        FinalDecision::Urgent
    } else if metrics.min_confidence < 40 {
        FinalDecision::Refused
    } else if metrics.disagreement_score > 50 {
        FinalDecision::Refused
    } else if metrics.avg_risk > 70.0 {
        FinalDecision::Consult
    } else {
        FinalDecision::SelfCare
    };

    (decision, confidence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn metrics() -> Metrics {
        Metrics {
            max_risk: 50,
            avg_risk: 50.0,
            min_confidence: 80,
            red_flag_union: BTreeSet::new(),
            disagreement_score: 0,
            veto: false,
        }
    }

    fn flags(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_veto_overrides_everything() {
        // Red flags, high confidence, low disagreement: veto still wins
        let m = Metrics {
            veto: true,
            red_flag_union: flags(&["possible meningitis"]),
            ..metrics()
        };
        assert_eq!(decide(&m).0, FinalDecision::Refused);
    }

    #[test]
    fn test_red_flag_forces_urgent() {
        let m = Metrics {
            red_flag_union: flags(&["possible meningitis"]),
            ..metrics()
        };
        assert_eq!(decide(&m).0, FinalDecision::Urgent);
    }

    #[test]
    fn test_red_flag_outranks_low_confidence() {
        let m = Metrics {
            red_flag_union: flags(&["chest pain at rest"]),
            min_confidence: 10,
            ..metrics()
        };
        let (decision, confidence) = decide(&m);
        assert_eq!(decision, FinalDecision::Urgent);
        assert_eq!(confidence, ConfidenceLevel::Low);
    }

    #[test]
    fn test_low_confidence_refuses() {
        let m = Metrics {
            min_confidence: 30,
            ..metrics()
        };
        assert_eq!(decide(&m), (FinalDecision::Refused, ConfidenceLevel::Low));
    }

    #[test]
    fn test_high_disagreement_refuses() {
        let m = Metrics {
            disagreement_score: 100,
            ..metrics()
        };
        assert_eq!(decide(&m).0, FinalDecision::Refused);
    }

    #[test]
    fn test_boundary_values() {
        // Exactly 40 confidence and exactly 50 disagreement pass through
        let m = Metrics {
            min_confidence: 40,
            disagreement_score: 50,
            avg_risk: 70.0,
            ..metrics()
        };
        // avg_risk of exactly 70 is not "above 70"
        assert_eq!(decide(&m), (FinalDecision::SelfCare, ConfidenceLevel::Medium));
    }

    #[test]
    fn test_high_avg_risk_consults() {
        let m = Metrics {
            avg_risk: 75.0,
            ..metrics()
        };
        assert_eq!(decide(&m).0, FinalDecision::Consult);
    }

    #[test]
    fn test_calm_panel_self_cares() {
        let m = Metrics {
            avg_risk: 30.0,
            ..metrics()
        };
        assert_eq!(decide(&m), (FinalDecision::SelfCare, ConfidenceLevel::High));
    }

    #[test]
    fn test_gate_is_deterministic() {
        let m = Metrics {
            avg_risk: 75.0,
            min_confidence: 55,
            ..metrics()
        };
        let first = decide(&m);
        for _ in 0..10 {
            assert_eq!(decide(&m), first);
        }
    }

    #[test]
    fn test_confidence_labels() {
        assert_eq!(
            ConfidenceLevel::from_min_confidence(70),
            ConfidenceLevel::High
        );
        assert_eq!(
            ConfidenceLevel::from_min_confidence(69),
            ConfidenceLevel::Medium
        );
        assert_eq!(
            ConfidenceLevel::from_min_confidence(40),
            ConfidenceLevel::Medium
        );
        assert_eq!(
            ConfidenceLevel::from_min_confidence(39),
            ConfidenceLevel::Low
        );
    }
}
