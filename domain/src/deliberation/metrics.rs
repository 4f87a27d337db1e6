//! Aggregate metrics over the full opinion set
//!
//! Aggregation is a pure reduction and is independent of the order in
//! which opinions were collected: the inputs are maps keyed by role, so
//! arrival order cannot leak into the result. That is a correctness
//! property: a deliberation run dispatching providers concurrently must
//! produce the same metrics as a sequential one.

use crate::opinion::entities::{Opinion, ReviewFindings};
use crate::opinion::role::Role;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Scalar and flag metrics reduced from one deliberation's opinions
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use triage_domain::{Metrics, Opinion, Role, TriageLevel};
///
/// let mut round1 = BTreeMap::new();
/// round1.insert(
///     Role::Symptom,
///     Opinion::new(Role::Symptom, TriageLevel::SelfCare)
///         .with_risk_score(20)
///         .with_confidence(90),
/// );
/// round1.insert(
///     Role::Risk,
///     Opinion::new(Role::Risk, TriageLevel::Urgent)
///         .with_risk_score(80)
///         .with_confidence(70),
/// );
///
/// let metrics = Metrics::aggregate(&round1, &BTreeMap::new());
/// assert_eq!(metrics.max_risk, 80);
/// assert_eq!(metrics.disagreement_score, 100); // self_care vs urgent
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Highest risk score among risk-reporting roles
    pub max_risk: u8,
    /// Mean risk score among risk-reporting roles
    pub avg_risk: f64,
    /// Lowest confidence reported by any round-1 opinion
    pub min_confidence: u8,
    /// Union of red flags from round 1 and the Risk review
    pub red_flag_union: BTreeSet<String>,
    /// Normalized spread of triage-level ordinals, in [0, 100]
    pub disagreement_score: u8,
    /// Whether Ethics asserted a veto in either round
    pub veto: bool,
}

impl Metrics {
    /// Reduce the opinion set to aggregate metrics.
    ///
    /// - Risk metrics cover only roles that report clinical risk
    ///   (Symptom, Risk)
    /// - Confidence covers every round-1 opinion that reports one
    /// - Red flags union over all of round 1 plus the Risk review
    /// - The veto ORs Ethics' round-1 opinion with its review findings
    /// - Disagreement is `(max ordinal - min ordinal) / 2 * 100` over the
    ///   defined triage levels, 0 when fewer than two are defined
    pub fn aggregate(
        round1: &BTreeMap<Role, Opinion>,
        round2: &BTreeMap<Role, ReviewFindings>,
    ) -> Metrics {
        let risk_scores: Vec<u8> = round1
            .values()
            .filter(|op| op.role.reports_risk())
            .filter_map(|op| op.risk_score)
            .collect();

        let max_risk = risk_scores.iter().copied().max().unwrap_or(0);
        let avg_risk = if risk_scores.is_empty() {
            0.0
        } else {
            risk_scores.iter().map(|s| *s as f64).sum::<f64>() / risk_scores.len() as f64
        };

        // No confidence reported at all reads as zero confidence, which
        // the gate refuses on. A panel that cannot say how sure it is
        // must not produce a triage category.
        let min_confidence = round1
            .values()
            .filter_map(|op| op.confidence)
            .min()
            .unwrap_or(0);

        let mut red_flag_union: BTreeSet<String> = round1
            .values()
            .flat_map(|op| op.red_flags.iter().cloned())
            .collect();
        if let Some(risk_review) = round2.get(&Role::Risk) {
            red_flag_union.extend(risk_review.red_flags.iter().cloned());
        }

        let veto = round1
            .get(&Role::Ethics)
            .is_some_and(Opinion::has_veto)
            || round2
                .get(&Role::Ethics)
                .is_some_and(ReviewFindings::has_veto);

        let ordinals: Vec<u8> = round1
            .values()
            .filter_map(|op| op.triage_level.ordinal())
            .collect();
        let disagreement_score = if ordinals.len() < 2 {
            0
        } else {
            let max = *ordinals.iter().max().unwrap();
            let min = *ordinals.iter().min().unwrap();
            (max - min) * 50
        };

        Metrics {
            max_risk,
            avg_risk,
            min_confidence,
            red_flag_union,
            disagreement_score,
            veto,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opinion::entities::TriageLevel;

    fn panel() -> BTreeMap<Role, Opinion> {
        let mut round1 = BTreeMap::new();
        round1.insert(
            Role::Symptom,
            Opinion::new(Role::Symptom, TriageLevel::Urgent)
                .with_risk_score(80)
                .with_confidence(70),
        );
        round1.insert(
            Role::Risk,
            Opinion::new(Role::Risk, TriageLevel::Urgent)
                .with_risk_score(90)
                .with_confidence(60)
                .with_red_flag("possible meningitis"),
        );
        round1.insert(
            Role::Evidence,
            Opinion::new(Role::Evidence, TriageLevel::Unknown).with_confidence(90),
        );
        round1.insert(
            Role::Ethics,
            Opinion::new(Role::Ethics, TriageLevel::Unknown).with_veto(false),
        );
        round1
    }

    #[test]
    fn test_risk_metrics_cover_risk_reporting_roles_only() {
        let mut round1 = panel();
        // A stray risk score from Evidence must not count
        round1.insert(
            Role::Evidence,
            Opinion::new(Role::Evidence, TriageLevel::Unknown)
                .with_risk_score(100)
                .with_confidence(90),
        );

        let metrics = Metrics::aggregate(&round1, &BTreeMap::new());
        assert_eq!(metrics.max_risk, 90);
        assert_eq!(metrics.avg_risk, 85.0);
    }

    #[test]
    fn test_min_confidence_spans_all_roles() {
        let metrics = Metrics::aggregate(&panel(), &BTreeMap::new());
        assert_eq!(metrics.min_confidence, 60);
    }

    #[test]
    fn test_red_flag_union_includes_risk_review() {
        let mut round2 = BTreeMap::new();
        round2.insert(
            Role::Risk,
            ReviewFindings::new(Role::Risk).with_red_flag("missed sepsis risk"),
        );
        // Ethics review flags are not part of the union
        round2.insert(
            Role::Ethics,
            ReviewFindings::new(Role::Ethics).with_red_flag("scope creep"),
        );

        let metrics = Metrics::aggregate(&panel(), &round2);
        assert!(metrics.red_flag_union.contains("possible meningitis"));
        assert!(metrics.red_flag_union.contains("missed sepsis risk"));
        assert!(!metrics.red_flag_union.contains("scope creep"));
    }

    #[test]
    fn test_veto_ors_both_rounds() {
        let round1 = panel();
        let metrics = Metrics::aggregate(&round1, &BTreeMap::new());
        assert!(!metrics.veto);

        let mut round2 = BTreeMap::new();
        round2.insert(Role::Ethics, ReviewFindings::new(Role::Ethics).with_veto(true));
        let metrics = Metrics::aggregate(&round1, &round2);
        assert!(metrics.veto);

        let mut vetoing = panel();
        vetoing.insert(
            Role::Ethics,
            Opinion::new(Role::Ethics, TriageLevel::Unknown).with_veto(true),
        );
        let metrics = Metrics::aggregate(&vetoing, &BTreeMap::new());
        assert!(metrics.veto);
    }

    #[test]
    fn test_disagreement_full_spread() {
        let mut round1 = panel();
        round1.insert(
            Role::Symptom,
            Opinion::new(Role::Symptom, TriageLevel::SelfCare)
                .with_risk_score(10)
                .with_confidence(80),
        );
        // self_care (0) vs urgent (2) -> 100
        let metrics = Metrics::aggregate(&round1, &BTreeMap::new());
        assert_eq!(metrics.disagreement_score, 100);
    }

    #[test]
    fn test_disagreement_zero_with_fewer_than_two_defined_levels() {
        let mut round1 = BTreeMap::new();
        round1.insert(
            Role::Symptom,
            Opinion::new(Role::Symptom, TriageLevel::Urgent)
                .with_risk_score(80)
                .with_confidence(70),
        );
        round1.insert(
            Role::Evidence,
            Opinion::new(Role::Evidence, TriageLevel::Unknown).with_confidence(90),
        );

        let metrics = Metrics::aggregate(&round1, &BTreeMap::new());
        assert_eq!(metrics.disagreement_score, 0);
    }

    #[test]
    fn test_disagreement_always_in_range() {
        for (a, b) in [
            (TriageLevel::SelfCare, TriageLevel::SelfCare),
            (TriageLevel::SelfCare, TriageLevel::Consult),
            (TriageLevel::SelfCare, TriageLevel::Urgent),
            (TriageLevel::Consult, TriageLevel::Urgent),
            (TriageLevel::Urgent, TriageLevel::Urgent),
        ] {
            let mut round1 = BTreeMap::new();
            round1.insert(Role::Symptom, Opinion::new(Role::Symptom, a));
            round1.insert(Role::Risk, Opinion::new(Role::Risk, b));
            let metrics = Metrics::aggregate(&round1, &BTreeMap::new());
            assert!(metrics.disagreement_score <= 100);
        }
    }

    #[test]
    fn test_aggregation_is_order_independent() {
        // Insert the same opinions in two different collection orders;
        // the keyed state must erase any trace of arrival order.
        let opinions: Vec<Opinion> = panel().into_values().collect();

        let mut forward = BTreeMap::new();
        for op in opinions.iter().cloned() {
            forward.insert(op.role, op);
        }
        let mut backward = BTreeMap::new();
        for op in opinions.iter().rev().cloned() {
            backward.insert(op.role, op);
        }

        assert_eq!(
            Metrics::aggregate(&forward, &BTreeMap::new()),
            Metrics::aggregate(&backward, &BTreeMap::new())
        );
    }
}
