//! Decision value object - the auditable output of one deliberation

use crate::deliberation::gate::{ConfidenceLevel, FinalDecision, decide};
use crate::deliberation::metrics::Metrics;
use crate::referral::doctor::Doctor;
use serde::{Deserialize, Serialize};

/// Final, auditable outcome of one deliberation run
///
/// Carries the metrics that produced it and a timestamp so a decision can
/// be audited without replaying the run. Returned to the caller and not
/// retained by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    /// Gated triage category
    pub final_decision: FinalDecision,
    /// Plain-language explanation of which rule fired and why
    pub reasoning_summary: String,
    /// Warnings the caller must surface verbatim
    pub safety_notes: Vec<String>,
    /// Label derived from the panel's minimum confidence
    pub confidence_level: ConfidenceLevel,
    /// Non-diagnostic guidance, ordered
    pub next_steps: Vec<String>,
    /// Matched specialists, at most three
    pub recommended_doctors: Vec<Doctor>,
    /// The aggregate metrics this decision was gated on
    pub metrics: Metrics,
    /// Milliseconds since epoch, for auditing
    pub timestamp: u64,
}

impl Decision {
    /// Gate the metrics and render the decision narrative.
    ///
    /// The category comes from the deterministic rule list; the summary,
    /// safety notes, and next steps are rendered from the same metrics so
    /// the narrative can never contradict the category.
    pub fn synthesize(metrics: Metrics) -> Self {
        let (final_decision, confidence_level) = decide(&metrics);

        let reasoning_summary = Self::render_summary(final_decision, &metrics);
        let safety_notes = Self::render_safety_notes(final_decision, &metrics);
        let next_steps = Self::render_next_steps(final_decision);

        Self {
            final_decision,
            reasoning_summary,
            safety_notes,
            confidence_level,
            next_steps,
            recommended_doctors: Vec::new(),
            metrics,
            timestamp: current_timestamp(),
        }
    }

    /// Attach matched specialists
    pub fn with_doctors(mut self, doctors: Vec<Doctor>) -> Self {
        self.recommended_doctors = doctors;
        self
    }

    fn render_summary(decision: FinalDecision, metrics: &Metrics) -> String {
        match decision {
            FinalDecision::Refused if metrics.veto => {
                "The safety reviewer vetoed this case; the panel declines to triage it."
                    .to_string()
            }
            FinalDecision::Refused if metrics.min_confidence < 40 => format!(
                "Panel confidence bottomed out at {}%, below the 40% floor; \
                 no category can be assigned responsibly.",
                metrics.min_confidence
            ),
            FinalDecision::Refused => format!(
                "The panel disagreed too strongly (spread {}%) to settle on a category.",
                metrics.disagreement_score
            ),
            FinalDecision::Urgent => format!(
                "{} red flag(s) were raised; any red flag escalates straight to urgent.",
                metrics.red_flag_union.len()
            ),
            FinalDecision::Consult => format!(
                "Average risk of {:.0}% exceeds the 70% threshold; a professional \
                 consultation is warranted.",
                metrics.avg_risk
            ),
            FinalDecision::SelfCare => format!(
                "No red flags, adequate confidence ({}%), and average risk of {:.0}%; \
                 the case can be managed with self care.",
                metrics.min_confidence, metrics.avg_risk
            ),
        }
    }

    fn render_safety_notes(decision: FinalDecision, metrics: &Metrics) -> Vec<String> {
        let mut notes = Vec::new();
        for flag in &metrics.red_flag_union {
            notes.push(format!("Red flag: {}", flag));
        }
        if metrics.veto {
            notes.push("A safety veto was asserted during deliberation.".to_string());
        }
        if decision == FinalDecision::Refused {
            notes.push(
                "No triage category was assigned. Seek professional advice directly."
                    .to_string(),
            );
        }
        notes.push("This is automated triage support, not a medical diagnosis.".to_string());
        notes
    }

    fn render_next_steps(decision: FinalDecision) -> Vec<String> {
        match decision {
            FinalDecision::SelfCare => vec![
                "Monitor symptoms and rest.".to_string(),
                "Seek care if symptoms worsen or persist.".to_string(),
            ],
            FinalDecision::Consult => vec![
                "Arrange an appointment with a practitioner in the coming days.".to_string(),
                "Bring a list of current symptoms and medications.".to_string(),
            ],
            FinalDecision::Urgent => vec![
                "Seek in-person medical care now.".to_string(),
                "If symptoms are severe, call emergency services.".to_string(),
            ],
            FinalDecision::Refused => vec![
                "Contact a medical professional directly for guidance.".to_string(),
            ],
        }
    }
}

/// Get current timestamp in milliseconds
fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn metrics() -> Metrics {
        Metrics {
            max_risk: 40,
            avg_risk: 30.0,
            min_confidence: 80,
            red_flag_union: BTreeSet::new(),
            disagreement_score: 0,
            veto: false,
        }
    }

    #[test]
    fn test_narrative_matches_category() {
        let decision = Decision::synthesize(metrics());
        assert_eq!(decision.final_decision, FinalDecision::SelfCare);
        assert!(decision.reasoning_summary.contains("self care"));
        assert!(decision.recommended_doctors.is_empty());
    }

    #[test]
    fn test_red_flags_become_safety_notes() {
        let mut m = metrics();
        m.red_flag_union.insert("possible meningitis".to_string());

        let decision = Decision::synthesize(m);
        assert_eq!(decision.final_decision, FinalDecision::Urgent);
        assert!(
            decision
                .safety_notes
                .iter()
                .any(|n| n.contains("possible meningitis"))
        );
    }

    #[test]
    fn test_refusal_carries_explicit_note() {
        let m = Metrics {
            veto: true,
            ..metrics()
        };
        let decision = Decision::synthesize(m);
        assert_eq!(decision.final_decision, FinalDecision::Refused);
        assert!(
            decision
                .safety_notes
                .iter()
                .any(|n| n.contains("No triage category"))
        );
    }

    #[test]
    fn test_every_decision_disclaims_diagnosis() {
        for m in [
            metrics(),
            Metrics {
                veto: true,
                ..metrics()
            },
            Metrics {
                avg_risk: 90.0,
                ..metrics()
            },
        ] {
            let decision = Decision::synthesize(m);
            assert!(
                decision
                    .safety_notes
                    .iter()
                    .any(|n| n.contains("not a medical diagnosis"))
            );
            assert!(!decision.next_steps.is_empty());
        }
    }
}
