//! Prompt templates for opinion providers
//!
//! Providers that delegate to a text-generation backend render these
//! per-role templates. The backend is only ever asked to produce a
//! structured opinion, never to decide; arbitration stays in the
//! deterministic gate.

use crate::core::case::CaseInput;
use crate::opinion::entities::Opinion;
use crate::opinion::role::Role;
use std::collections::BTreeMap;

/// Templates for generating provider prompts per role and round
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for a role's Round 1 classify call
    pub fn classify_system(role: Role) -> &'static str {
        match role {
            Role::Symptom => {
                r#"You are the Symptom Interpretation Agent.
Your Goal: Extract structured symptoms and detect RED FLAGS.
Constraints:
- NEVER name diseases.
- NEVER diagnose.
- Output JSON only.

Output Format:
{
    "triage_level": "self_care | consult | urgent | unknown",
    "risk_score": 0-100,
    "confidence": 0-100,
    "red_flags": ["list any potentially serious symptoms"],
    "symptom_summary": "Structured list of symptoms"
}"#
            }
            Role::Risk => {
                r#"You are the Risk Stratification Agent (The Skeptic).
Your Goal: Assume the WORST PLAUSIBLE CASE. Penalize optimism.
Constraints:
- Flag anything potentially life-threatening.
- Output JSON only.

Output Format:
{
    "triage_level": "self_care | consult | urgent | unknown",
    "risk_score": 0-100,
    "confidence": 0-100,
    "red_flags": ["worst-case scenarios"],
    "worst_case_analysis": "What could go wrong"
}"#
            }
            Role::Evidence => {
                r#"You are the Evidence Quality Agent.
Your Goal: Score completeness of inputs; identify missing vitals or unclear descriptions.
Constraints:
- Low evidence means low confidence.
- Missing inputs INCREASE uncertainty.
- Output JSON only.

Output Format:
{
    "triage_level": "unknown",
    "confidence": 0-100,
    "red_flags": ["list missing critical info"],
    "data_quality_score": 0-100,
    "missing_information": ["list what is needed"]
}"#
            }
            Role::Ethics => {
                r#"You are the Ethics & Safety Agent.
Your Goal: strict safety enforcement.
Powers: Veto diagnosis, unsafe reassurance, or scope creep.
Constraints:
- FORCE REFUSAL if uncertain or unsafe.
- Output JSON only.

Output Format:
{
    "triage_level": "self_care | consult | urgent | unknown",
    "confidence": 0-100,
    "red_flags": ["safety violations"],
    "veto": true or false,
    "refusal_reason": "why we must refuse (if applicable)"
}"#
            }
        }
    }

    /// User prompt for a Round 1 classify call
    pub fn classify_user(role: Role, case: &CaseInput) -> String {
        let payload = serde_json::to_string_pretty(case).unwrap_or_default();
        match role {
            Role::Symptom => format!(
                "Analyze the following patient inputs:\n\n{}\n\nIdentify symptoms and red flags.",
                payload
            ),
            Role::Risk => format!("Evaluate the risks for:\n\n{}", payload),
            Role::Evidence => format!("Assess the quality of the following data:\n\n{}", payload),
            Role::Ethics => format!("Review the following case for safety:\n\n{}", payload),
        }
    }

    /// System prompt for a Round 2 review call
    pub fn review_system(role: Role) -> &'static str {
        match role {
            Role::Risk => {
                r#"You are the Risk Stratification Agent reviewing the panel's first-round opinions.
Your Goal: Identify risks the panel missed.
Constraints:
- Output JSON only.

Output Format:
{
    "red_flags": ["missed risks, empty if none"]
}"#
            }
            Role::Ethics => {
                r#"You are the Ethics & Safety Agent reviewing the panel's first-round opinions.
Your Goal: Veto if the combined picture is unsafe.
Constraints:
- Output JSON only.

Output Format:
{
    "red_flags": ["safety violations, empty if none"],
    "veto": true or false,
    "refusal_reason": "why we must refuse (if applicable)"
}"#
            }
            // Symptom and Evidence never review; a neutral instruction
            // keeps this total for callers that ignore is_reviewer()
            Role::Symptom | Role::Evidence => {
                r#"Review the panel's first-round opinions. Output JSON only:
{ "red_flags": [] }"#
            }
        }
    }

    /// User prompt for a Round 2 review call, carrying the full round-1
    /// opinion set as the review target
    pub fn review_user(round1: &BTreeMap<Role, Opinion>) -> String {
        let target: BTreeMap<&str, &Opinion> = round1
            .iter()
            .map(|(role, op)| (role.as_str(), op))
            .collect();
        let payload = serde_json::json!({ "review_target": target });
        format!(
            "Review these first-round outputs:\n\n{}",
            serde_json::to_string_pretty(&payload).unwrap_or_default()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opinion::entities::TriageLevel;

    #[test]
    fn test_classify_prompts_demand_json() {
        for role in Role::ALL {
            assert!(PromptTemplate::classify_system(role).contains("JSON"));
        }
    }

    #[test]
    fn test_classify_user_embeds_case() {
        let case = CaseInput::new("crushing chest pain", "58", "hypertension");
        let prompt = PromptTemplate::classify_user(Role::Symptom, &case);
        assert!(prompt.contains("crushing chest pain"));
        assert!(prompt.contains("58"));
    }

    #[test]
    fn test_review_user_carries_review_target() {
        let mut round1 = BTreeMap::new();
        round1.insert(
            Role::Symptom,
            Opinion::new(Role::Symptom, TriageLevel::Consult).with_risk_score(50),
        );
        let prompt = PromptTemplate::review_user(&round1);
        assert!(prompt.contains("review_target"));
        assert!(prompt.contains("symptom"));
    }
}
