//! Scripted opinion gateway
//!
//! Serves canned opinions per role, for demo runs and tests. The default
//! script is a calm, cooperative panel; individual opinions and reviews
//! can be replaced to stage any scenario.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::debug;
use triage_application::{OpinionGateway, ProviderError, ProviderErrorKind};
use triage_domain::{CaseInput, Opinion, ReviewFindings, Role, TriageLevel};

/// Gateway answering from a fixed per-role script
pub struct ScriptedOpinionGateway {
    opinions: Mutex<BTreeMap<Role, Opinion>>,
    reviews: Mutex<BTreeMap<Role, ReviewFindings>>,
}

impl ScriptedOpinionGateway {
    /// A calm panel: consult-leaning, no red flags, no veto
    pub fn new() -> Self {
        let mut opinions = BTreeMap::new();
        opinions.insert(
            Role::Symptom,
            Opinion::new(Role::Symptom, TriageLevel::Consult)
                .with_risk_score(50)
                .with_confidence(80)
                .with_extra(
                    "symptom_summary",
                    serde_json::json!("Headache, mild fever"),
                ),
        );
        opinions.insert(
            Role::Risk,
            Opinion::new(Role::Risk, TriageLevel::Consult)
                .with_risk_score(60)
                .with_confidence(70)
                .with_extra(
                    "worst_case_analysis",
                    serde_json::json!("Meningitis unlikely but possible"),
                ),
        );
        opinions.insert(
            Role::Evidence,
            Opinion::new(Role::Evidence, TriageLevel::Unknown)
                .with_confidence(90)
                .with_extra("data_quality_score", serde_json::json!(80)),
        );
        opinions.insert(
            Role::Ethics,
            Opinion::new(Role::Ethics, TriageLevel::Consult).with_veto(false),
        );

        let mut reviews = BTreeMap::new();
        reviews.insert(Role::Risk, ReviewFindings::new(Role::Risk));
        reviews.insert(
            Role::Ethics,
            ReviewFindings::new(Role::Ethics).with_veto(false),
        );

        Self {
            opinions: Mutex::new(opinions),
            reviews: Mutex::new(reviews),
        }
    }

    /// Replace one role's scripted opinion
    pub fn script_opinion(&self, opinion: Opinion) {
        self.opinions.lock().unwrap().insert(opinion.role, opinion);
    }

    /// Replace one reviewer's scripted findings
    pub fn script_review(&self, findings: ReviewFindings) {
        self.reviews.lock().unwrap().insert(findings.role, findings);
    }
}

impl Default for ScriptedOpinionGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OpinionGateway for ScriptedOpinionGateway {
    async fn classify(&self, role: Role, case: &CaseInput) -> Result<Opinion, ProviderError> {
        debug!("scripted classify for {} ({})", role, case.symptoms);
        self.opinions
            .lock()
            .unwrap()
            .get(&role)
            .cloned()
            .ok_or_else(|| {
                ProviderError::new(role, ProviderErrorKind::Rejected, "role not scripted")
            })
    }

    async fn review(
        &self,
        role: Role,
        _round1: &BTreeMap<Role, Opinion>,
    ) -> Result<ReviewFindings, ProviderError> {
        debug!("scripted review for {}", role);
        self.reviews
            .lock()
            .unwrap()
            .get(&role)
            .cloned()
            .ok_or_else(|| {
                ProviderError::new(role, ProviderErrorKind::Rejected, "role not scripted")
            })
    }
}
