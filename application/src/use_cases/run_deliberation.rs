//! Run Deliberation use case
//!
//! Orchestrates the fixed three-round triage protocol: independent
//! analysis, challenge review, synthesis. Round 1 fans out to all four
//! roles concurrently and joins at a barrier; Round 2 only starts once
//! the barrier holds the complete opinion set; Round 3 is pure
//! computation over that set.
//!
//! Triage is safety-critical, so a missing opinion never degrades
//! silently: any Round 1 failure cancels the outstanding sibling calls
//! and fails the whole run.

use crate::config::{DeliberationParams, ReviewFailurePolicy};
use crate::ports::audit::{AuditRecord, AuditSink, NoAudit};
use crate::ports::opinion_gateway::{OpinionGateway, ProviderError};
use crate::ports::progress::{DeliberationProgress, NoProgress};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use triage_domain::{
    AggregationError, CaseInput, Decision, DeliberationState, Doctor, Metrics, ReviewFindings,
    Role, Round, ValidationError, recommend,
};

/// Underlying cause of a failed deliberation
#[derive(Error, Debug)]
pub enum DeliberationCause {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    #[error("provider task panicked: {0}")]
    TaskPanicked(String),
}

/// A deliberation that failed, naming the round it failed in
///
/// No partial decision exists alongside this error; a run either
/// produces a full [`Decision`] or this.
#[derive(Error, Debug)]
#[error("deliberation failed in {}: {cause}", stage.as_str())]
pub struct DeliberationError {
    pub stage: Round,
    #[source]
    pub cause: DeliberationCause,
}

impl DeliberationError {
    fn new(stage: Round, cause: impl Into<DeliberationCause>) -> Self {
        Self {
            stage,
            cause: cause.into(),
        }
    }
}

/// Use case for running one triage deliberation
///
/// Holds the gateway, the read-only specialist directory, and the run
/// parameters. Each `execute` call owns its own [`DeliberationState`];
/// concurrent runs share nothing mutable.
pub struct RunDeliberationUseCase<G: OpinionGateway + 'static> {
    gateway: Arc<G>,
    directory: Vec<Doctor>,
    params: DeliberationParams,
    audit: Arc<dyn AuditSink>,
}

impl<G: OpinionGateway + 'static> RunDeliberationUseCase<G> {
    pub fn new(gateway: Arc<G>, directory: Vec<Doctor>) -> Self {
        Self {
            gateway,
            directory,
            params: DeliberationParams::default(),
            audit: Arc::new(NoAudit),
        }
    }

    pub fn with_params(mut self, params: DeliberationParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, case: CaseInput) -> Result<Decision, DeliberationError> {
        self.execute_with_progress(case, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        case: CaseInput,
        progress: &dyn DeliberationProgress,
    ) -> Result<Decision, DeliberationError> {
        case.validate()
            .map_err(|e| DeliberationError::new(Round::Analysis, e))?;

        info!("Starting deliberation for case (age {})", case.age);
        let mut state = DeliberationState::new();

        self.round_analysis(&case, &mut state, progress).await?;
        self.round_review(&mut state, progress).await?;
        self.round_synthesis(&case, state, progress)
    }

    /// Round 1: all four roles classify the case in parallel.
    ///
    /// The barrier is strict: one failure aborts the run and cancels the
    /// outstanding siblings (best effort, via JoinSet abort).
    async fn round_analysis(
        &self,
        case: &CaseInput,
        state: &mut DeliberationState,
        progress: &dyn DeliberationProgress,
    ) -> Result<(), DeliberationError> {
        info!("Round 1: Independent Analysis");
        progress.on_round_start(&Round::Analysis, Role::ALL.len());

        let mut join_set = JoinSet::new();

        for role in Role::ALL {
            let gateway = Arc::clone(&self.gateway);
            let case = case.clone();
            let params = self.params.clone();

            join_set.spawn(async move {
                let result = Self::classify_with_policy(&gateway, role, &case, &params).await;
                (role, result)
            });
        }

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((role, Ok(opinion))) => {
                    debug!("{} delivered: {}", role, opinion.triage_level);
                    // Field constraints are enforced on arrival; a
                    // corrupted opinion never reaches aggregation
                    if let Err(e) = opinion.validate() {
                        warn!("{} opinion violated constraints: {}", role, e);
                        progress.on_task_complete(&Round::Analysis, role, false);
                        join_set.abort_all();
                        return Err(DeliberationError::new(Round::Analysis, e));
                    }
                    progress.on_task_complete(&Round::Analysis, role, true);
                    state.record_opinion(opinion);
                }
                Ok((role, Err(e))) => {
                    warn!("{} provider failed: {}", role, e);
                    progress.on_task_complete(&Round::Analysis, role, false);
                    join_set.abort_all();
                    return Err(DeliberationError::new(Round::Analysis, e));
                }
                Err(join_err) if join_err.is_cancelled() => {}
                Err(join_err) => {
                    join_set.abort_all();
                    return Err(DeliberationError::new(
                        Round::Analysis,
                        DeliberationCause::TaskPanicked(join_err.to_string()),
                    ));
                }
            }
        }

        debug_assert!(state.round1_complete());
        progress.on_round_complete(&Round::Analysis);
        Ok(())
    }

    /// Round 2: Risk and Ethics challenge the round-1 opinions.
    ///
    /// Starts only after the Round 1 barrier; the reviews genuinely
    /// depend on the complete opinion set.
    async fn round_review(
        &self,
        state: &mut DeliberationState,
        progress: &dyn DeliberationProgress,
    ) -> Result<(), DeliberationError> {
        info!("Round 2: Challenge & Review");
        progress.on_round_start(&Round::Review, Role::REVIEWERS.len());

        let round1 = Arc::new(state.round1.clone());
        let mut join_set = JoinSet::new();

        for role in Role::REVIEWERS {
            let gateway = Arc::clone(&self.gateway);
            let round1 = Arc::clone(&round1);
            let params = self.params.clone();

            join_set.spawn(async move {
                let result = Self::review_with_policy(&gateway, role, &round1, &params).await;
                (role, result)
            });
        }

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((role, Ok(findings))) => {
                    progress.on_task_complete(&Round::Review, role, true);
                    state.record_review(findings);
                }
                Ok((role, Err(e))) => {
                    progress.on_task_complete(&Round::Review, role, false);
                    match self.params.review_failure_policy {
                        ReviewFailurePolicy::Abort => {
                            warn!("{} review failed, aborting run: {}", role, e);
                            join_set.abort_all();
                            return Err(DeliberationError::new(Round::Review, e));
                        }
                        ReviewFailurePolicy::NoNewFindings => {
                            // Explicitly configured degrade mode: the
                            // failed review contributes nothing new
                            warn!("{} review failed, degrading to no new findings: {}", role, e);
                            state.record_review(ReviewFindings::empty(role));
                        }
                    }
                }
                Err(join_err) if join_err.is_cancelled() => {}
                Err(join_err) => {
                    join_set.abort_all();
                    return Err(DeliberationError::new(
                        Round::Review,
                        DeliberationCause::TaskPanicked(join_err.to_string()),
                    ));
                }
            }
        }

        progress.on_round_complete(&Round::Review);
        Ok(())
    }

    /// Round 3: aggregate, gate, and match referrals.
    ///
    /// Pure computation; with a complete and validated opinion set this
    /// cannot fail.
    fn round_synthesis(
        &self,
        case: &CaseInput,
        state: DeliberationState,
        progress: &dyn DeliberationProgress,
    ) -> Result<Decision, DeliberationError> {
        info!("Round 3: Decision Gate");
        progress.on_round_start(&Round::Synthesis, 1);

        let metrics = Metrics::aggregate(&state.round1, &state.round2);
        if metrics.veto {
            warn!("Ethics veto asserted");
        }

        let mut decision = Decision::synthesize(metrics);
        if decision.final_decision.needs_referral() {
            let final_decision = decision.final_decision;
            decision = decision.with_doctors(recommend(
                final_decision,
                &case.symptoms,
                &self.directory,
            ));
        }

        info!("Final decision: {}", decision.final_decision);
        self.audit
            .record(&AuditRecord::new(case.clone(), state, decision.clone()));

        progress.on_round_complete(&Round::Synthesis);
        Ok(decision)
    }

    /// One classify call under the configured timeout and retry budget
    async fn classify_with_policy(
        gateway: &G,
        role: Role,
        case: &CaseInput,
        params: &DeliberationParams,
    ) -> Result<triage_domain::Opinion, ProviderError> {
        let mut attempt: u8 = 0;
        loop {
            let outcome = match tokio::time::timeout(
                params.call_timeout,
                gateway.classify(role, case),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => Err(ProviderError::timeout(role)),
            };

            match outcome {
                Ok(opinion) => return Ok(opinion),
                Err(e) if e.is_retryable() && attempt < params.max_retries => {
                    attempt += 1;
                    warn!("{} classify attempt {} failed, retrying: {}", role, attempt, e);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// One review call under the configured timeout and retry budget
    async fn review_with_policy(
        gateway: &G,
        role: Role,
        round1: &std::collections::BTreeMap<Role, triage_domain::Opinion>,
        params: &DeliberationParams,
    ) -> Result<ReviewFindings, ProviderError> {
        let mut attempt: u8 = 0;
        loop {
            let outcome = match tokio::time::timeout(
                params.call_timeout,
                gateway.review(role, round1),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => Err(ProviderError::timeout(role)),
            };

            match outcome {
                Ok(findings) => return Ok(findings),
                Err(e) if e.is_retryable() && attempt < params.max_retries => {
                    attempt += 1;
                    warn!("{} review attempt {} failed, retrying: {}", role, attempt, e);
                }
                Err(e) => return Err(e),
            }
        }
    }
}
