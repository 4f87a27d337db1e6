//! Progress notification port
//!
//! Defines the interface for reporting progress during a deliberation.

use triage_domain::{Role, Round};

/// Callback for progress updates during a deliberation run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, web UI, etc.)
pub trait DeliberationProgress: Send + Sync {
    /// Called when a round starts
    fn on_round_start(&self, round: &Round, total_tasks: usize);

    /// Called when a role's task completes within a round
    fn on_task_complete(&self, round: &Round, role: Role, success: bool);

    /// Called when a round completes
    fn on_round_complete(&self, round: &Round);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl DeliberationProgress for NoProgress {
    fn on_round_start(&self, _round: &Round, _total_tasks: usize) {}
    fn on_task_complete(&self, _round: &Round, _role: Role, _success: bool) {}
    fn on_round_complete(&self, _round: &Round) {}
}
