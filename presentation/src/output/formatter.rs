//! Output formatter trait

use triage_domain::Decision;

/// Trait for formatting triage decisions
pub trait OutputFormatter {
    /// Format the complete decision
    fn format(&self, decision: &Decision) -> String;

    /// Format as JSON
    fn format_json(&self, decision: &Decision) -> String;

    /// Format the decision and next steps only (concise output)
    fn format_summary(&self, decision: &Decision) -> String;
}
