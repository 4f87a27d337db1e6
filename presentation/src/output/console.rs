//! Console output formatter for triage decisions

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use triage_domain::{Decision, FinalDecision};

/// Formats triage decisions for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete decision
    pub fn format(decision: &Decision) -> String {
        let mut output = String::new();

        // Header
        output.push_str(&Self::header("Triage Council Decision"));
        output.push('\n');

        // Decision and confidence
        output.push_str(&format!(
            "{} {}\n",
            "Decision:".cyan().bold(),
            Self::colored_category(decision.final_decision)
        ));
        output.push_str(&format!(
            "{} {}\n\n",
            "Confidence:".cyan().bold(),
            decision.confidence_level
        ));

        // Reasoning
        output.push_str(&format!("{}\n", decision.reasoning_summary));

        // Safety notes
        if !decision.safety_notes.is_empty() {
            output.push_str(&Self::section_header("Safety Notes"));
            for note in &decision.safety_notes {
                output.push_str(&format!("  ! {}\n", note.yellow()));
            }
        }

        // Next steps
        output.push_str(&Self::section_header("Next Steps"));
        for (i, step) in decision.next_steps.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, step));
        }

        // Referrals
        if !decision.recommended_doctors.is_empty() {
            output.push_str(&Self::section_header("Recommended Specialists"));
            for doctor in &decision.recommended_doctors {
                output.push_str(&format!(
                    "\n  {} ({})\n    {} | {} | {}\n",
                    doctor.name.bold(),
                    doctor.specialty.green(),
                    doctor.hospital,
                    doctor.contact,
                    doctor.availability
                ));
            }
        }

        // Panel metrics
        output.push_str(&Self::section_header("Panel Metrics"));
        output.push_str(
            &format!(
                "  max risk {}%, avg risk {:.0}%, min confidence {}%, disagreement {}%, red flags {}\n",
                decision.metrics.max_risk,
                decision.metrics.avg_risk,
                decision.metrics.min_confidence,
                decision.metrics.disagreement_score,
                decision.metrics.red_flag_union.len()
            )
            .dimmed()
            .to_string(),
        );

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(decision: &Decision) -> String {
        serde_json::to_string_pretty(decision).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the decision and next steps only (concise output)
    pub fn format_summary(decision: &Decision) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} {} ({} confidence)\n\n",
            "Decision:".bold(),
            Self::colored_category(decision.final_decision),
            decision.confidence_level
        ));

        output.push_str(&format!("{}\n", decision.reasoning_summary));

        for step in &decision.next_steps {
            output.push_str(&format!("  - {}\n", step));
        }

        if !decision.recommended_doctors.is_empty() {
            let names: Vec<String> = decision
                .recommended_doctors
                .iter()
                .map(|d| format!("{} ({})", d.name, d.specialty))
                .collect();
            output.push_str(&format!(
                "\n{} {}\n",
                "Referrals:".dimmed(),
                names.join(", ")
            ));
        }

        output
    }

    fn colored_category(category: FinalDecision) -> String {
        match category {
            FinalDecision::SelfCare => category.as_str().green().bold().to_string(),
            FinalDecision::Consult => category.as_str().yellow().bold().to_string(),
            FinalDecision::Urgent => category.as_str().red().bold().to_string(),
            FinalDecision::Refused => category.as_str().red().bold().to_string(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, decision: &Decision) -> String {
        Self::format(decision)
    }

    fn format_json(&self, decision: &Decision) -> String {
        Self::format_json(decision)
    }

    fn format_summary(&self, decision: &Decision) -> String {
        Self::format_summary(decision)
    }
}
