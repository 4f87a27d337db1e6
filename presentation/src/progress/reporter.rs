//! Progress reporting for deliberation runs

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use triage_application::DeliberationProgress;
use triage_domain::{Role, Round};

/// Reports deliberation progress with fancy progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    round_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            round_bar: Mutex::new(None),
        }
    }

    fn round_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }

    fn round_short_name(round: &Round) -> &'static str {
        match round {
            Round::Analysis => "Round 1",
            Round::Review => "Round 2",
            Round::Synthesis => "Round 3",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DeliberationProgress for ProgressReporter {
    fn on_round_start(&self, round: &Round, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::round_style());
        pb.set_prefix(round.display_name().to_string());
        pb.set_message("Starting...");

        *self.round_bar.lock().unwrap() = Some(pb);
    }

    fn on_task_complete(&self, _round: &Round, role: Role, success: bool) {
        if let Some(pb) = self.round_bar.lock().unwrap().as_ref() {
            let status = if success {
                format!("{} {}", "v".green(), role.display_name())
            } else {
                format!("{} {}", "x".red(), role.display_name())
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_round_complete(&self, round: &Round) {
        if let Some(pb) = self.round_bar.lock().unwrap().take() {
            let name = Self::round_short_name(round);
            pb.finish_with_message(format!("{} complete!", name.green()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl DeliberationProgress for SimpleProgress {
    fn on_round_start(&self, round: &Round, total_tasks: usize) {
        println!(
            "{} {} ({} tasks)",
            "->".cyan(),
            round.display_name().bold(),
            total_tasks
        );
    }

    fn on_task_complete(&self, _round: &Round, role: Role, success: bool) {
        if success {
            println!("  {} {}", "v".green(), role.display_name());
        } else {
            println!("  {} {} (failed)", "x".red(), role.display_name());
        }
    }

    fn on_round_complete(&self, _round: &Round) {
        println!();
    }
}
