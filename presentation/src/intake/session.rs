//! Interactive intake session
//!
//! Line-based loop that collects a case (symptoms, age, history), runs
//! one deliberation, prints the decision, and waits for the next case.

use crate::cli::commands::OutputFormat;
use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::ProgressReporter;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use triage_application::{OpinionGateway, RunDeliberationUseCase};
use triage_domain::CaseInput;

/// Interactive intake loop over a deliberation use case
pub struct IntakeSession<G: OpinionGateway + 'static> {
    use_case: RunDeliberationUseCase<G>,
    show_progress: bool,
    output: OutputFormat,
}

impl<G: OpinionGateway + 'static> IntakeSession<G> {
    pub fn new(use_case: RunDeliberationUseCase<G>) -> Self {
        Self {
            use_case,
            show_progress: true,
            output: OutputFormat::Full,
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Set the output format for printed decisions
    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    /// Run the interactive session
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        // Try to load history
        let history_path = dirs::data_dir().map(|p| p.join("triage-council").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline("Symptoms >>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    // Handle commands
                    if line.starts_with('/') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    // Collect the rest of the case
                    let age = match Self::prompt(&mut rl, "Age       >>> ") {
                        Some(age) => age,
                        None => break,
                    };
                    let history = match Self::prompt(&mut rl, "History   >>> ") {
                        Some(history) => history,
                        None => break,
                    };

                    let case = CaseInput::new(line, age, history);
                    self.process_case(case).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        // Save history
        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    /// Read one follow-up field. Returns `None` on EOF.
    fn prompt(rl: &mut DefaultEditor, label: &str) -> Option<String> {
        match rl.readline(label) {
            Ok(line) => Some(line.trim().to_string()),
            Err(ReadlineError::Interrupted) => Some(String::new()),
            Err(_) => None,
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│        Triage Council - Intake Mode         │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Describe the symptoms, then answer the follow-up prompts.");
        println!();
        println!("Commands:");
        println!("  /help     - Show this help");
        println!("  /quit     - Exit");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&self, cmd: &str) -> bool {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                true
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?    - Show this help");
                println!("  /quit, /exit, /q - Exit");
                println!();
                false
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }

    async fn process_case(&self, case: CaseInput) {
        println!();

        let result = if self.show_progress {
            let progress = ProgressReporter::new();
            self.use_case.execute_with_progress(case, &progress).await
        } else {
            self.use_case.execute(case).await
        };

        match result {
            Ok(decision) => {
                let output = match self.output {
                    OutputFormat::Full => ConsoleFormatter::format(&decision),
                    OutputFormat::Summary => ConsoleFormatter::format_summary(&decision),
                    OutputFormat::Json => ConsoleFormatter::format_json(&decision),
                };
                println!("{}", output);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
            }
        }
        println!();
    }
}
