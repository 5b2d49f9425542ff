use colored::*;

use crate::agent::RunOutcome;

/// Console handles terminal output with colored formatting
pub struct Console {
    question_color: Color,
    answer_color: Color,
}

impl Console {
    /// Create a new Console with default colors
    pub fn new() -> Self {
        Self {
            question_color: Color::Cyan,
            answer_color: Color::Green,
        }
    }

    /// Print the question being asked
    pub fn print_question(&self, question: &str) {
        println!(
            "{} {}",
            "Question:".color(self.question_color).bold(),
            question
        );
    }

    /// Print the result of a run
    pub fn print_outcome(&self, outcome: &RunOutcome) {
        match outcome {
            RunOutcome::Answered(r) => println!(
                "{} {}",
                "Answer:".color(self.answer_color).bold(),
                r.response.color(self.answer_color)
            ),
            RunOutcome::Exhausted { iterations, .. } => self.print_system(&format!(
                "No final answer after {} iterations.",
                iterations
            )),
        }
    }

    /// Print a full transcript between separators
    pub fn print_transcript(&self, full_text: &str) {
        self.print_separator();
        println!("{}", full_text.bright_black());
        self.print_separator();
    }

    /// Print a system message (errors, info, etc.)
    pub fn print_system(&self, message: &str) {
        println!("{} {}", "System:".yellow().bold(), message);
    }

    /// Print an error message
    pub fn print_error(&self, error: &str) {
        eprintln!("{} {}", "Error:".red().bold(), error);
    }

    /// Print a separator line
    pub fn print_separator(&self) {
        println!("{}", "-".repeat(60).bright_black());
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}
