//! Output formatter trait

use openanswer_domain::AnswerOutcome;

/// Trait for formatting answer outcomes
pub trait OutputFormatter {
    /// Error banner, search metadata and the rendered answer
    fn format(&self, outcome: &AnswerOutcome) -> String;

    /// Format as JSON
    fn format_json(&self, outcome: &AnswerOutcome) -> String;

    /// Rendered answer only (or the error banner)
    fn format_answer_only(&self, outcome: &AnswerOutcome) -> String;
}
