//! Console output formatter for answer outcomes

use crate::config::OutputConfig;
use crate::output::formatter::OutputFormatter;
use crate::render::{AnswerRenderer, Palette, RenderOptions};
use colored::Colorize;
use openanswer_domain::{AnswerOutcome, AnswerResult, ErrorState, OutputFormat};
use serde_json::Value;

/// Formats answer outcomes for console display
pub struct ConsoleFormatter {
    renderer: AnswerRenderer,
    palette: Palette,
}

impl ConsoleFormatter {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            renderer: AnswerRenderer::new(options),
            palette: Palette::for_theme(options.theme),
        }
    }

    /// Formatter for the resolved output settings.
    ///
    /// Turns off colour for the whole process when `output.color` is false.
    pub fn from_config(output: &OutputConfig, options: RenderOptions) -> Self {
        if !output.color {
            colored::control::set_override(false);
        }
        Self::new(options)
    }

    /// Format according to the selected output format
    pub fn format_as(&self, format: OutputFormat, outcome: &AnswerOutcome) -> String {
        match format {
            OutputFormat::Full => self.format(outcome),
            OutputFormat::Answer => self.format_answer_only(outcome),
            OutputFormat::Json => self.format_json(outcome),
        }
    }

    /// Format the complete outcome
    pub fn format(&self, outcome: &AnswerOutcome) -> String {
        match outcome.clone().into_display() {
            Ok(result) => {
                let mut output = String::new();
                output.push_str(&Self::metadata(&result));
                output.push_str(&format!("{}\n", "Answer:".cyan().bold()));
                output.push_str(&self.render_answer(&result));
                output.push('\n');
                output
            }
            Err(error) => Self::error_banner(&error),
        }
    }

    /// Format as JSON
    ///
    /// Failures also carry `message`, the same text the error banner shows.
    pub fn format_json(&self, outcome: &AnswerOutcome) -> String {
        let mut value = match serde_json::to_value(outcome) {
            Ok(value) => value,
            Err(_) => return "{}".to_string(),
        };
        if let (Some(error), Some(fields)) = (outcome.error_state(), value.as_object_mut()) {
            fields.insert("message".to_string(), Value::String(error.message));
        }
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the answer only (concise output)
    pub fn format_answer_only(&self, outcome: &AnswerOutcome) -> String {
        match outcome.clone().into_display() {
            Ok(result) => format!("{}\n", self.render_answer(&result)),
            Err(error) => Self::error_banner(&error),
        }
    }

    fn render_answer(&self, result: &AnswerResult) -> String {
        self.renderer.render(&result.answer).to_ansi(&self.palette)
    }

    fn error_banner(error: &ErrorState) -> String {
        format!("{} {}\n", "Error:".red().bold(), error.message.red())
    }

    fn metadata(result: &AnswerResult) -> String {
        let mut output = String::new();

        if !result.search_terms.is_empty() {
            output.push_str(&format!("{}\n", "Search Terms:".cyan().bold()));
            for term in &result.search_terms {
                output.push_str(&format!("  * {}\n", term));
            }
            output.push('\n');
        }

        if !result.relevant_urls.is_empty() {
            output.push_str(&format!("{}\n", "Relevant URLs:".cyan().bold()));
            for url in &result.relevant_urls {
                output.push_str(&format!("  * {}\n", url.underline()));
            }
            output.push('\n');
        }

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, outcome: &AnswerOutcome) -> String {
        ConsoleFormatter::format(self, outcome)
    }

    fn format_json(&self, outcome: &AnswerOutcome) -> String {
        ConsoleFormatter::format_json(self, outcome)
    }

    fn format_answer_only(&self, outcome: &AnswerOutcome) -> String {
        ConsoleFormatter::format_answer_only(self, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatter() -> ConsoleFormatter {
        colored::control::set_override(false);
        ConsoleFormatter::new(RenderOptions::default())
    }

    fn success() -> AnswerOutcome {
        AnswerOutcome::Success(
            AnswerResult::new("Rust is **fast**.")
                .with_search_terms(vec!["rust speed".to_string()])
                .with_relevant_urls(vec!["https://www.rust-lang.org".to_string()]),
        )
    }

    #[test]
    fn test_full_output_order() {
        let output = formatter().format(&success());
        assert_eq!(
            output,
            "Search Terms:\n  * rust speed\n\nRelevant URLs:\n  * https://www.rust-lang.org\n\nAnswer:\nRust is fast.\n"
        );
    }

    #[test]
    fn test_full_output_without_metadata() {
        let outcome = AnswerOutcome::Success(AnswerResult::new("Just this."));
        assert_eq!(formatter().format(&outcome), "Answer:\nJust this.\n");
    }

    #[test]
    fn test_error_banner() {
        let outcome = AnswerOutcome::ApiError {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert_eq!(formatter().format(&outcome), "Error: Internal Server Error\n");
        assert_eq!(
            formatter().format_answer_only(&outcome),
            "Error: Internal Server Error\n"
        );
    }

    #[test]
    fn test_answer_only() {
        assert_eq!(formatter().format_answer_only(&success()), "Rust is fast.\n");
    }

    #[test]
    fn test_json_is_tagged_outcome() {
        let json = formatter().format_as(OutputFormat::Json, &success());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "success");
        assert_eq!(value["answer"], "Rust is **fast**.");
    }

    #[test]
    fn test_json_success_has_no_message() {
        let json = formatter().format_json(&success());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("message").is_none());
    }

    #[test]
    fn test_json_error_carries_banner_message() {
        let outcome = AnswerOutcome::RateLimited {
            limit_type: "daily".to_string(),
            retry_after_seconds: Some(61),
        };
        let json = formatter().format_json(&outcome);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "rate_limited");
        assert_eq!(value["retry_after_seconds"], 61);
        assert_eq!(
            value["message"],
            "Rate limit exceeded (daily limit). Please try again in 1m 1s."
        );
    }

    #[test]
    fn test_json_malformed_carries_message() {
        let json = formatter().format_json(&AnswerOutcome::MalformedResponse);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "malformed_response");
        assert_eq!(value["message"], "Unexpected response format. Please try again.");
    }
}
