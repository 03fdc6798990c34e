//! CLI command definitions

use clap::{Parser, ValueEnum};
use openanswer_domain::OutputFormat as DomainOutputFormat;
use std::path::PathBuf;

/// Output format for one-shot answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Error banner, search terms, URLs and the rendered answer
    Full,
    /// Only the rendered answer
    Answer,
    /// The classified outcome as JSON
    Json,
}

impl From<OutputFormat> for DomainOutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => DomainOutputFormat::Full,
            OutputFormat::Answer => DomainOutputFormat::Answer,
            OutputFormat::Json => DomainOutputFormat::Json,
        }
    }
}

/// CLI arguments for openanswer
#[derive(Parser, Debug)]
#[command(name = "openanswer")]
#[command(author, version, about = "Research assistant client for the OpenAnswer API")]
#[command(long_about = r#"
OpenAnswer sends a question to an answer API and shows the Markdown answer
together with the search terms and URLs it was built from.

Without a question an interactive terminal page opens. The light/dark theme
is shared by every running client through a preference file.

Configuration files are loaded from (in priority order):
1. --config <path>        Explicit config file
2. ./openanswer.toml      Project-level config
3. ~/.config/openanswer/config.toml   Global config

Example:
  openanswer "What is the borrow checker?"
  openanswer -o json "Latest stable Rust release"
  openanswer --endpoint http://localhost:8118/api/answer
  openanswer --toggle-theme
"#)]
pub struct Cli {
    /// The question to ask (opens the interactive page when omitted)
    pub question: Option<String>,

    /// Answer API endpoint, overriding configuration
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Output format (defaults to the configured format, then full)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Render footnotes in the plain `[^id]` form
    #[arg(long)]
    pub no_footnotes: bool,

    /// Disable syntax highlighting of code blocks
    #[arg(long)]
    pub no_highlight: bool,

    /// Flip the saved light/dark theme and exit
    #[arg(long)]
    pub toggle_theme: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_one_shot_arguments() {
        let cli = Cli::try_parse_from([
            "openanswer",
            "-o",
            "json",
            "--no-footnotes",
            "-vv",
            "What is Rust?",
        ])
        .unwrap();
        assert_eq!(cli.question.as_deref(), Some("What is Rust?"));
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert!(cli.no_footnotes);
        assert!(!cli.no_highlight);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_no_question_means_interactive() {
        let cli = Cli::try_parse_from(["openanswer"]).unwrap();
        assert!(cli.question.is_none());
        assert!(cli.output.is_none());
        assert!(!cli.toggle_theme);
    }

    #[test]
    fn test_output_format_maps_to_domain() {
        assert_eq!(
            DomainOutputFormat::from(OutputFormat::Answer),
            DomainOutputFormat::Answer
        );
    }
}
