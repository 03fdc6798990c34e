//! UI event types emitted by the use cases for presentation layer rendering
//!
//! These events form the output port from the application layer to the
//! presentation layer, which applies them to whatever state it renders.

use openanswer_domain::{AnswerOutcome, Theme};

/// Where a theme change came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChangeSource {
    /// Explicit toggle in this context
    Toggle,
    /// Another context wrote the preference
    OtherContext,
}

/// Events emitted by the use cases for the presentation layer to render
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// A question was accepted; previous results are cleared and loading begins
    SubmissionStarted { question: String },
    /// The submission resolved; loading is over
    SubmissionCompleted(AnswerOutcome),
    /// The active theme changed
    ThemeChanged {
        theme: Theme,
        source: ThemeChangeSource,
    },
}
