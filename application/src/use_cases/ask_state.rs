//! Shared display state for the question/answer page.

use openanswer_domain::{AnswerOutcome, AnswerResult, ErrorState};

/// What the page currently shows.
///
/// `answer` and `error` are never both set: a submission produces exactly one
/// of them, and starting a new submission clears both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AskState {
    pub loading: bool,
    pub answer: Option<AnswerResult>,
    pub error: Option<ErrorState>,
}

impl AskState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the loading state, dropping everything from the previous submission.
    pub fn begin(&mut self) {
        self.loading = true;
        self.answer = None;
        self.error = None;
    }

    /// Leave the loading state with the classified outcome.
    pub fn finish(&mut self, outcome: &AnswerOutcome) {
        self.loading = false;
        match outcome.clone().into_display() {
            Ok(result) => {
                self.answer = Some(result);
                self.error = None;
            }
            Err(error) => {
                self.answer = None;
                self.error = Some(error);
            }
        }
    }

    pub fn search_terms(&self) -> &[String] {
        self.answer
            .as_ref()
            .map(|a| a.search_terms.as_slice())
            .unwrap_or_default()
    }

    pub fn relevant_urls(&self) -> &[String] {
        self.answer
            .as_ref()
            .map(|a| a.relevant_urls.as_slice())
            .unwrap_or_default()
    }
}
