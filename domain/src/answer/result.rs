//! Answer result value object

use serde::{Deserialize, Serialize};

/// A successful answer with the metadata the backend used to produce it.
///
/// Produced atomically: the three fields are always replaced together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResult {
    /// Markdown answer text
    pub answer: String,
    /// Queries the backend ran while researching
    #[serde(default)]
    pub search_terms: Vec<String>,
    /// Source links the backend consulted
    #[serde(default)]
    pub relevant_urls: Vec<String>,
}

impl AnswerResult {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            search_terms: Vec::new(),
            relevant_urls: Vec::new(),
        }
    }

    pub fn with_search_terms(mut self, terms: Vec<String>) -> Self {
        self.search_terms = terms;
        self
    }

    pub fn with_relevant_urls(mut self, urls: Vec<String>) -> Self {
        self.relevant_urls = urls;
        self
    }

    /// Whether there is any search metadata to show
    pub fn has_metadata(&self) -> bool {
        !self.search_terms.is_empty() || !self.relevant_urls.is_empty()
    }
}
