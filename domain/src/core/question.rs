//! Question value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A question to be answered by the research API (Value Object)
///
/// Empty input never becomes a `Question`, which mirrors the required-field
/// validation of the input form: nothing is sent for it. Whitespace is
/// content like any other character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    content: String,
}

impl Question {
    /// Try to create a new question, returning None if empty
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.is_empty() {
            None
        } else {
            Some(Self { content })
        }
    }

    /// Get the question content exactly as entered
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<&str> for Question {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Question::try_new(s)
            .ok_or_else(|| DomainError::InvalidQuestion("question cannot be empty".to_string()))
    }
}

impl TryFrom<String> for Question {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Question::try_from(s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_creation() {
        let q = Question::try_new("What is Rust?").unwrap();
        assert_eq!(q.content(), "What is Rust?");
    }

    #[test]
    fn test_content_is_not_trimmed() {
        let q = Question::try_new("  spaced  ").unwrap();
        assert_eq!(q.content(), "  spaced  ");
    }

    #[test]
    fn test_try_new_empty() {
        assert!(Question::try_new("").is_none());
        assert!(Question::try_new(String::new()).is_none());
    }

    #[test]
    fn test_whitespace_is_a_question() {
        assert_eq!(Question::try_new(" ").unwrap().content(), " ");
        assert_eq!(Question::try_new("\n\t").unwrap().content(), "\n\t");
    }

    #[test]
    fn test_try_from_reports_domain_error() {
        let err = Question::try_from("").unwrap_err();
        assert!(matches!(err, DomainError::InvalidQuestion(_)));
        assert!(Question::try_from("why?".to_string()).is_ok());
    }
}
