//! Output format value object

use serde::{Deserialize, Serialize};

/// How a one-shot answer is printed
///
/// This is a domain concept shared by the config file and the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Error banner, search metadata and the rendered answer (default)
    #[default]
    Full,
    /// Only the rendered answer
    Answer,
    /// The classified outcome as JSON
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_full() {
        assert_eq!(OutputFormat::default(), OutputFormat::Full);
    }

    #[test]
    fn test_serialize_lowercase() {
        let json = serde_json::to_string(&OutputFormat::Answer).unwrap();
        assert_eq!(json, "\"answer\"");
    }

    #[test]
    fn test_deserialize_lowercase() {
        let format: OutputFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, OutputFormat::Json);
    }
}
