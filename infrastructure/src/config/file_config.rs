//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use openanswer_application::ClientConfig;
use openanswer_domain::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("invalid API endpoint '{0}': must be an http(s) URL")]
    InvalidEndpoint(String),

    #[error("poll_interval_ms cannot be 0")]
    InvalidPollInterval,
}

/// Raw API configuration from TOML
///
/// `endpoint` wins when set; otherwise the URL is derived as
/// `{scheme}://{host}:{port}/api/answer`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    /// Full endpoint URL
    pub endpoint: Option<String>,
    /// Scheme for the derived endpoint
    pub scheme: String,
    /// Host for the derived endpoint
    pub host: String,
    /// Port for the derived endpoint
    pub port: u16,
    /// Timeout in seconds for the request (none by default)
    pub timeout_seconds: Option<u64>,
}

impl Default for FileApiConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            scheme: "http".to_string(),
            host: "localhost".to_string(),
            port: 8000,
            timeout_seconds: None,
        }
    }
}

impl FileApiConfig {
    /// The endpoint questions are posted to
    pub fn resolved_endpoint(&self) -> String {
        match &self.endpoint {
            Some(endpoint) if !endpoint.trim().is_empty() => endpoint.trim().to_string(),
            _ => format!("{}://{}:{}/api/answer", self.scheme, self.host, self.port),
        }
    }
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format for one-shot answers (uses domain type)
    pub format: Option<OutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
    /// Show the loading spinner
    pub show_progress: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            show_progress: true,
        }
    }
}

/// Raw answer rendering configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRenderConfig {
    /// Render footnote references as `[id]` with `↩` back-references
    pub footnotes: bool,
    /// Syntax-highlight fenced code blocks that declare a language
    pub highlight: bool,
}

impl Default for FileRenderConfig {
    fn default() -> Self {
        Self {
            footnotes: true,
            highlight: true,
        }
    }
}

/// Raw preference storage configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Preference file; defaults to the platform data directory
    pub preferences_file: Option<String>,
    /// How often to check for changes made by other running clients
    pub poll_interval_ms: u64,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            preferences_file: None,
            poll_interval_ms: 500,
        }
    }
}

impl FileStorageConfig {
    /// Location of the preference file
    pub fn resolved_path(&self) -> Option<PathBuf> {
        match &self.preferences_file {
            Some(path) => Some(PathBuf::from(path)),
            None => dirs::data_dir().map(|d| d.join("openanswer").join("preferences.json")),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Complete configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Answer API settings
    pub api: FileApiConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Answer rendering settings
    pub render: FileRenderConfig,
    /// Preference storage settings
    pub storage: FileStorageConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if let Some(0) = self.api.timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        let endpoint = self.api.resolved_endpoint();
        match reqwest::Url::parse(&endpoint) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
            _ => return Err(ConfigValidationError::InvalidEndpoint(endpoint)),
        }

        if self.storage.poll_interval_ms == 0 {
            return Err(ConfigValidationError::InvalidPollInterval);
        }

        Ok(())
    }

    /// Settings for the answer gateway
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(self.api.resolved_endpoint());
        if let Some(secs) = self.api.timeout_seconds {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[api]
endpoint = "https://answers.example.com/api/answer"
timeout_seconds = 120

[output]
format = "answer"
color = false
show_progress = false

[render]
footnotes = false
highlight = false

[storage]
preferences_file = "/tmp/openanswer/prefs.json"
poll_interval_ms = 250
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.api.resolved_endpoint(),
            "https://answers.example.com/api/answer"
        );
        assert_eq!(config.api.timeout_seconds, Some(120));
        assert_eq!(config.output.format, Some(OutputFormat::Answer));
        assert!(!config.output.color);
        assert!(!config.output.show_progress);
        assert!(!config.render.footnotes);
        assert!(!config.render.highlight);
        assert_eq!(
            config.storage.resolved_path(),
            Some(PathBuf::from("/tmp/openanswer/prefs.json"))
        );
        assert_eq!(config.storage.poll_interval(), Duration::from_millis(250));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[api]
host = "assistant.local"
port = 8118
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.api.resolved_endpoint(),
            "http://assistant.local:8118/api/answer"
        );
        // Defaults should apply
        assert!(config.output.color);
        assert!(config.render.footnotes);
        assert!(config.render.highlight);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(
            config.api.resolved_endpoint(),
            "http://localhost:8000/api/answer"
        );
        assert!(config.api.timeout_seconds.is_none());
        assert!(config.output.format.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = FileConfig::default();
        config.api.timeout_seconds = Some(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidTimeout)
        ));
    }

    #[test]
    fn test_validate_endpoint() {
        let mut config = FileConfig::default();
        config.api.endpoint = Some("ftp://example.com/api/answer".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidEndpoint(_))
        ));

        config.api.endpoint = Some("not a url".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_poll_interval() {
        let mut config = FileConfig::default();
        config.storage.poll_interval_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidPollInterval)
        ));
    }

    #[test]
    fn test_client_config() {
        let mut config = FileConfig::default();
        config.api.timeout_seconds = Some(30);
        let client = config.client_config();
        assert_eq!(client.endpoint, "http://localhost:8000/api/answer");
        assert_eq!(client.timeout, Some(Duration::from_secs(30)));
    }
}
