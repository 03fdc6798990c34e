//! Infrastructure layer for openanswer
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod http;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileApiConfig, FileConfig, FileOutputConfig,
    FileRenderConfig, FileStorageConfig,
};
pub use http::HttpAnswerGateway;
pub use storage::{FilePreferenceStore, InMemoryPreferenceStore};
