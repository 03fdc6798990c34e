//! Configuration file loading for openanswer
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `OPENANSWER_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./openanswer.toml` or `./.openanswer.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/openanswer/config.toml`
//! 5. Default values
//!
//! The `--endpoint` CLI flag is applied on top by the binary.

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileApiConfig, FileConfig, FileOutputConfig, FileRenderConfig,
    FileStorageConfig,
};
pub use loader::ConfigLoader;
