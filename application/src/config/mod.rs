//! Application-level configuration.
//!
//! - [`ClientConfig`]: where questions are sent and how long to wait

pub mod client_config;

pub use client_config::{ClientConfig, DEFAULT_ENDPOINT};
