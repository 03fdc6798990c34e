//! Domain layer for openanswer
//!
//! This crate contains the value objects and pure rules of the research
//! assistant client. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Answer outcome
//!
//! Every submission resolves into exactly one [`AnswerOutcome`], decoded once
//! from the raw HTTP response:
//!
//! - **Success**: the API returned an answer with its metadata
//! - **RateLimited**: HTTP 429 with a retry interval and limit category
//! - **ApiError** / **ApiReportedFailure** / **MalformedResponse**: server-side failures
//! - **TransportFailure**: the request itself could not be completed
//!
//! ## Theme
//!
//! The light/dark display preference, persisted under [`THEME_KEY`].

pub mod answer;
pub mod config;
pub mod core;
pub mod theme;

// Re-export commonly used types
pub use answer::{
    duration::format_duration,
    outcome::{AnswerOutcome, ErrorState},
    response::RawResponse,
    result::AnswerResult,
};
pub use config::OutputFormat;
pub use core::{error::DomainError, question::Question};
pub use theme::{THEME_KEY, Theme};
