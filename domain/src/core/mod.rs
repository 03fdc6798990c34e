//! Core domain concepts shared across all subdomains.
//!
//! - [`question::Question`]: a validated question to submit to the answer API
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod question;
