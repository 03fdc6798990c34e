//! Answer subdomain: what comes back from the research API.
//!
//! - [`response::RawResponse`] - the single read of an HTTP response
//! - [`outcome::AnswerOutcome`] - tagged classification of that response
//! - [`result::AnswerResult`] - answer text plus search metadata
//! - [`duration::format_duration`] - human-readable retry intervals

pub mod duration;
pub mod outcome;
pub mod response;
pub mod result;
