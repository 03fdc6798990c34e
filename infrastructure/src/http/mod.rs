//! HTTP adapter for the answer API
//!
//! | Type | Port | Key Dependency |
//! |------|------|----------------|
//! | [`HttpAnswerGateway`] | [`AnswerGateway`](openanswer_application::AnswerGateway) | `reqwest` |

mod gateway;

pub use gateway::{AnswerRequest, HttpAnswerGateway};
