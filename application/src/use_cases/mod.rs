//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod ask_state;
pub mod submit_question;
pub mod theme_manager;
