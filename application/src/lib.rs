//! Application layer for openanswer
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ClientConfig;
pub use ports::{
    answer_gateway::{AnswerGateway, GatewayError},
    preference_store::{ContextId, PreferenceStore, StorageChange, StorageSubscription, StoreError},
    theme_surface::{NoThemeSurface, ThemeSurface},
    ui_event::{ThemeChangeSource, UiEvent},
};
pub use use_cases::ask_state::AskState;
pub use use_cases::submit_question::{SubmitError, SubmitQuestionUseCase};
pub use use_cases::theme_manager::{ThemeError, ThemeManager};
