//! TUI Presenter - applies application events to TUI state
//!
//! ```text
//! Application Layer (UiEvent)
//!         ↓
//!   TuiPresenter (this module)
//!         ↓
//!   TuiState (view state)
//!         ↓
//!   Widgets
//! ```

use super::state::TuiState;
use crate::render::Palette;
use openanswer_application::{ThemeChangeSource, UiEvent};
use tracing::debug;

pub struct TuiPresenter;

impl TuiPresenter {
    pub fn new() -> Self {
        Self
    }

    pub fn apply(&self, state: &mut TuiState, event: &UiEvent) {
        match event {
            UiEvent::SubmissionStarted { question } => {
                state.ask.begin();
                state.question = Some(question.clone());
                state.rendered = None;
                state.scroll = 0;
            }
            UiEvent::SubmissionCompleted(outcome) => {
                debug!("Submission finished: {}", outcome.kind());
                state.ask.finish(outcome);
                state.rerender();
                state.scroll = 0;
            }
            UiEvent::ThemeChanged { theme, source } => {
                state.set_theme(*theme, Palette::for_theme(*theme));
                if *source == ThemeChangeSource::OtherContext {
                    state.set_flash(format!("Theme changed to {} in another window", theme));
                }
            }
        }
    }
}

impl Default for TuiPresenter {
    fn default() -> Self {
        Self::new()
    }
}
