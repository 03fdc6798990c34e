//! Submit Question use case: the request controller.
//!
//! Owns the submission lifecycle for one page:
//!
//! ```text
//! submit("...")
//!   ├─ reject empty input / reject while another submission is in flight
//!   ├─ AskState::begin()            (loading = true, previous results cleared)
//!   ├─ AnswerGateway::fetch_answer  (exactly one request)
//!   ├─ AnswerOutcome::classify      (body parsed once)
//!   └─ AskState::finish()           (loading = false, answer XOR error)
//! ```
//!
//! The loading flag is released by a drop guard, so a cancelled or panicking
//! submission cannot leave the page stuck in the loading state.

use crate::ports::answer_gateway::AnswerGateway;
use crate::ports::ui_event::UiEvent;
use crate::use_cases::ask_state::AskState;
use openanswer_domain::{AnswerOutcome, Question};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Reasons a submission is refused before any request is made
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Please fill out this field.")]
    EmptyQuestion,

    #[error("A question is already being answered")]
    Busy,
}

/// Request controller for question submissions.
///
/// Cheap to clone; clones share the same state and in-flight flag.
#[derive(Clone)]
pub struct SubmitQuestionUseCase {
    gateway: Arc<dyn AnswerGateway>,
    state: Arc<Mutex<AskState>>,
    in_flight: Arc<AtomicBool>,
    tx: Option<mpsc::UnboundedSender<UiEvent>>,
}

impl SubmitQuestionUseCase {
    pub fn new(gateway: Arc<dyn AnswerGateway>) -> Self {
        Self {
            gateway,
            state: Arc::new(Mutex::new(AskState::new())),
            in_flight: Arc::new(AtomicBool::new(false)),
            tx: None,
        }
    }

    /// Emit [`UiEvent`]s for every state transition.
    pub fn with_ui_events(mut self, tx: mpsc::UnboundedSender<UiEvent>) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Whether a submission is in flight
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Copy of the current display state
    pub fn snapshot(&self) -> AskState {
        lock(&self.state).clone()
    }

    /// Submit a question and wait for its outcome.
    ///
    /// Every error the API or transport can produce is folded into the
    /// returned [`AnswerOutcome`]; `Err` only means nothing was sent.
    pub async fn submit(&self, input: &str) -> Result<AnswerOutcome, SubmitError> {
        let question = Question::try_new(input).ok_or(SubmitError::EmptyQuestion)?;

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Submission rejected: another request is in flight");
            return Err(SubmitError::Busy);
        }
        let guard = LoadingGuard {
            in_flight: &self.in_flight,
            state: &self.state,
        };

        lock(&self.state).begin();
        self.emit(UiEvent::SubmissionStarted {
            question: question.content().to_string(),
        });

        info!("Submitting question to {}", self.gateway.endpoint());
        let outcome = match self.gateway.fetch_answer(&question).await {
            Ok(response) => {
                debug!(status = response.status, bytes = response.body.len(), "Response received");
                AnswerOutcome::classify(&response)
            }
            Err(e) => {
                warn!("Request failed: {}", e);
                AnswerOutcome::transport_failure(e.to_string())
            }
        };
        info!(outcome = outcome.kind(), "Submission finished");

        lock(&self.state).finish(&outcome);
        drop(guard);

        self.emit(UiEvent::SubmissionCompleted(outcome.clone()));
        Ok(outcome)
    }

    fn emit(&self, event: UiEvent) {
        if let Some(tx) = &self.tx {
            // Receiver gone means the UI has shut down
            let _ = tx.send(event);
        }
    }
}

fn lock(state: &Mutex<AskState>) -> MutexGuard<'_, AskState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Clears the loading flag however the submission ends.
struct LoadingGuard<'a> {
    in_flight: &'a AtomicBool,
    state: &'a Mutex<AskState>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        lock(self.state).loading = false;
        self.in_flight.store(false, Ordering::Release);
    }
}
