//! Progress reporting for one-shot submissions

use indicatif::{ProgressBar, ProgressStyle};
use openanswer_application::UiEvent;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;

/// Label shown while a request is in flight
pub const LOADING_LABEL: &str = "Loading...";

/// Shows a spinner while a submission is in flight
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
    hidden: bool,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
            hidden: false,
        }
    }

    /// Reporter that tracks events but draws nothing
    pub fn hidden() -> Self {
        Self {
            spinner: Mutex::new(None),
            hidden: true,
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    pub fn is_active(&self) -> bool {
        self.spinner
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .is_some()
    }

    pub fn on_event(&self, event: &UiEvent) {
        let mut spinner = self.spinner.lock().unwrap_or_else(|p| p.into_inner());
        match event {
            UiEvent::SubmissionStarted { .. } => {
                let pb = if self.hidden {
                    ProgressBar::hidden()
                } else {
                    ProgressBar::new_spinner()
                };
                pb.set_style(Self::spinner_style());
                pb.set_message(LOADING_LABEL);
                pb.enable_steady_tick(Duration::from_millis(100));
                if let Some(previous) = spinner.replace(pb) {
                    previous.finish_and_clear();
                }
            }
            UiEvent::SubmissionCompleted(_) => {
                if let Some(pb) = spinner.take() {
                    pb.finish_and_clear();
                }
            }
            UiEvent::ThemeChanged { .. } => {}
        }
    }

    /// Drive the reporter from a UI event channel until it closes.
    pub async fn run(&self, mut rx: mpsc::UnboundedReceiver<UiEvent>) {
        while let Some(event) = rx.recv().await {
            self.on_event(&event);
        }
        if let Some(pb) = self
            .spinner
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .take()
        {
            pb.finish_and_clear();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openanswer_domain::AnswerOutcome;

    #[test]
    fn test_spinner_follows_submission() {
        let reporter = ProgressReporter::hidden();
        assert!(!reporter.is_active());

        reporter.on_event(&UiEvent::SubmissionStarted {
            question: "q".to_string(),
        });
        assert!(reporter.is_active());

        reporter.on_event(&UiEvent::SubmissionCompleted(AnswerOutcome::MalformedResponse));
        assert!(!reporter.is_active());
    }

    #[tokio::test]
    async fn test_run_stops_when_channel_closes() {
        let reporter = ProgressReporter::hidden();
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(UiEvent::SubmissionStarted {
            question: "q".to_string(),
        })
        .unwrap();
        drop(tx);

        reporter.run(rx).await;
        assert!(!reporter.is_active());
    }
}
