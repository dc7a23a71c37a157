use std::{sync::Arc, time::Duration};

use shared::{
    catalog::{step_count, OTHER_OPTION},
    domain::{FieldKey, LeadId, StepDefinition, StepKind},
};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    composer::compose,
    form::{Answers, FormState},
    navigator::{self, Navigation},
    processing::{ProcessingSequence, ProcessingSnapshot},
    schedule::{Clock, TokioClock},
    submission::LeadSubmitter,
    validator::{validate, ValidationError},
};

/// Pause between picking an option and the automatic advance, slept on the
/// session clock by [`OnboardingSession::choose_option`].
pub const AUTO_ADVANCE_DELAY: Duration = Duration::from_millis(400);

pub const INTRO_PROGRESS_LABEL: &str = "Začínáme";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Editing,
    Submitting,
    Complete { lead_id: LeadId, email: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("submission starts from the email step")]
    NotOnEmailStep,
    #[error("lead already submitted")]
    AlreadySubmitted,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("{0}")]
    Failed(String),
}

/// One visitor's pass through the onboarding flow.
pub struct OnboardingSession {
    form: FormState,
    phase: SessionPhase,
    error: Option<String>,
    sequence: ProcessingSequence,
    clock: Arc<dyn Clock>,
    processing: watch::Sender<ProcessingSnapshot>,
}

impl Default for OnboardingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl OnboardingSession {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(TokioClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let sequence = ProcessingSequence::default();
        let (processing, _) = watch::channel(sequence.initial());
        Self {
            form: FormState::new(),
            phase: SessionPhase::Editing,
            error: None,
            sequence,
            clock,
            processing,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn answers(&self) -> &Answers {
        self.form.answers()
    }

    pub fn step(&self) -> &'static StepDefinition {
        self.form.step()
    }

    pub fn current_step(&self) -> usize {
        self.form.current_step()
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase, SessionPhase::Complete { .. })
    }

    /// Inline message for the visible step, if the last action failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn progress_percent(&self) -> f32 {
        let last = step_count().saturating_sub(1).max(1);
        self.form.current_step() as f32 / last as f32 * 100.0
    }

    pub fn progress_label(&self) -> String {
        match self.form.current_step() {
            0 => INTRO_PROGRESS_LABEL.to_string(),
            current => format!("Krok {current} z {}", step_count() - 1),
        }
    }

    /// Snapshots of the processing animation played during [`Self::submit`].
    pub fn processing_updates(&self) -> watch::Receiver<ProcessingSnapshot> {
        self.processing.subscribe()
    }

    /// Records a choice on a single-choice step and advances at once.
    /// Choosing the "other" option is blocked until its companion text is
    /// filled in.
    pub fn select_option(&mut self, value: &str) -> Navigation {
        if !self.is_editing() {
            return Navigation::Unchanged;
        }
        let step = self.form.step();
        let Some(key) = step.key.filter(|_| step.kind == StepKind::SingleChoice) else {
            return Navigation::Unchanged;
        };

        self.form.set_answer(key, value);
        self.error = None;

        if value == OTHER_OPTION {
            let companion = step
                .other_companion
                .map(|companion| self.form.answers().text(companion))
                .unwrap_or("");
            if companion.trim().is_empty() {
                let err = ValidationError::MissingOtherText;
                self.error = Some(err.to_string());
                return Navigation::Blocked(err);
            }
        }
        self.advance()
    }

    /// [`Self::select_option`] after [`AUTO_ADVANCE_DELAY`], so the choice
    /// stays visible for a moment before the step changes.
    pub async fn choose_option(&mut self, value: &str) -> Navigation {
        self.clock.sleep(AUTO_ADVANCE_DELAY).await;
        self.select_option(value)
    }

    /// Text input for the visible free-text or email step.
    pub fn set_text(&mut self, value: &str) {
        if !self.is_editing() {
            return;
        }
        let step = self.form.step();
        if let (Some(key), StepKind::FreeText | StepKind::Email) = (step.key, step.kind) {
            self.form.set_answer(key, value);
            self.error = None;
        }
    }

    /// Companion text for the visible step's "other" option.
    pub fn set_other_text(&mut self, value: &str) {
        if !self.is_editing() {
            return;
        }
        if let Some(key) = self.form.step().other_companion {
            self.form.set_answer(key, value);
            self.error = None;
        }
    }

    pub fn set_name(&mut self, value: &str) {
        if self.is_editing() {
            self.form.set_answer(FieldKey::Name, value);
        }
    }

    pub fn advance(&mut self) -> Navigation {
        if !self.is_editing() {
            return Navigation::Unchanged;
        }
        let outcome = navigator::advance(&mut self.form);
        match &outcome {
            Navigation::Blocked(err) => {
                debug!(step = self.form.current_step(), error = %err, "advance blocked");
                self.error = Some(err.to_string());
            }
            Navigation::Moved { from, to } => {
                debug!(from, to, "advanced");
                self.error = None;
            }
            Navigation::AtBoundary | Navigation::Unchanged => {}
        }
        outcome
    }

    pub fn retreat(&mut self) -> Navigation {
        if !self.is_editing() {
            return Navigation::Unchanged;
        }
        let outcome = navigator::retreat(&mut self.form);
        if outcome.moved() {
            self.error = None;
        }
        outcome
    }

    /// Sends the composed lead and plays the processing animation alongside
    /// it, returning once both are done. Answers survive a failure so the
    /// visitor can retry from the email step.
    pub async fn submit(&mut self, submitter: &dyn LeadSubmitter) -> Result<LeadId, SessionError> {
        if self.is_complete() {
            return Err(SessionError::AlreadySubmitted);
        }
        if !self.form.is_last_step() {
            return Err(SessionError::NotOnEmailStep);
        }
        if let Err(err) = validate(self.form.step(), self.form.answers()) {
            self.error = Some(err.to_string());
            return Err(err.into());
        }

        let payload = compose(self.form.answers());
        self.phase = SessionPhase::Submitting;
        self.error = None;
        info!(email = %payload.email, "submitting lead");

        let (outcome, ()) = tokio::join!(
            submitter.submit(&payload),
            self.sequence.run(self.clock.as_ref(), &self.processing),
        );

        match outcome {
            Ok(lead_id) => {
                info!(lead_id = %lead_id, "onboarding complete");
                self.phase = SessionPhase::Complete {
                    lead_id: lead_id.clone(),
                    email: payload.email,
                };
                Ok(lead_id)
            }
            Err(err) => {
                let message = err.user_message();
                warn!(error = %err, "lead submission failed");
                self.phase = SessionPhase::Editing;
                self.error = Some(message.clone());
                Err(SessionError::Failed(message))
            }
        }
    }

    fn is_editing(&self) -> bool {
        self.phase == SessionPhase::Editing
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
