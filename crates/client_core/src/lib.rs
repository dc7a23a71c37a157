//! Client side of the onboarding flow: form state, validation, navigation,
//! lead composition and submission, plus the timers that drive the
//! processing and activity displays.

pub mod activity;
pub mod composer;
pub mod form;
pub mod navigator;
pub mod processing;
pub mod schedule;
pub mod session;
pub mod submission;
pub mod validator;

pub use activity::{ActivityFrame, ActivityRotation, ActivityTicker};
pub use composer::compose;
pub use form::{AnswerValue, Answers, FormState};
pub use navigator::Navigation;
pub use processing::{ProcessingSequence, ProcessingSnapshot};
pub use schedule::{Clock, ScheduledTask, Scheduler, TokioClock};
pub use session::{OnboardingSession, SessionError, SessionPhase};
pub use submission::{LeadSubmitter, SubmissionClient, SubmissionError};
pub use validator::{validate, ValidationError};
