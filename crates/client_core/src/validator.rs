use shared::{
    catalog::{email_shape_matches, OTHER_OPTION},
    domain::{StepDefinition, StepKind},
};
use thiserror::Error;

use crate::form::Answers;

/// Inline message shown next to a step that cannot be left yet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Vyberte jednu z možností")]
    MissingChoice,
    #[error("Neznámá možnost")]
    UnknownChoice,
    #[error("Upřesněte vlastní možnost")]
    MissingOtherText,
    #[error("Prosím, napište alespoň pár vět (min. {min_length} znaků)")]
    TooShort { min_length: usize },
    #[error("Zadejte emailovou adresu")]
    MissingEmail,
    #[error("Zadejte platnou emailovou adresu")]
    InvalidEmail,
}

pub fn validate(step: &StepDefinition, answers: &Answers) -> Result<(), ValidationError> {
    let value = step.key.map(|key| answers.text(key)).unwrap_or("");

    match step.kind {
        StepKind::Intro => Ok(()),
        StepKind::SingleChoice => {
            if value.is_empty() {
                return Err(ValidationError::MissingChoice);
            }
            if !step.has_option(value) {
                return Err(ValidationError::UnknownChoice);
            }
            if value == OTHER_OPTION {
                let companion = step
                    .other_companion
                    .map(|key| answers.text(key))
                    .unwrap_or("");
                if companion.trim().is_empty() {
                    return Err(ValidationError::MissingOtherText);
                }
            }
            Ok(())
        }
        StepKind::FreeText => {
            let min_length = step.min_length.unwrap_or(0);
            if value.trim().chars().count() < min_length {
                return Err(ValidationError::TooShort { min_length });
            }
            Ok(())
        }
        StepKind::Email => {
            let email = value.trim();
            if email.is_empty() {
                return Err(ValidationError::MissingEmail);
            }
            if !email_shape_matches(email) {
                return Err(ValidationError::InvalidEmail);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "tests/validator_tests.rs"]
mod tests;
