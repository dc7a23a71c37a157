use shared::catalog::steps;

use crate::{
    form::{Answers, FormState},
    validator::{validate, ValidationError},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Moved { from: usize, to: usize },
    /// The current step failed validation; the index did not change.
    Blocked(ValidationError),
    /// Already on the first (retreat) or last (advance) step.
    AtBoundary,
    /// Input was recorded but the flow stays on the current step.
    Unchanged,
}

impl Navigation {
    pub fn moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

pub fn advance(state: &mut FormState) -> Navigation {
    if let Err(err) = validate(state.step(), state.answers()) {
        return Navigation::Blocked(err);
    }
    if state.is_last_step() {
        return Navigation::AtBoundary;
    }
    let from = state.current_step();
    state.move_to(from + 1);
    Navigation::Moved { from, to: from + 1 }
}

pub fn retreat(state: &mut FormState) -> Navigation {
    let from = state.current_step();
    if from == 0 {
        return Navigation::AtBoundary;
    }
    state.move_to(from - 1);
    Navigation::Moved { from, to: from - 1 }
}

/// First step (in catalog order) whose stored answer does not validate.
pub fn first_invalid_step(answers: &Answers) -> Option<(usize, ValidationError)> {
    steps()
        .iter()
        .enumerate()
        .find_map(|(index, step)| validate(step, answers).err().map(|err| (index, err)))
}

#[cfg(test)]
#[path = "tests/navigator_tests.rs"]
mod tests;
