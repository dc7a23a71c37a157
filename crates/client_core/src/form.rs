use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shared::{
    catalog::{step_at, step_count, STEPS},
    domain::{FieldKey, StepDefinition},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    One(String),
    Many(Vec<String>),
}

impl AnswerValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::One(value) => Some(value),
            Self::Many(_) => None,
        }
    }

    pub fn items(&self) -> Vec<String> {
        match self {
            Self::One(value) if value.trim().is_empty() => Vec::new(),
            Self::One(value) => vec![value.trim().to_string()],
            Self::Many(values) => values
                .iter()
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Collected answers keyed by form field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers(BTreeMap<FieldKey, AnswerValue>);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: FieldKey) -> Option<&AnswerValue> {
        self.0.get(&key)
    }

    /// Single-valued answer, or `""` when absent or multi-valued.
    pub fn text(&self, key: FieldKey) -> &str {
        self.get(key).and_then(AnswerValue::as_text).unwrap_or("")
    }

    pub fn set(&mut self, key: FieldKey, value: impl Into<String>) {
        self.0.insert(key, AnswerValue::One(value.into()));
    }

    pub fn set_list(&mut self, key: FieldKey, values: Vec<String>) {
        self.0.insert(key, AnswerValue::Many(values));
    }

    pub fn with(mut self, key: FieldKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }
}

/// Per-session form record: the answers plus the index of the visible step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    current_step: usize,
    answers: Answers,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_answers(answers: Answers) -> Self {
        Self {
            current_step: 0,
            answers,
        }
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn step(&self) -> &'static StepDefinition {
        step_at(self.current_step).unwrap_or(&STEPS[0])
    }

    pub fn is_first_step(&self) -> bool {
        self.current_step == 0
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step + 1 >= step_count()
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub(crate) fn set_answer(&mut self, key: FieldKey, value: impl Into<String>) {
        self.answers.set(key, value);
    }

    pub(crate) fn move_to(&mut self, index: usize) {
        debug_assert!(index < step_count());
        self.current_step = index;
    }
}
