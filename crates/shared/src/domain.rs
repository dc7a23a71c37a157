use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_newtype!(LeadId);

/// Form fields a session can hold a value for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    Goal,
    Area,
    /// Free-text companion of the `other` sentinel on the area step.
    AreaOther,
    Level,
    Specificity,
    #[serde(alias = "timeHorizon")]
    TimeHorizon,
    Email,
    Name,
    Technologies,
    #[serde(alias = "salaryExpectation")]
    SalaryExpectation,
}

impl FieldKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Goal => "goal",
            Self::Area => "area",
            Self::AreaOther => "area_other",
            Self::Level => "level",
            Self::Specificity => "specificity",
            Self::TimeHorizon => "time_horizon",
            Self::Email => "email",
            Self::Name => "name",
            Self::Technologies => "technologies",
            Self::SalaryExpectation => "salary_expectation",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Intro,
    SingleChoice,
    FreeText,
    Email,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepOption {
    pub value: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<FieldKey>,
    pub kind: StepKind,
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
    pub options: &'static [StepOption],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Field holding the free text that accompanies the `other` option.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_companion: Option<FieldKey>,
}

impl StepDefinition {
    pub fn option(&self, value: &str) -> Option<&'static StepOption> {
        self.options.iter().find(|option| option.value == value)
    }

    pub fn has_option(&self, value: &str) -> bool {
        self.option(value).is_some()
    }
}
