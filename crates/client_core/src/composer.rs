//! Turns coded answers into the lead's free-text description and its
//! structured side-record.
//!
//! Clause labels live here rather than in the catalog: the catalog labels are
//! written for the option buttons, these are written to read as sentences.

use shared::{
    catalog::OTHER_OPTION,
    domain::FieldKey,
    protocol::{InputTransform, SubmissionPayload, LEAD_STATUS_FLAGGED},
};

use crate::form::{AnswerValue, Answers};

const CLAUSE_SEPARATOR: &str = ". ";

const GOAL_CLAUSES: &[(&str, &str)] = &[
    ("first_job", "Chci získat první práci v IT"),
    ("career_change", "Chci změnit kariéru a přejít do IT"),
    ("level_up", "Chci se posunout výš v aktuální pozici"),
    ("specialize", "Chci se specializovat"),
];

const AREA_LABELS: &[(&str, &str)] = &[
    ("frontend", "Frontend Development"),
    ("backend", "Backend Development"),
    ("fullstack", "Fullstack Development"),
    ("mobile", "Mobile Development"),
    ("data", "Data & Analytics"),
    ("devops", "DevOps & Cloud"),
];

const LEVEL_LABELS: &[(&str, &str)] = &[
    ("beginner", "úplný začátečník"),
    ("learning", "učím se"),
    ("junior", "junior"),
    ("mid", "mid-level"),
];

const TIME_HORIZON_LABELS: &[(&str, &str)] = &[
    ("3_months", "3 měsíce"),
    ("6_months", "6 měsíců"),
    ("12_months", "12 měsíců"),
    ("flexible", "flexibilní časový horizont"),
];

fn lookup(table: &[(&str, &'static str)], code: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, label)| *label)
}

/// Custom area typed next to the `other` option, if that option is chosen.
fn custom_area(answers: &Answers) -> Option<&str> {
    if answers.text(FieldKey::Area) != OTHER_OPTION {
        return None;
    }
    let custom = answers.text(FieldKey::AreaOther).trim();
    (!custom.is_empty()).then_some(custom)
}

pub fn compose_description(answers: &Answers) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(goal) = lookup(GOAL_CLAUSES, answers.text(FieldKey::Goal)) {
        parts.push(goal.to_string());
    }

    let area = lookup(AREA_LABELS, answers.text(FieldKey::Area)).or_else(|| custom_area(answers));
    if let Some(area) = area {
        parts.push(format!("v oblasti {area}"));
    }

    if let Some(level) = lookup(LEVEL_LABELS, answers.text(FieldKey::Level)) {
        parts.push(format!("Aktuálně jsem {level}"));
    }

    let specificity = answers.text(FieldKey::Specificity);
    if !specificity.trim().is_empty() {
        parts.push(specificity.to_string());
    }

    if let Some(horizon) = lookup(TIME_HORIZON_LABELS, answers.text(FieldKey::TimeHorizon)) {
        parts.push(format!("Časový horizont: {horizon}"));
    }

    if parts.is_empty() {
        return specificity.to_string();
    }
    parts.join(CLAUSE_SEPARATOR)
}

pub fn compose_input_transform(answers: &Answers) -> InputTransform {
    let specificity = answers.text(FieldKey::Specificity).to_string();
    let obor = custom_area(answers)
        .unwrap_or_else(|| answers.text(FieldKey::Area))
        .to_string();
    let salary = answers.text(FieldKey::SalaryExpectation).trim();

    InputTransform {
        obor,
        seniorita: answers.text(FieldKey::Level).to_string(),
        hlavni_cil: answers.text(FieldKey::Goal).to_string(),
        casovy_horizont: answers.text(FieldKey::TimeHorizon).to_string(),
        technologie: answers
            .get(FieldKey::Technologies)
            .map(AnswerValue::items)
            .unwrap_or_default(),
        platove_ocekavani: (!salary.is_empty()).then(|| salary.to_string()),
        konkretnost: specificity.clone(),
        kvalita_vstupu: None,
        inference: None,
        raw_description: specificity.clone(),
        puvodni_text: specificity,
    }
}

pub fn compose(answers: &Answers) -> SubmissionPayload {
    SubmissionPayload {
        name: answers.text(FieldKey::Name).trim().to_string(),
        email: answers.text(FieldKey::Email).trim().to_string(),
        description: compose_description(answers),
        input_transform: compose_input_transform(answers),
        status: LEAD_STATUS_FLAGGED.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/composer_tests.rs"]
mod tests;
