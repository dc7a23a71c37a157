//! The fixed, ordered list of onboarding steps.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{FieldKey, StepDefinition, StepKind, StepOption};

/// Option value that unlocks a free-text companion answer.
pub const OTHER_OPTION: &str = "other";

pub const SPECIFICITY_MIN_LENGTH: usize = 20;

pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid email regex"));

pub fn email_shape_matches(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

const GOAL_OPTIONS: &[StepOption] = &[
    StepOption {
        value: "first_job",
        label: "Získat první práci v IT",
        description: "Chci se prosadit a nastartovat svou kariéru",
    },
    StepOption {
        value: "career_change",
        label: "Změnit kariéru",
        description: "Chci přejít do IT z jiného oboru",
    },
    StepOption {
        value: "level_up",
        label: "Posunout se výš",
        description: "Chci růst v aktuální pozici",
    },
    StepOption {
        value: "specialize",
        label: "Specializovat se",
        description: "Chci se stát expertem v konkrétní oblasti",
    },
];

const AREA_OPTIONS: &[StepOption] = &[
    StepOption {
        value: "frontend",
        label: "Frontend Development",
        description: "React, Vue, Angular, webové aplikace",
    },
    StepOption {
        value: "backend",
        label: "Backend Development",
        description: "Node.js, Python, Java, API, databáze",
    },
    StepOption {
        value: "fullstack",
        label: "Fullstack Development",
        description: "Kompletní vývoj webových aplikací",
    },
    StepOption {
        value: "mobile",
        label: "Mobile Development",
        description: "iOS, Android, React Native, Flutter",
    },
    StepOption {
        value: "data",
        label: "Data & Analytics",
        description: "Data science, ML, analýza dat",
    },
    StepOption {
        value: "devops",
        label: "DevOps & Cloud",
        description: "AWS, Docker, Kubernetes, CI/CD",
    },
    StepOption {
        value: OTHER_OPTION,
        label: "Jiné",
        description: "Zadám vlastní oblast",
    },
];

const LEVEL_OPTIONS: &[StepOption] = &[
    StepOption {
        value: "beginner",
        label: "Úplný začátečník",
        description: "Teprve začínám, mám minimum zkušeností",
    },
    StepOption {
        value: "learning",
        label: "Učím se",
        description: "Absolvoval/a jsem kurzy, tvořím projekty",
    },
    StepOption {
        value: "junior",
        label: "Junior",
        description: "Mám základní komerční zkušenosti",
    },
    StepOption {
        value: "mid",
        label: "Mid-level",
        description: "Pracuji samostatně, 2-4 roky praxe",
    },
];

const TIME_HORIZON_OPTIONS: &[StepOption] = &[
    StepOption {
        value: "3_months",
        label: "3 měsíce",
        description: "Intenzivní tempo, rychlé výsledky",
    },
    StepOption {
        value: "6_months",
        label: "6 měsíců",
        description: "Vyvážené tempo, důkladná příprava",
    },
    StepOption {
        value: "12_months",
        label: "12 měsíců",
        description: "Dlouhodobý plán, hluboké znalosti",
    },
    StepOption {
        value: "flexible",
        label: "Flexibilní",
        description: "Nemám pevný termín",
    },
];

pub static STEPS: [StepDefinition; 7] = [
    StepDefinition {
        key: None,
        kind: StepKind::Intro,
        title: "Vítejte v Orakulum",
        subtitle: Some("Vytvořte si osobní kariérní plán na míru během několika minut."),
        placeholder: None,
        options: &[],
        min_length: None,
        other_companion: None,
    },
    StepDefinition {
        key: Some(FieldKey::Goal),
        kind: StepKind::SingleChoice,
        title: "Jaký je váš hlavní cíl?",
        subtitle: Some("Vyberte, co nejlépe vystihuje vaši kariérní ambici."),
        placeholder: None,
        options: GOAL_OPTIONS,
        min_length: None,
        other_companion: None,
    },
    StepDefinition {
        key: Some(FieldKey::Area),
        kind: StepKind::SingleChoice,
        title: "Jaká oblast vás zajímá?",
        subtitle: Some("Vyberte technickou oblast, které se chcete věnovat."),
        placeholder: Some("Zadejte svou oblast..."),
        options: AREA_OPTIONS,
        min_length: None,
        other_companion: Some(FieldKey::AreaOther),
    },
    StepDefinition {
        key: Some(FieldKey::Level),
        kind: StepKind::SingleChoice,
        title: "Jaká je vaše aktuální úroveň?",
        subtitle: Some("Buďte upřímní – plán přizpůsobíme vašim zkušenostem."),
        placeholder: None,
        options: LEVEL_OPTIONS,
        min_length: None,
        other_companion: None,
    },
    StepDefinition {
        key: Some(FieldKey::Specificity),
        kind: StepKind::FreeText,
        title: "Upřesněte svou situaci",
        subtitle: Some("Čím konkrétnější informace, tím přesnější plán."),
        placeholder: Some(
            "Např.: Učím se JavaScript 6 měsíců, vytvořil jsem pár projektů v Reactu, hledám první práci jako frontend developer...",
        ),
        options: &[],
        min_length: Some(SPECIFICITY_MIN_LENGTH),
        other_companion: None,
    },
    StepDefinition {
        key: Some(FieldKey::TimeHorizon),
        kind: StepKind::SingleChoice,
        title: "Jaký je váš časový horizont?",
        subtitle: Some("Za jak dlouho byste chtěl/a dosáhnout svého cíle?"),
        placeholder: None,
        options: TIME_HORIZON_OPTIONS,
        min_length: None,
        other_companion: None,
    },
    StepDefinition {
        key: Some(FieldKey::Email),
        kind: StepKind::Email,
        title: "Kam vám máme poslat plán?",
        subtitle: Some("Zadejte email pro přístup k vašemu osobnímu prostoru."),
        placeholder: Some("vas@email.cz"),
        options: &[],
        min_length: None,
        other_companion: None,
    },
];

pub fn steps() -> &'static [StepDefinition] {
    &STEPS
}

pub fn step_count() -> usize {
    STEPS.len()
}

pub fn step_at(index: usize) -> Option<&'static StepDefinition> {
    STEPS.get(index)
}

pub fn step_for(key: FieldKey) -> Option<&'static StepDefinition> {
    STEPS.iter().find(|step| step.key == Some(key))
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
