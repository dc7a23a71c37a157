use client_core::{ActivityFrame, OnboardingSession, ProcessingSnapshot};
use shared::domain::StepKind;

const BAR_WIDTH: usize = 30;

pub fn bar(percent: f32) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f32).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

pub fn activity_line(frame: &ActivityFrame) -> String {
    format!(
        "{} {} {}  · {}",
        frame.item.avatar, frame.item.role, frame.item.action, frame.score
    )
}

pub fn step_screen(session: &OnboardingSession, activity: &ActivityFrame) -> String {
    let step = session.step();
    let mut out = String::new();

    out.push_str(&format!(
        "\n{}  {} {:.0} %\n",
        session.progress_label(),
        bar(session.progress_percent()),
        session.progress_percent()
    ));
    out.push_str(&format!("  {}\n\n", activity_line(activity)));
    out.push_str(&format!("{}\n", step.title));
    if let Some(subtitle) = step.subtitle {
        out.push_str(&format!("{subtitle}\n"));
    }

    match step.kind {
        StepKind::Intro => out.push_str("\n[Enter] Začít\n"),
        StepKind::SingleChoice => {
            out.push('\n');
            let selected = step.key.map(|key| session.answers().text(key)).unwrap_or("");
            for (index, option) in step.options.iter().enumerate() {
                let marker = if option.value == selected { '*' } else { ' ' };
                out.push_str(&format!(
                    "{marker}{:>2}) {} - {}\n",
                    index + 1,
                    option.label,
                    option.description
                ));
            }
        }
        StepKind::FreeText | StepKind::Email => {
            if let Some(placeholder) = step.placeholder {
                out.push_str(&format!("\n({placeholder})\n"));
            }
        }
    }

    if let Some(error) = session.error() {
        out.push_str(&format!("\n! {error}\n"));
    }
    if !session.form().is_first_step() {
        out.push_str("\n'<' zpět\n");
    }
    out
}

pub fn processing_line(snapshot: &ProcessingSnapshot) -> String {
    format!(
        "{} {:>3.0} %  {}",
        bar(snapshot.progress),
        snapshot.progress,
        snapshot.phase_text
    )
}
