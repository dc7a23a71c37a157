use std::io::Write;

use anyhow::Result;
use clap::Parser;
use client_core::{
    ActivityRotation, ActivityTicker, OnboardingSession, Scheduler, SessionError, SessionPhase,
    SubmissionClient,
};
use shared::{catalog::OTHER_OPTION, domain::StepKind};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser, Debug)]
#[command(name = "onboard", about = "Interactive onboarding in the terminal")]
struct Args {
    /// Intake endpoint, or the store table URL when a service key is given.
    #[arg(long, env = "LEAD_API_URL", default_value = "http://127.0.0.1:8443/api/leads")]
    endpoint: String,
    /// Service key for posting straight to the store.
    #[arg(long, env = "LEAD_API_KEY")]
    service_key: Option<String>,
}

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut client = SubmissionClient::new(args.endpoint);
    if let Some(key) = args.service_key {
        client = client.with_service_key(key);
    }
    info!(endpoint = client.endpoint(), "starting onboarding session");

    let ticker = ActivityTicker::start(&Scheduler::default(), ActivityRotation::new());
    let mut session = OnboardingSession::new();
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{}", render::step_screen(&session, &ticker.current()));
        let Some(line) = prompt(&mut input, "> ").await? else {
            warn!("input closed before the form was submitted");
            return Ok(());
        };
        let line = line.trim();

        if line == "<" {
            session.retreat();
            continue;
        }

        let step = session.step();
        match step.kind {
            StepKind::Intro => {
                session.advance();
            }
            StepKind::SingleChoice => {
                let Some(option) = line
                    .parse::<usize>()
                    .ok()
                    .and_then(|number| number.checked_sub(1))
                    .and_then(|index| step.options.get(index))
                else {
                    session.select_option(line);
                    continue;
                };
                if option.value == OTHER_OPTION {
                    let custom = prompt(&mut input, "Upřesněte: ").await?.unwrap_or_default();
                    session.set_other_text(custom.trim());
                }
                println!("✓ {}", option.label);
                session.choose_option(option.value).await;
            }
            StepKind::FreeText => {
                session.set_text(line);
                session.advance();
            }
            StepKind::Email => {
                session.set_text(line);
                let name = prompt(&mut input, "Jméno (nepovinné, Enter přeskočí): ")
                    .await?
                    .unwrap_or_default();
                if !name.trim().is_empty() {
                    session.set_name(name.trim());
                }
                if submit(&mut session, &client).await {
                    break;
                }
            }
        }
    }

    if let SessionPhase::Complete { lead_id, email } = session.phase() {
        println!("\nHotovo! Váš osobní prostor je připraven.");
        println!("Plán pošleme na {email} (lead {lead_id}).");
    }
    Ok(())
}

/// Returns `true` once the session is complete.
async fn submit(session: &mut OnboardingSession, client: &SubmissionClient) -> bool {
    let mut updates = session.processing_updates();
    let printer = tokio::spawn(async move {
        let mut shown_phase = None;
        while updates.changed().await.is_ok() {
            let snapshot = *updates.borrow_and_update();
            if shown_phase != Some(snapshot.phase_index) || snapshot.complete {
                println!("{}", render::processing_line(&snapshot));
                shown_phase = Some(snapshot.phase_index);
            }
            if snapshot.complete {
                break;
            }
        }
    });

    let outcome = session.submit(client).await;
    printer.abort();

    match outcome {
        Ok(_) => true,
        Err(SessionError::Invalid(_) | SessionError::Failed(_)) => false,
        Err(err) => {
            warn!(error = %err, "submit refused");
            false
        }
    }
}

async fn prompt(input: &mut Input, label: &str) -> Result<Option<String>> {
    print!("{label}");
    std::io::stdout().flush()?;
    Ok(input.next_line().await?)
}
