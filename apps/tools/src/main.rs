use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    compose, navigator::first_invalid_step, submission::LeadSubmitter, Answers, SubmissionClient,
};
use shared::catalog::steps;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the step catalog as JSON.
    Catalog,
    /// Print the payload composed from an answers file.
    Compose { answers: PathBuf },
    /// Validate an answers file and submit it.
    Submit {
        answers: PathBuf,
        #[arg(long, env = "LEAD_API_URL", default_value = "http://127.0.0.1:8443/api/leads")]
        endpoint: String,
        #[arg(long, env = "LEAD_API_KEY")]
        service_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::Catalog => {
            println!("{}", serde_json::to_string_pretty(steps())?);
        }
        Command::Compose { answers } => {
            let answers = read_answers(&answers)?;
            println!("{}", serde_json::to_string_pretty(&compose(&answers))?);
        }
        Command::Submit {
            answers,
            endpoint,
            service_key,
        } => {
            let answers = read_answers(&answers)?;
            if let Some((index, err)) = first_invalid_step(&answers) {
                bail!("step {index} ({}) is invalid: {err}", steps()[index].title);
            }

            let mut client = SubmissionClient::new(endpoint);
            if let Some(key) = service_key {
                client = client.with_service_key(key);
            }
            let payload = compose(&answers);
            info!(endpoint = client.endpoint(), email = %payload.email, "submitting lead");
            let lead_id = client
                .submit(&payload)
                .await
                .map_err(|err| anyhow::anyhow!("submission failed: {}", err.user_message()))?;
            info!(lead_id = %lead_id, "lead created");
            println!("created lead_id={lead_id}");
        }
    }

    Ok(())
}

fn read_answers(path: &Path) -> Result<Answers> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("answers file '{}' is not valid JSON", path.display()))
}
