use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shared::{
    domain::LeadId,
    protocol::{extract_record_id, SubmissionPayload},
};
use thiserror::Error;
use tracing::{error, info, warn};

pub const FALLBACK_REJECTION_MESSAGE: &str = "Failed to submit";
pub const GENERIC_FAILURE_MESSAGE: &str = "Něco se pokazilo. Zkuste to prosím znovu.";

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("lead request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("lead response did not contain a record id")]
    MissingId,
}

impl SubmissionError {
    /// Text shown on the email step after a failed attempt.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            Self::Transport(_) | Self::MissingId => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

#[async_trait]
pub trait LeadSubmitter: Send + Sync {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<LeadId, SubmissionError>;
}

/// Posts a payload to the intake endpoint, or straight to the store when a
/// service key is configured. One request per call, never retried.
#[derive(Clone)]
pub struct SubmissionClient {
    http: Client,
    endpoint: String,
    service_key: Option<String>,
}

impl SubmissionClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
            service_key: None,
        }
    }

    pub fn with_service_key(mut self, key: impl Into<String>) -> Self {
        self.service_key = Some(key.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LeadSubmitter for SubmissionClient {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<LeadId, SubmissionError> {
        let mut request = self.http.post(&self.endpoint).json(payload);
        if let Some(key) = &self.service_key {
            request = request
                .header("apikey", key)
                .bearer_auth(key)
                .header("Prefer", "return=representation");
        }

        let response = request.send().await.map_err(|err| {
            error!(endpoint = %self.endpoint, error = %err, "lead submission request failed");
            SubmissionError::Transport(err)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = failure_message(&body);
            warn!(status = status.as_u16(), %message, "lead submission rejected");
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json().await?;
        let lead_id = extract_record_id(&body).ok_or(SubmissionError::MissingId)?;
        info!(lead_id = %lead_id, "lead submitted");
        Ok(lead_id)
    }
}

/// Reason shown for a rejected submission: the `error` field of a JSON body,
/// else the raw body text, else a fixed fallback.
pub fn failure_message(body: &str) -> String {
    if let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(body) {
        if let Some(Value::String(error)) = fields.get("error") {
            if !error.trim().is_empty() {
                return error.clone();
            }
        }
    }
    let body = body.trim();
    if body.is_empty() {
        FALLBACK_REJECTION_MESSAGE.to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
#[path = "tests/submission_tests.rs"]
mod tests;
