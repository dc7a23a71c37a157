use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use shared::{
    catalog::email_shape_matches,
    domain::LeadId,
    error::{ApiError, ApiException, ErrorCode},
    protocol::{HealthReport, LeadCreated, LeadEnvelope, LeadRequest, LEAD_STATUS_FLAGGED},
};
use storage::{LeadStore, NewLead, StoreError};
use tracing::{error, info, warn};

pub const SERVICE_NAME: &str = "lead-intake";
pub const CONFIGURATION_ERROR: &str = "Server configuration error";
pub const STORE_REJECTION_FALLBACK: &str = "Failed to create lead";

#[derive(Clone, Default)]
pub struct ApiContext {
    /// `None` when the backing store credentials were not configured.
    pub store: Option<Arc<dyn LeadStore>>,
}

impl ApiContext {
    pub fn new(store: Arc<dyn LeadStore>) -> Self {
        Self { store: Some(store) }
    }

    pub fn unconfigured() -> Self {
        Self { store: None }
    }

    fn store(&self) -> Result<&Arc<dyn LeadStore>, ApiError> {
        self.store.as_ref().ok_or_else(|| {
            error!("lead store is not configured");
            ApiError::new(ErrorCode::Configuration, CONFIGURATION_ERROR)
        })
    }
}

pub async fn create_lead(ctx: &ApiContext, request: LeadRequest) -> Result<LeadCreated, ApiError> {
    let lead = validate_request(request)?;
    let store = ctx.store()?;

    let stored = store.insert(lead).await.map_err(store_failure)?;
    info!(lead_id = %stored.id, "lead created");
    Ok(LeadCreated {
        id: stored.id,
        success: true,
    })
}

pub async fn get_lead(ctx: &ApiContext, id: &LeadId) -> Result<LeadEnvelope, ApiError> {
    let store = ctx.store()?;
    let stored = store
        .fetch(id)
        .await
        .map_err(store_failure)?
        .ok_or_else(|| ApiError::new(ErrorCode::NotFound, "Lead not found"))?;
    Ok(LeadEnvelope {
        success: true,
        data: stored.record,
    })
}

pub fn health() -> HealthReport {
    HealthReport {
        status: "healthy".into(),
        timestamp: Utc::now(),
        service: SERVICE_NAME.into(),
    }
}

/// Required-field checks in the order callers see them reported, then the
/// email shape. The status is always reset to flagged.
fn validate_request(request: LeadRequest) -> Result<NewLead, ApiException> {
    let email = required_text(request.email, "Email is required")?;
    let description = required_text(request.description, "Description is required")?;
    let input_transform = match request.input_transform {
        Some(value) if !value.is_null() => value,
        _ => {
            return Err(ApiException::new(
                ErrorCode::Validation,
                "input_transform is required",
            ))
        }
    };
    if !email_shape_matches(email.trim()) {
        return Err(ApiException::new(
            ErrorCode::Validation,
            "Invalid email format",
        ));
    }

    Ok(NewLead {
        name: request.name.unwrap_or_default(),
        email,
        description,
        input_transform,
        status: LEAD_STATUS_FLAGGED.to_string(),
    })
}

fn required_text(value: Option<String>, message: &str) -> Result<String, ApiException> {
    match value {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(ApiException::new(ErrorCode::Validation, message)),
    }
}

fn store_failure(err: StoreError) -> ApiError {
    match err {
        StoreError::Rejected { status, body } => {
            warn!(status, "store rejected lead write");
            let message = if body.trim().is_empty() {
                STORE_REJECTION_FALLBACK.to_string()
            } else {
                body
            };
            ApiError::upstream(status, message)
        }
        other => {
            error!(error = %other, "lead store call failed");
            ApiError::new(ErrorCode::Internal, other.to_string())
        }
    }
}

/// Parses a raw request body, reporting malformed JSON as a validation error.
pub fn parse_lead_request(body: &[u8]) -> Result<LeadRequest, ApiError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|_| ApiError::new(ErrorCode::Validation, "Invalid JSON body"))?;
    if !value.is_object() {
        return Err(ApiError::new(ErrorCode::Validation, "Invalid JSON body"));
    }
    serde_json::from_value(value)
        .map_err(|err| ApiError::new(ErrorCode::Validation, format!("Invalid JSON body: {err}")))
}
