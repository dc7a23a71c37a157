use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use shared::{domain::LeadId, protocol::extract_record_id};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, warn};

pub const DEFAULT_LEADS_TABLE: &str = "junior_leads";

/// Row written to the backing store for one completed onboarding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub description: String,
    pub input_transform: Value,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredLead {
    pub id: LeadId,
    pub record: Value,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store rejected request with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("store response did not contain a record id")]
    MissingId,
}

#[async_trait]
pub trait LeadStore: Send + Sync {
    async fn insert(&self, lead: NewLead) -> Result<StoredLead, StoreError>;
    async fn fetch(&self, id: &LeadId) -> Result<Option<StoredLead>, StoreError>;
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub base_url: String,
    pub service_key: String,
    pub table: String,
}

/// PostgREST-style store reached at `<base_url>/rest/v1/<table>`.
#[derive(Clone)]
pub struct RestLeadStore {
    http: Client,
    config: StoreConfig,
}

impl RestLeadStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    pub fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.table
        )
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.config.service_key)
            .bearer_auth(&self.config.service_key)
    }
}

#[async_trait]
impl LeadStore for RestLeadStore {
    async fn insert(&self, lead: NewLead) -> Result<StoredLead, StoreError> {
        let response = self
            .authorized(self.http.post(self.table_url()))
            .header("Prefer", "return=representation")
            .json(&lead)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), %body, "store rejected lead insert");
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await?;
        let id = extract_record_id(&body).ok_or(StoreError::MissingId)?;
        let record = match body {
            Value::Array(mut rows) if !rows.is_empty() => rows.swap_remove(0),
            other => other,
        };
        debug!(lead_id = %id, "store accepted lead");
        Ok(StoredLead { id, record })
    }

    async fn fetch(&self, id: &LeadId) -> Result<Option<StoredLead>, StoreError> {
        let response = self
            .authorized(self.http.get(self.table_url()))
            .query(&[("id", format!("eq.{id}")), ("select", "*".to_string())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await?;
        let record = match body {
            Value::Array(mut rows) if !rows.is_empty() => rows.swap_remove(0),
            Value::Array(_) | Value::Null => return Ok(None),
            other => other,
        };
        Ok(Some(StoredLead {
            id: id.clone(),
            record,
        }))
    }
}

/// Process-local store used by tests and development runs.
#[derive(Clone, Default)]
pub struct MemoryLeadStore {
    leads: Arc<RwLock<Vec<StoredLead>>>,
}

impl MemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_empty(&self) -> bool {
        self.leads.read().await.is_empty()
    }

    pub async fn all(&self) -> Vec<StoredLead> {
        self.leads.read().await.clone()
    }
}

#[async_trait]
impl LeadStore for MemoryLeadStore {
    async fn insert(&self, lead: NewLead) -> Result<StoredLead, StoreError> {
        let id = LeadId(uuid::Uuid::new_v4().to_string());
        let mut record = serde_json::to_value(&lead).unwrap_or(Value::Null);
        if let Value::Object(fields) = &mut record {
            fields.insert("id".into(), Value::String(id.0.clone()));
            fields.insert("plan".into(), Value::Null);
            fields.insert("created_at".into(), Value::String(Utc::now().to_rfc3339()));
        }
        let stored = StoredLead { id, record };
        self.leads.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn fetch(&self, id: &LeadId) -> Result<Option<StoredLead>, StoreError> {
        Ok(self
            .leads
            .read()
            .await
            .iter()
            .find(|lead| &lead.id == id)
            .cloned())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
