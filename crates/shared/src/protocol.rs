use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::LeadId;

/// Status of a lead nobody downstream has picked up yet.
pub const LEAD_STATUS_FLAGGED: &str = "FLAGGED";

pub fn leads_route() -> &'static str {
    "/api/leads"
}

pub fn health_route() -> &'static str {
    "/api/health"
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputQuality {
    pub skore: u8,
    pub popis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceNotes {
    pub poznamky: Vec<String>,
}

/// Structured side-record stored next to the free-text description.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputTransform {
    pub obor: String,
    pub seniorita: String,
    pub hlavni_cil: String,
    pub casovy_horizont: String,
    pub technologie: Vec<String>,
    pub platove_ocekavani: Option<String>,
    pub konkretnost: String,
    pub kvalita_vstupu: Option<InputQuality>,
    pub inference: Option<InferenceNotes>,
    pub raw_description: String,
    pub puvodni_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub name: String,
    pub email: String,
    pub description: String,
    pub input_transform: InputTransform,
    pub status: String,
}

/// Inbound body of `POST /api/leads`; every field is optional so absence
/// can be reported as a validation error instead of a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub input_transform: Option<Value>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadCreated {
    pub id: LeadId,
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadEnvelope {
    pub success: bool,
    pub data: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub service: String,
}

/// Reads a record identifier from a store or intake response: either the
/// `id` of a single object or the `id` of the first element of a list.
/// Numeric ids are rendered as strings.
pub fn extract_record_id(body: &Value) -> Option<LeadId> {
    let record = match body {
        Value::Array(items) => items.first()?,
        other => other,
    };
    match record.get("id")? {
        Value::String(id) if !id.is_empty() => Some(LeadId(id.clone())),
        Value::Number(id) => Some(LeadId(id.to_string())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_id_comes_from_object_or_first_list_element() {
        assert_eq!(
            extract_record_id(&json!({ "id": "42" })),
            Some(LeadId::from("42"))
        );
        assert_eq!(
            extract_record_id(&json!([{ "id": 7 }, { "id": 8 }])),
            Some(LeadId::from("7"))
        );
        assert_eq!(extract_record_id(&json!([])), None);
        assert_eq!(extract_record_id(&json!({ "success": true })), None);
    }

    #[test]
    fn optional_side_record_fields_serialize_as_null() {
        let value = serde_json::to_value(InputTransform::default()).expect("json");
        assert_eq!(value["platove_ocekavani"], Value::Null);
        assert_eq!(value["kvalita_vstupu"], Value::Null);
        assert_eq!(value["inference"], Value::Null);
        assert_eq!(value["technologie"], json!([]));
    }

    #[test]
    fn lead_request_tolerates_missing_fields() {
        let request: LeadRequest =
            serde_json::from_value(json!({ "email": "a@b.cz" })).expect("decode");
        assert_eq!(request.email.as_deref(), Some("a@b.cz"));
        assert!(request.description.is_none());
        assert!(request.input_transform.is_none());
    }
}
