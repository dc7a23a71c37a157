use super::*;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::json;
use shared::protocol::InputTransform;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone)]
struct IntakeState {
    status: StatusCode,
    body: String,
    received: Arc<Mutex<Vec<Value>>>,
}

async fn handle_lead(
    State(state): State<IntakeState>,
    Json(payload): Json<Value>,
) -> (StatusCode, String) {
    state.received.lock().await.push(payload);
    (state.status, state.body.clone())
}

async fn spawn_intake_server(status: StatusCode, body: &str) -> (String, Arc<Mutex<Vec<Value>>>) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = IntakeState {
        status,
        body: body.to_string(),
        received: received.clone(),
    };
    let app = Router::new()
        .route("/api/leads", post(handle_lead))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}/api/leads"), received)
}

fn payload() -> SubmissionPayload {
    SubmissionPayload {
        name: String::new(),
        email: "a@b.cz".into(),
        description: "Chci získat první práci v IT".into(),
        input_transform: InputTransform::default(),
        status: "FLAGGED".into(),
    }
}

#[tokio::test]
async fn success_reports_identifier_from_object() {
    let (endpoint, received) = spawn_intake_server(StatusCode::OK, r#"{"id":"42"}"#).await;
    let lead_id = SubmissionClient::new(endpoint)
        .submit(&payload())
        .await
        .expect("submitted");
    assert_eq!(lead_id, LeadId::from("42"));

    let received = received.lock().await;
    assert_eq!(received.len(), 1);
    assert_eq!(received[0]["email"], json!("a@b.cz"));
    assert_eq!(received[0]["input_transform"]["platove_ocekavani"], Value::Null);
}

#[tokio::test]
async fn success_reads_first_element_of_list() {
    let (endpoint, _) =
        spawn_intake_server(StatusCode::CREATED, r#"[{"id":"lead-9"},{"id":"lead-10"}]"#).await;
    let lead_id = SubmissionClient::new(endpoint)
        .with_service_key("service")
        .submit(&payload())
        .await
        .expect("submitted");
    assert_eq!(lead_id, LeadId::from("lead-9"));
}

#[tokio::test]
async fn rejection_surfaces_error_field_and_is_not_retried() {
    let (endpoint, received) =
        spawn_intake_server(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":"db down"}"#).await;
    let err = SubmissionClient::new(endpoint)
        .submit(&payload())
        .await
        .expect_err("should fail");

    assert!(matches!(err, SubmissionError::Rejected { status: 500, .. }));
    assert_eq!(err.user_message(), "db down");
    assert_eq!(received.lock().await.len(), 1);
}

#[tokio::test]
async fn success_without_id_is_a_failure() {
    let (endpoint, _) = spawn_intake_server(StatusCode::OK, r#"{"success":true}"#).await;
    let err = SubmissionClient::new(endpoint)
        .submit(&payload())
        .await
        .expect_err("should fail");
    assert!(matches!(err, SubmissionError::MissingId));
    assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
}

#[test]
fn failure_message_falls_back_in_order() {
    assert_eq!(failure_message(r#"{"error":"db down"}"#), "db down");
    assert_eq!(failure_message("upstream exploded"), "upstream exploded");
    assert_eq!(failure_message(r#"{"message":"nope"}"#), r#"{"message":"nope"}"#);
    assert_eq!(failure_message("   "), FALLBACK_REJECTION_MESSAGE);
}
