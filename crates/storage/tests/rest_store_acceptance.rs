use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use shared::domain::LeadId;
use storage::{LeadStore, NewLead, RestLeadStore, StoreConfig, StoreError};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct MockStore {
    inserted: Arc<Mutex<Vec<(HeaderMap, Value)>>>,
    reject_with: Option<(u16, &'static str)>,
}

async fn handle_insert(
    State(state): State<MockStore>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if let Some((status, message)) = state.reject_with {
        return (
            StatusCode::from_u16(status).expect("status"),
            Json(json!({ "message": message })),
        );
    }
    state.inserted.lock().await.push((headers, body.clone()));
    let mut row = body;
    row["id"] = json!("lead-1");
    (StatusCode::CREATED, Json(json!([row])))
}

async fn handle_fetch(Query(query): Query<Vec<(String, String)>>) -> Json<Value> {
    let wanted = query
        .iter()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.clone())
        .unwrap_or_default();
    if wanted == "eq.lead-1" {
        Json(json!([{ "id": "lead-1", "email": "a@b.cz" }]))
    } else {
        Json(json!([]))
    }
}

async fn spawn_store(state: MockStore) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new()
        .route(
            "/rest/v1/junior_leads",
            post(handle_insert).get(handle_fetch),
        )
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn store_for(base_url: String) -> RestLeadStore {
    RestLeadStore::new(StoreConfig {
        base_url,
        service_key: "service-key".into(),
        table: "junior_leads".into(),
    })
}

fn lead() -> NewLead {
    NewLead {
        name: String::new(),
        email: "a@b.cz".into(),
        description: "Chci získat první práci v IT".into(),
        input_transform: json!({ "obor": "frontend" }),
        status: "FLAGGED".into(),
    }
}

#[tokio::test]
async fn insert_sends_credentials_and_reads_id_from_first_row() {
    let state = MockStore::default();
    let base_url = spawn_store(state.clone()).await;

    let stored = store_for(base_url).insert(lead()).await.expect("insert");
    assert_eq!(stored.id, LeadId::from("lead-1"));
    assert_eq!(stored.record["email"], json!("a@b.cz"));

    let inserted = state.inserted.lock().await;
    let (headers, body) = inserted.first().expect("one insert");
    assert_eq!(headers["apikey"], "service-key");
    assert_eq!(headers["authorization"], "Bearer service-key");
    assert_eq!(headers["prefer"], "return=representation");
    assert_eq!(body["status"], json!("FLAGGED"));
    assert_eq!(body["input_transform"]["obor"], json!("frontend"));
}

#[tokio::test]
async fn rejected_insert_carries_status_and_body() {
    let state = MockStore {
        reject_with: Some((409, "duplicate key")),
        ..MockStore::default()
    };
    let base_url = spawn_store(state).await;

    let err = store_for(base_url)
        .insert(lead())
        .await
        .expect_err("should be rejected");
    match err {
        StoreError::Rejected { status, body } => {
            assert_eq!(status, 409);
            assert!(body.contains("duplicate key"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn fetch_filters_by_id_and_maps_empty_list_to_none() {
    let base_url = spawn_store(MockStore::default()).await;
    let store = store_for(base_url);

    let found = store
        .fetch(&LeadId::from("lead-1"))
        .await
        .expect("fetch")
        .expect("present");
    assert_eq!(found.record["email"], json!("a@b.cz"));

    let missing = store.fetch(&LeadId::from("other")).await.expect("fetch");
    assert!(missing.is_none());
}
