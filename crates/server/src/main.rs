use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderValue, Method, StatusCode},
    middleware::map_response,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use clap::Parser;
use server_api::{create_lead, get_lead, health, parse_lead_request, ApiContext};
use shared::{
    domain::LeadId,
    error::{ApiError, ErrorBody, ErrorCode},
    protocol::{health_route, leads_route, HealthReport, LeadCreated, LeadEnvelope},
};
use storage::{LeadStore, MemoryLeadStore, RestLeadStore};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;

use app_state::AppState;
use config::load_settings;

#[derive(Debug, Parser)]
#[command(name = "server", about = "Lead intake service")]
struct Args {
    /// Settings file; missing files fall back to defaults.
    #[arg(long, default_value = "server.toml")]
    config: PathBuf,
    /// Keep leads in process memory instead of the configured store.
    #[arg(long)]
    memory_store: bool,
}

type HttpError = (StatusCode, Json<ErrorBody>);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let settings = load_settings(&args.config);

    let store: Option<Arc<dyn LeadStore>> = if args.memory_store {
        info!("using in-memory lead store");
        Some(Arc::new(MemoryLeadStore::new()))
    } else {
        match settings.store_config()? {
            Some(store_config) => {
                info!(base_url = %store_config.base_url, table = %store_config.table, "using rest lead store");
                Some(Arc::new(RestLeadStore::new(store_config)))
            }
            None => {
                warn!("STORE_URL or STORE_SERVICE_KEY unset; lead writes will fail");
                None
            }
        }
    };

    let state = AppState {
        api: ApiContext { store },
        cors_origins: settings.cors_origins.clone(),
        max_body_bytes: settings.max_body_bytes,
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.cors_origins);
    let max_body_bytes = state.max_body_bytes;

    Router::new()
        .route(leads_route(), post(http_create_lead))
        .route("/api/leads/:id", get(http_get_lead))
        .route(health_route(), get(http_health))
        .layer(cors)
        .route("/healthz", get(healthz))
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(map_response(json_payload_too_large))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);
    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid cors origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}

fn error_response(err: ApiError) -> HttpError {
    let status = match err.code {
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Upstream => err
            .upstream_status
            .and_then(|status| StatusCode::from_u16(status).ok())
            .unwrap_or(StatusCode::BAD_GATEWAY),
        ErrorCode::Configuration | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorBody::from(&err)))
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_health() -> Json<HealthReport> {
    Json(health())
}

async fn http_create_lead(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<LeadCreated>, HttpError> {
    let request = parse_lead_request(&body).map_err(error_response)?;
    let created = create_lead(&state.api, request)
        .await
        .map_err(error_response)?;
    Ok(Json(created))
}

async fn http_get_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<LeadEnvelope>, HttpError> {
    let envelope = get_lead(&state.api, &LeadId(id))
        .await
        .map_err(error_response)?;
    Ok(Json(envelope))
}

async fn not_found() -> HttpError {
    error_response(ApiError::new(ErrorCode::NotFound, "Endpoint not found"))
}

/// The body limit answers in plain text; rewrite it to the JSON error shape.
async fn json_payload_too_large(response: Response) -> Response {
    if response.status() != StatusCode::PAYLOAD_TOO_LARGE {
        return response;
    }
    let err = ApiError::new(ErrorCode::Validation, "Request body too large");
    (StatusCode::PAYLOAD_TOO_LARGE, Json(ErrorBody::from(&err))).into_response()
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
