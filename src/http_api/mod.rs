use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::{
    AllocationWarning, GenerationSummary, HEADER, Row, ScheduleConfig, Scheme, SchemeError,
    SchemeMetadata, Topic, allocator, render,
};

#[derive(Clone)]
pub struct AppState {
    scheme: Arc<RwLock<Scheme>>,
}

impl AppState {
    pub fn new(scheme: Scheme) -> Self {
        Self {
            scheme: Arc::new(RwLock::new(scheme)),
        }
    }

    pub fn with_shared(scheme: Arc<RwLock<Scheme>>) -> Self {
        Self { scheme }
    }

    fn scheme(&self) -> Arc<RwLock<Scheme>> {
        self.scheme.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    Invalid(String),
    NotFound(String),
    Internal(String),
}

impl From<SchemeError> for ApiError {
    fn from(value: SchemeError) -> Self {
        ApiError::Invalid(value.to_string())
    }
}

impl From<render::RenderError> for ApiError {
    fn from(value: render::RenderError) -> Self {
        ApiError::Internal(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::NotFound(message) => {
                let body = Json(ErrorBody {
                    error: "not_found",
                    message,
                });
                (StatusCode::NOT_FOUND, body).into_response()
            }
            ApiError::Internal(message) => {
                let body = Json(ErrorBody {
                    error: "internal_error",
                    message,
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SchemeResponse {
    pub header: Vec<String>,
    pub rows: Vec<Row>,
    pub warnings: Vec<AllocationWarning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<GenerationSummary>,
}

impl SchemeResponse {
    fn new(
        rows: Vec<Row>,
        warnings: Vec<AllocationWarning>,
        summary: Option<GenerationSummary>,
    ) -> Self {
        Self {
            header: HEADER.iter().map(|h| h.to_string()).collect(),
            rows,
            warnings,
            summary,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AllocatePayload {
    topics: Vec<Topic>,
    #[serde(default)]
    config: Option<ScheduleConfig>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/config", get(get_config).put(update_config))
        .route("/metadata", get(get_metadata).put(update_metadata))
        .route("/topics", get(list_topics).put(replace_topics))
        .route("/scheme", post(generate_scheme))
        .route("/scheme.csv", get(export_scheme_csv))
        .route("/allocate", post(allocate_topics))
        .fallback(not_found)
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, scheme: Scheme) -> std::io::Result<()> {
    let state = AppState::new(scheme);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "scheme-tool HTTP API listening");
    axum::serve(listener, app).await
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("no route for {uri}"))
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn get_config(State(state): State<AppState>) -> Json<ScheduleConfig> {
    let scheme = state.scheme();
    let config = {
        let guard = scheme.read();
        guard.config().clone()
    };
    Json(config)
}

async fn update_config(
    State(state): State<AppState>,
    Json(config): Json<ScheduleConfig>,
) -> Result<Json<ScheduleConfig>, ApiError> {
    let scheme = state.scheme();
    {
        let mut guard = scheme.write();
        guard.set_config(config)?;
    }
    let current = {
        let guard = scheme.read();
        guard.config().clone()
    };
    Ok(Json(current))
}

async fn get_metadata(State(state): State<AppState>) -> Json<SchemeMetadata> {
    let scheme = state.scheme();
    let metadata = {
        let guard = scheme.read();
        guard.metadata().clone()
    };
    Json(metadata)
}

async fn update_metadata(
    State(state): State<AppState>,
    Json(metadata): Json<SchemeMetadata>,
) -> Json<SchemeMetadata> {
    let scheme = state.scheme();
    {
        let mut guard = scheme.write();
        guard.set_metadata(metadata.clone());
    }
    Json(metadata)
}

async fn list_topics(State(state): State<AppState>) -> Json<Vec<Topic>> {
    let scheme = state.scheme();
    let topics = {
        let guard = scheme.read();
        guard.topics().to_vec()
    };
    Json(topics)
}

async fn replace_topics(
    State(state): State<AppState>,
    Json(topics): Json<Vec<Topic>>,
) -> Json<Vec<Topic>> {
    let scheme = state.scheme();
    {
        let mut guard = scheme.write();
        guard.set_topics(topics.clone());
    }
    Json(topics)
}

async fn generate_scheme(State(state): State<AppState>) -> Result<Json<SchemeResponse>, ApiError> {
    let scheme = state.scheme();
    let response = {
        let mut guard = scheme.write();
        let summary = guard.generate()?;
        let allocation = guard
            .allocation()
            .ok_or_else(|| ApiError::Internal("allocation missing after generation".into()))?;
        SchemeResponse::new(
            allocation.rows.clone(),
            allocation.warnings.clone(),
            Some(summary),
        )
    };
    Ok(Json(response))
}

async fn export_scheme_csv(State(state): State<AppState>) -> Result<Response, ApiError> {
    let scheme = state.scheme();
    let body = {
        let mut guard = scheme.write();
        guard.generate()?;
        let mut buffer = Vec::new();
        render::write_rows_csv(&mut buffer, guard.rows())?;
        buffer
    };
    Ok(([(header::CONTENT_TYPE, "text/csv")], body).into_response())
}

async fn allocate_topics(
    Json(payload): Json<AllocatePayload>,
) -> Result<Json<SchemeResponse>, ApiError> {
    let config = payload.config.unwrap_or_default();
    let allocation = allocator::allocate(&payload.topics, &config)?;
    Ok(Json(SchemeResponse::new(
        allocation.rows,
        allocation.warnings,
        None,
    )))
}
