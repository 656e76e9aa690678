//! HTTP API for parts (Axum).
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`    | `{prefix}/parts/{id}` | Read a part by id |
//! | `POST`   | `{prefix}/parts/create/` | Create a part |
//! | `PUT`    | `{prefix}/parts/update/{id}` | Partially update a part |
//! | `DELETE` | `{prefix}/parts/delete/{id}` | Delete a part |
//! | `GET`    | `{prefix}/parts/list/?skip=&limit=` | List parts (default skip=0, limit=10) |
//! | `GET`    | `{prefix}/parts/most_common_words/` | Five most common description words |
//! | `GET`    | `/` | Redirect to `/docs` |
//! | `GET`    | `/docs` | JSON API index |
//! | `GET`    | `/health` | Health check (returns version) |
//!
//! `{prefix}` is `server.api_prefix` (default `/api/v1`).
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "Weight must be non-negative." } }
//! ```
//!
//! Error codes: `bad_request` (400), `not_found` (404), `internal` (500).
//! Malformed JSON bodies, non-integer ids and bad query strings are rejected
//! by Axum's extractors before reaching a handler.

use anyhow::Context;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;
use crate::db;
use crate::error::Error;
use crate::migrate;
use crate::models::{NewPart, Part, PartUpdate, WordCount};
use crate::service::PartService;
use crate::store::SqliteStore;

const DEFAULT_LIMIT: u32 = 10;

/// Routes under `{prefix}/parts`, as listed by `GET /docs`.
const PART_ENDPOINTS: [(&str, &str, &str); 6] = [
    ("GET", "/{part_id}", "Read a part by ID"),
    ("POST", "/create/", "Create a new part"),
    ("PUT", "/update/{part_id}", "Update an existing part"),
    ("DELETE", "/delete/{part_id}", "Delete a part"),
    ("GET", "/list/", "List parts with optional pagination"),
    (
        "GET",
        "/most_common_words/",
        "Get 5 most common words in part descriptions",
    ),
];

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    service: PartService,
    config: Arc<Config>,
}

impl AppState {
    pub fn new(service: PartService, config: Arc<Config>) -> Self {
        Self { service, config }
    }
}

/// Starts the HTTP server.
///
/// Opens the database pool, applies migrations, binds `[server].bind` and
/// serves until Ctrl-C. The pool is closed after the server has drained.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let pool = db::connect(config).await?;
    migrate::run_migrations(&pool).await?;

    let service = PartService::new(Arc::new(SqliteStore::new(pool.clone())));
    let app = build_router(AppState::new(service, Arc::new(config.clone())))?;

    let bind_addr = &config.server.bind;
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    tracing::info!("{} listening on http://{}", config.server.title, bind_addr);
    for (method, path, _) in PART_ENDPOINTS {
        tracing::debug!("  {} {}/parts{}", method, config.server.api_prefix, path);
    }

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    db::close(&pool).await;
    tracing::info!("server stopped");
    served?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

/// Build the router with every endpoint and the CORS layer.
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let cors = cors_layer(&state.config.server.allowed_origins)?;
    let parts = format!("{}/parts", state.config.server.api_prefix);

    let app = Router::new()
        .route("/", get(handle_root))
        .route("/docs", get(handle_docs))
        .route("/health", get(handle_health))
        .route(&format!("{}/{{part_id}}", parts), get(handle_read))
        .route(&format!("{}/create/", parts), post(handle_create))
        .route(&format!("{}/update/{{part_id}}", parts), put(handle_update))
        .route(&format!("{}/delete/{{part_id}}", parts), delete(handle_delete))
        .route(&format!("{}/list/", parts), get(handle_list))
        .route(
            &format!("{}/most_common_words/", parts),
            get(handle_most_common_words),
        )
        .layer(cors)
        .with_state(state);

    Ok(app)
}

fn cors_layer(allowed_origins: &[String]) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_origins.iter().any(|o| o == "*") {
        return Ok(layer.allow_origin(Any));
    }

    let origins = allowed_origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o).with_context(|| format!("Invalid allowed origin: {}", o))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    /// Machine-readable error code (e.g., `"bad_request"`, `"not_found"`).
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl AppError {
    fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.to_string(),
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

/// The only place domain errors become status codes.
impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "not_found", err.to_string()),
            Error::Validation(message) => Self::new(StatusCode::BAD_REQUEST, "bad_request", message),
            Error::Internal(e) => {
                tracing::error!("internal error: {:#}", e);
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    format!("{:#}", e),
                )
            }
        }
    }
}

// ============ Parts ============

async fn handle_read(
    State(state): State<AppState>,
    Path(part_id): Path<i64>,
) -> Result<Json<Part>, AppError> {
    Ok(Json(state.service.get(part_id).await?))
}

async fn handle_create(
    State(state): State<AppState>,
    Json(part): Json<NewPart>,
) -> Result<Json<Part>, AppError> {
    Ok(Json(state.service.create(part).await?))
}

async fn handle_update(
    State(state): State<AppState>,
    Path(part_id): Path<i64>,
    Json(update): Json<PartUpdate>,
) -> Result<Json<Part>, AppError> {
    Ok(Json(state.service.update(part_id, update).await?))
}

async fn handle_delete(
    State(state): State<AppState>,
    Path(part_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    match state.service.delete(part_id).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(Error::Internal(e)) => Err(Error::Internal(e.context("Failed to delete part")).into()),
        Err(e) => Err(e.into()),
    }
}

#[derive(Debug, Deserialize)]
struct ListParams {
    #[serde(default)]
    skip: u32,
    #[serde(default = "default_limit")]
    limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

async fn handle_list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Part>>, AppError> {
    Ok(Json(state.service.list(params.skip, params.limit).await?))
}

async fn handle_most_common_words(
    State(state): State<AppState>,
) -> Result<Json<Vec<WordCount>>, AppError> {
    Ok(Json(state.service.most_common_words().await?))
}

// ============ Docs / health ============

async fn handle_root() -> Redirect {
    Redirect::temporary("/docs")
}

#[derive(Serialize)]
struct EndpointDoc {
    method: &'static str,
    path: String,
    summary: &'static str,
}

#[derive(Serialize)]
struct DocsResponse {
    title: String,
    version: String,
    endpoints: Vec<EndpointDoc>,
}

async fn handle_docs(State(state): State<AppState>) -> Json<DocsResponse> {
    let prefix = &state.config.server.api_prefix;
    let endpoints = PART_ENDPOINTS
        .iter()
        .map(|&(method, path, summary)| EndpointDoc {
            method,
            path: format!("{}/parts{}", prefix, path),
            summary,
        })
        .collect();

    Json(DocsResponse {
        title: state.config.server.title.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints,
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
