//! HTTP API: catalog browsing, build optimization, snapshots and chat.
//!
//! Endpoints:
//!
//! - `GET    /api/components/types`         — Known catalog categories
//! - `GET    /api/components/{type}`        — Components in a category (price filters)
//! - `POST   /api/builds/optimize`          — Budget-constrained build + issues
//! - `POST   /api/builds/check`             — Compatibility check of a given build
//! - `POST   /api/builds/snapshots`         — Save a build
//! - `GET    /api/builds/snapshots`         — List saved builds, newest first
//! - `GET    /api/builds/snapshots/{id}`    — Load a saved build
//! - `DELETE /api/builds/snapshots/{id}`    — Delete a saved build
//! - `POST   /api/chat/message`             — Discussion or build-from-text chat

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use rigsmith_chat::{ChatDispatcher, ChatRequest, ChatResponse};
use rigsmith_core::error::{ChatError, StoreError};
use rigsmith_core::{
    Build, BuildItem, BuildStore, Category, CompatibilityIssue, ComponentFilter, Preferences,
    SnapshotMeta, Usage,
};
use rigsmith_engine::BuildService;

// ── State ─────────────────────────────────────────────────────────────────

/// Shared state for the API.
pub struct ApiState {
    pub service: Arc<BuildService>,
    pub store: Arc<dyn BuildStore>,
    pub chat: ChatDispatcher,
    pub start_time: chrono::DateTime<chrono::Utc>,
}

impl ApiState {
    pub fn new(service: Arc<BuildService>, store: Arc<dyn BuildStore>, chat: ChatDispatcher) -> Self {
        Self {
            service,
            store,
            chat,
            start_time: chrono::Utc::now(),
        }
    }
}

pub type SharedApiState = Arc<ApiState>;

// ── Router ────────────────────────────────────────────────────────────────

/// Build the API router. Nest or merge this into the main router.
pub fn api_router(state: SharedApiState) -> Router {
    Router::new()
        .route("/api/components/types", get(component_types_handler))
        .route("/api/components/{category}", get(list_components_handler))
        .route("/api/builds/optimize", post(optimize_handler))
        .route("/api/builds/check", post(check_handler))
        .route(
            "/api/builds/snapshots",
            get(list_snapshots_handler).post(save_snapshot_handler),
        )
        .route(
            "/api/builds/snapshots/{id}",
            get(get_snapshot_handler).delete(delete_snapshot_handler),
        )
        .route("/api/chat/message", post(chat_handler))
        .with_state(state)
}

// ── Types ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn store_error(e: StoreError) -> ApiError {
    match e {
        StoreError::InvalidId(_) => api_error(StatusCode::BAD_REQUEST, e.to_string()),
        other => {
            warn!(error = %other, "Snapshot store failure");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
        }
    }
}

#[derive(Debug, Deserialize)]
struct PriceQuery {
    min_price: Option<f64>,
    max_price: Option<f64>,
}

/// `{budget, usage?, priorities?}`. Preferences are parsed separately so a
/// wrongly shaped preference is a 400, not a body-shape rejection.
#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    pub budget: f64,
    #[serde(flatten)]
    pub preferences: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OptimizeResponse {
    pub components: Vec<BuildItem>,
    pub total_price: f64,
    pub compatibility_issues: Vec<CompatibilityIssue>,
    pub requested_budget: f64,
    pub unspent: f64,
    pub usage: Usage,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResponse {
    pub compatible: bool,
    pub total_price: f64,
    pub compatibility_issues: Vec<CompatibilityIssue>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SavedResponse {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SnapshotListResponse {
    pub snapshots: Vec<SnapshotMeta>,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub components: Vec<BuildItem>,
    pub total_price: f64,
    pub compatibility_issues: Vec<CompatibilityIssue>,
}

// ── Catalog ───────────────────────────────────────────────────────────────

async fn component_types_handler(State(state): State<SharedApiState>) -> Json<Vec<Category>> {
    Json(state.service.catalog().categories().to_vec())
}

async fn list_components_handler(
    State(state): State<SharedApiState>,
    Path(category): Path<String>,
    Query(query): Query<PriceQuery>,
) -> Result<Json<Vec<BuildItem>>, ApiError> {
    let category = Category::parse(&category);
    let catalog = state.service.catalog();
    if !catalog.contains(&category) {
        return Err(api_error(
            StatusCode::NOT_FOUND,
            format!("Component type '{category}' not found"),
        ));
    }

    let filter = ComponentFilter::price_range(query.min_price, query.max_price);
    let items = catalog
        .filter(&category, &filter)
        .into_iter()
        .map(|component| BuildItem::new(&category, component))
        .collect();
    Ok(Json(items))
}

// ── Builds ────────────────────────────────────────────────────────────────

async fn optimize_handler(
    State(state): State<SharedApiState>,
    Json(payload): Json<OptimizeRequest>,
) -> Result<Json<OptimizeResponse>, ApiError> {
    if !payload.budget.is_finite() {
        return Err(api_error(StatusCode::BAD_REQUEST, "budget must be a finite number"));
    }
    let preferences = Preferences::from_value(serde_json::Value::Object(payload.preferences))
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;

    info!(budget = payload.budget, usage = %preferences.usage, "Optimize request");
    let result = state.service.optimize(payload.budget, &preferences);

    Ok(Json(OptimizeResponse {
        components: result.build.items(),
        total_price: result.build.total_price(),
        compatibility_issues: result.compatibility_issues,
        requested_budget: result.requested_budget,
        unspent: result.unspent,
        usage: preferences.usage,
    }))
}

async fn check_handler(
    State(state): State<SharedApiState>,
    Json(build): Json<Build>,
) -> Json<CheckResponse> {
    let compatibility_issues = state.service.check(&build);
    Json(CheckResponse {
        compatible: compatibility_issues.is_empty(),
        total_price: build.total_price(),
        compatibility_issues,
    })
}

// ── Snapshots ─────────────────────────────────────────────────────────────

async fn save_snapshot_handler(
    State(state): State<SharedApiState>,
    Json(build): Json<Build>,
) -> Result<(StatusCode, Json<SavedResponse>), ApiError> {
    let id = state.store.save(build).await.map_err(store_error)?;
    info!(id = %id, backend = state.store.name(), "Build snapshot saved");
    Ok((StatusCode::CREATED, Json(SavedResponse { id })))
}

async fn list_snapshots_handler(
    State(state): State<SharedApiState>,
) -> Result<Json<SnapshotListResponse>, ApiError> {
    let snapshots = state.store.list().await.map_err(store_error)?;
    let count = snapshots.len();
    Ok(Json(SnapshotListResponse { snapshots, count }))
}

async fn get_snapshot_handler(
    State(state): State<SharedApiState>,
    Path(id): Path<String>,
) -> Result<Json<SnapshotResponse>, ApiError> {
    let snapshot = state
        .store
        .load(&id)
        .await
        .map_err(store_error)?
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("Snapshot '{id}' not found")))?;

    Ok(Json(SnapshotResponse {
        compatibility_issues: state.service.check(&snapshot.build),
        components: snapshot.build.items(),
        total_price: snapshot.build.total_price(),
        id: snapshot.id,
        created_at: snapshot.created_at,
    }))
}

async fn delete_snapshot_handler(
    State(state): State<SharedApiState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete(&id).await.map_err(store_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(api_error(StatusCode::NOT_FOUND, format!("Snapshot '{id}' not found")))
    }
}

// ── Chat ──────────────────────────────────────────────────────────────────

async fn chat_handler(
    State(state): State<SharedApiState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    match state.chat.handle(payload).await {
        Ok(response) => Ok(Json(response)),
        Err(e @ ChatError::EmptyMessage) => Err(api_error(StatusCode::BAD_REQUEST, e.to_string())),
        Err(e) => {
            warn!(error = %e, answerer = state.chat.answerer_name(), "Chat failed");
            Err(api_error(StatusCode::BAD_GATEWAY, e.to_string()))
        }
    }
}
