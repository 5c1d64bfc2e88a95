//! HTTP API gateway for Rigsmith.
//!
//! Exposes the health check plus the catalog, build, snapshot and chat API
//! (see [`api`]). The catalog is loaded once at startup and shared
//! read-only by every request.
//!
//! Built on Axum for high performance async HTTP.

pub mod api;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, header};
use axum::{Router, extract::State, response::Json, routing::get};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

use rigsmith_chat::{ChatDispatcher, UnconfiguredAnswerer};
use rigsmith_config::{AppConfig, StoreConfig};
use rigsmith_core::BuildStore;
use rigsmith_engine::BuildService;
use rigsmith_store::{FileBuildStore, InMemoryBuildStore};

pub use api::{ApiState, SharedApiState, api_router};

/// Request body limit for every route.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Build the full router: health, API, CORS, body limit and trace layers.
///
/// Origins that are not valid header values are skipped with a warning.
pub fn build_router(state: SharedApiState, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/health", get(health_handler))
        .with_state(state.clone())
        .merge(api_router(state))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Pick the snapshot backend named in the config.
pub fn build_store(config: &StoreConfig) -> Arc<dyn BuildStore> {
    match config.backend.as_str() {
        "memory" => Arc::new(InMemoryBuildStore::new()),
        _ => Arc::new(FileBuildStore::new(config.resolved_snapshot_dir())),
    }
}

/// Start the gateway HTTP server.
///
/// Loads the catalog from `catalog.csv_dir` once; a missing directory is a
/// startup error.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let catalog = rigsmith_catalog::load_dir(&config.catalog.csv_dir)?;
    let service = Arc::new(BuildService::new(Arc::new(catalog)));
    let store = build_store(&config.store);
    let chat = ChatDispatcher::new(
        service.clone(),
        Arc::new(UnconfiguredAnswerer),
        config.chat.default_budget,
    );

    info!(
        store = store.name(),
        answerer = chat.answerer_name(),
        "Subsystems ready"
    );

    let state = Arc::new(ApiState::new(service, store, chat));
    let app = build_router(state, &config.gateway.allowed_origins);

    info!(addr = %addr, "Gateway listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    categories: usize,
    components: usize,
    uptime_secs: i64,
}

async fn health_handler(State(state): State<SharedApiState>) -> Json<HealthResponse> {
    let catalog = state.service.catalog();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        categories: catalog.len(),
        components: catalog.component_count(),
        uptime_secs: (chrono::Utc::now() - state.start_time).num_seconds(),
    })
}
