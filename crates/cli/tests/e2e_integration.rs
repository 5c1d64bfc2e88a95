//! End-to-end integration tests for Rigsmith.
//!
//! These tests exercise the full pipeline from CSV files on disk to API
//! responses: catalog loading, optimization, validation, chat dispatch and
//! snapshot persistence.

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use rigsmith_chat::{ChatDispatcher, ChatMode, ChatRequest, ResponseKind, UnconfiguredAnswerer};
use rigsmith_core::error::ChatError;
use rigsmith_core::{
    Answer, Answerer, Build, BuildStore, Catalog, Category, Preferences, Usage,
};
use rigsmith_engine::BuildService;
use rigsmith_gateway::{ApiState, build_router};
use rigsmith_store::FileBuildStore;

// ── Fixtures ─────────────────────────────────────────────────────────────

const TABLES: &[(&str, &str)] = &[
    (
        "cpu.csv",
        "name,price,socket,core_count\n\
         Ryzen 5 7600,199,AM5,6\n\
         Core i5-13400F,179,LGA1700,10\n\
         Ryzen 7 7800X3D,449,AM5,8\n",
    ),
    (
        "motherboard.csv",
        "name,price,socket,memory_type,form_factor\n\
         MSI B650 Tomahawk,179,AM5,DDR5,ATX\n\
         ASUS Prime B760M,119,LGA1700,DDR4,Micro ATX\n",
    ),
    (
        "memory.csv",
        "name,price,type,speed\n\
         Corsair Vengeance 32GB,94,DDR5,6000\n\
         Kingston Fury 16GB,45,DDR4,3200\n",
    ),
    (
        "video-card.csv",
        "name,price,chipset\n\
         RX 7600,269,Radeon RX 7600\n\
         RTX 4070 Super,599,GeForce RTX 4070 Super\n",
    ),
    (
        "power-supply.csv",
        "name,price,wattage\n\
         Corsair RM750e,99,750\n\
         EVGA 600 BR,49,600\n",
    ),
    (
        "case.csv",
        "name,price,type\n\
         Fractal Pop Air,79,ATX Mid Tower\n\
         Cooler Master Q300L,35,MicroATX Mini Tower\n",
    ),
    (
        "internal-hard-drive.csv",
        "name,price,capacity\n\
         Samsung 980 1TB,69,1000\n\
         Crucial P3 2TB,119,2000\n",
    ),
    (
        "cpu-cooler.csv",
        "name,price\n\
         Thermalright Peerless Assassin,35\n\
         Cooler Master Hyper 212,25\n",
    ),
];

fn write_catalog(dir: &Path) {
    for (file, content) in TABLES {
        std::fs::write(dir.join(file), content).unwrap();
    }
}

fn load_catalog() -> (tempfile::TempDir, Arc<Catalog>) {
    let dir = tempfile::tempdir().unwrap();
    write_catalog(dir.path());
    let catalog = rigsmith_catalog::load_dir(dir.path()).unwrap();
    (dir, Arc::new(catalog))
}

fn names(build: &Build) -> Vec<(String, String)> {
    build
        .iter()
        .map(|(category, component)| (category.to_string(), component.name.clone()))
        .collect()
}

/// An answerer that always suggests the same build.
struct SuggestingAnswerer(Build);

#[async_trait::async_trait]
impl Answerer for SuggestingAnswerer {
    fn name(&self) -> &str {
        "suggesting"
    }

    async fn answer(&self, _question: &str, _session_id: &str) -> Result<Answer, ChatError> {
        Ok(Answer::Build(self.0.summary()))
    }
}

// ── Catalog → optimizer → validator ──────────────────────────────────────

#[test]
fn catalog_files_map_to_known_categories() {
    let (_dir, catalog) = load_catalog();
    assert_eq!(catalog.len(), 8);
    assert!(catalog.contains(&Category::Storage));
    assert!(catalog.contains(&Category::Cooler));
    assert_eq!(catalog.component_count(), 17);

    let memory = catalog.find(&Category::Memory, "Kingston Fury 16GB").unwrap();
    assert_eq!(memory.memory_type.as_deref(), Some("DDR4"));
}

#[test]
fn general_build_fills_every_category() {
    let (_dir, catalog) = load_catalog();
    let service = BuildService::new(catalog);

    let result = service.optimize(1300.0, &Preferences::new(Usage::General));
    assert_eq!(result.build.len(), 8);
    assert_eq!(result.build.total_price(), 969.0);
    assert!(result.build.total_price() <= 1300.0);
    assert!(result.compatibility_issues.is_empty());
    assert_eq!(
        result.build.get(&Category::Cpu).unwrap().name,
        "Ryzen 5 7600"
    );
}

#[test]
fn usage_changes_the_split() {
    let (_dir, catalog) = load_catalog();
    let service = BuildService::new(catalog);

    let gaming = service.optimize(2000.0, &Preferences::new(Usage::Gaming));
    assert_eq!(gaming.build.get(&Category::VideoCard).unwrap().name, "RTX 4070 Super");
    assert_eq!(gaming.build.get(&Category::Cpu).unwrap().name, "Ryzen 5 7600");
    assert_eq!(gaming.build.total_price(), 1359.0);

    let workstation = service.optimize(2000.0, &Preferences::new(Usage::Workstation));
    assert_eq!(
        workstation.build.get(&Category::Cpu).unwrap().name,
        "Ryzen 7 7800X3D"
    );
    assert_ne!(names(&gaming.build), names(&workstation.build));
}

#[test]
fn small_budget_yields_partial_build() {
    let (_dir, catalog) = load_catalog();
    let service = BuildService::new(catalog);

    let result = service.optimize(600.0, &Preferences::default());
    assert_eq!(names(&result.build), vec![("memory".to_string(), "Kingston Fury 16GB".to_string())]);
    assert_eq!(result.unspent, 555.0);
}

#[test]
fn hand_built_incompatible_build_reports_both_rules() {
    let (_dir, catalog) = load_catalog();
    let service = BuildService::new(catalog.clone());

    let mut build = Build::new();
    for (category, name) in [
        (Category::Cpu, "Core i5-13400F"),
        (Category::Motherboard, "MSI B650 Tomahawk"),
        (Category::Memory, "Kingston Fury 16GB"),
    ] {
        let component = catalog.find(&category, name).unwrap().clone();
        build.add_or_replace(category, component);
    }

    let issues = service.check(&build);
    assert_eq!(issues.len(), 2);
    assert!(issues[0].description.starts_with("Socket mismatch"));
    assert!(issues[1].description.starts_with("Memory type mismatch"));
}

// ── Chat ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn chat_build_mode_runs_the_optimizer() {
    let (_dir, catalog) = load_catalog();
    let service = Arc::new(BuildService::new(catalog));
    let chat = ChatDispatcher::new(service, Arc::new(UnconfiguredAnswerer), 1300.0);

    let response = chat
        .handle(ChatRequest::new("I have 2000$ for a new rig", ChatMode::Build))
        .await
        .unwrap();
    let data = response.data.unwrap();
    assert_eq!(response.kind, ResponseKind::Build);
    assert_eq!(data.requested_budget, Some(2000.0));
    assert_eq!(data.components.len(), 8);
}

#[tokio::test]
async fn chat_suggested_build_is_validated() {
    let (_dir, catalog) = load_catalog();
    let mut suggestion = Build::new();
    suggestion.add_or_replace(
        Category::Cpu,
        catalog.find(&Category::Cpu, "Core i5-13400F").unwrap().clone(),
    );
    suggestion.add_or_replace(
        Category::Motherboard,
        catalog.find(&Category::Motherboard, "MSI B650 Tomahawk").unwrap().clone(),
    );

    let service = Arc::new(BuildService::new(catalog));
    let chat = ChatDispatcher::new(service, Arc::new(SuggestingAnswerer(suggestion)), 1300.0);

    let response = chat
        .handle(ChatRequest::new("What should I buy?", ChatMode::Discuss))
        .await
        .unwrap();
    let data = response.data.unwrap();
    assert_eq!(data.total_price, 358.0);
    assert_eq!(data.compatibility_issues.len(), 1);
}

// ── Gateway + file snapshots ─────────────────────────────────────────────

async fn send(app: axum::Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn api_optimize_then_snapshot_survives_restart() {
    let (_catalog_dir, catalog) = load_catalog();
    let snapshot_dir = tempfile::tempdir().unwrap();
    let origins = vec!["http://localhost:5173".to_string()];

    let service = Arc::new(BuildService::new(catalog));
    let store: Arc<dyn BuildStore> = Arc::new(FileBuildStore::new(snapshot_dir.path().to_path_buf()));
    let chat = ChatDispatcher::new(service.clone(), Arc::new(UnconfiguredAnswerer), 1300.0);
    let state = Arc::new(ApiState::new(service.clone(), store, chat));

    let (status, optimized) = send(
        build_router(state.clone(), &origins),
        post_json(
            "/api/builds/optimize",
            serde_json::json!({"budget": 1300, "usage": "general", "priorities": ["storage"]}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(optimized["total_price"], 969.0);
    assert_eq!(optimized["components"].as_array().unwrap().len(), 8);

    // Save the optimized build in the wire shape a client would send back.
    let mut components = serde_json::Map::new();
    for item in optimized["components"].as_array().unwrap() {
        let mut component = item["specs"].clone();
        component["name"] = item["name"].clone();
        component["price"] = item["price"].clone();
        components.insert(item["type"].as_str().unwrap().to_string(), component);
    }
    let (status, saved) = send(
        build_router(state.clone(), &origins),
        post_json("/api/builds/snapshots", serde_json::json!({"components": components})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = saved["id"].as_str().unwrap().to_string();

    // A fresh store over the same directory sees the snapshot.
    let reopened = FileBuildStore::new(snapshot_dir.path().to_path_buf());
    let snapshot = reopened.load(&id).await.unwrap().unwrap();
    assert_eq!(snapshot.build.total_price(), 969.0);
    assert_eq!(
        snapshot.build.get(&Category::Motherboard).unwrap().memory_type.as_deref(),
        Some("DDR5")
    );

    let (status, listed) = send(
        build_router(state, &origins),
        Request::builder()
            .uri("/api/builds/snapshots")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["count"], 1);
}
