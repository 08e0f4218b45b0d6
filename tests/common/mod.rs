//! Backend falso de WasteTrack para los tests de integración

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use wastetrack_monitor::config::EnvironmentConfig;
use wastetrack_monitor::models::{GenerateSimulationRequest, Simulation};

#[derive(Default)]
pub struct FakeBackend {
    pub simulations: Mutex<Vec<Simulation>>,
    pub fail_generation: AtomicBool,
    pub generation_calls: AtomicUsize,
    pub simulation_fetches: AtomicUsize,
    pub reports: Mutex<Vec<(String, Value)>>,
    pub auth_headers: Mutex<Vec<String>>,
    pub container_writes: Mutex<Vec<(&'static str, String, Value)>>,
    pub signups: Mutex<Vec<Value>>,
}

impl FakeBackend {
    pub fn with_simulations(ids: &[i64]) -> Arc<Self> {
        let backend = Arc::new(Self::default());
        backend.push_simulations(ids);
        backend
    }

    pub fn push_simulations(&self, ids: &[i64]) {
        let mut sims = self.simulations.lock().unwrap();
        sims.extend(ids.iter().map(|id| simulation(*id, vec!["c-1".to_string()])));
    }

    pub fn fetches(&self) -> usize {
        self.simulation_fetches.load(Ordering::SeqCst)
    }
}

pub fn simulation(id: i64, route: Vec<String>) -> Simulation {
    Simulation {
        id,
        created_at: "2025-06-15T08:00:00".to_string(),
        total_distance_km: 4.5 * id as f64,
        duration_min: 18.0,
        route,
        distances: "[1.5, 3.0]".to_string(),
    }
}

async fn list_simulations(State(backend): State<Arc<FakeBackend>>) -> Json<Vec<Simulation>> {
    backend.simulation_fetches.fetch_add(1, Ordering::SeqCst);
    Json(backend.simulations.lock().unwrap().clone())
}

async fn generate_simulation(
    State(backend): State<Arc<FakeBackend>>,
    Json(request): Json<GenerateSimulationRequest>,
) -> Result<Json<Simulation>, (StatusCode, Json<Value>)> {
    backend.generation_calls.fetch_add(1, Ordering::SeqCst);
    if backend.fail_generation.load(Ordering::SeqCst) {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "solver crashed" })),
        ));
    }

    let mut sims = backend.simulations.lock().unwrap();
    let id = sims.iter().map(|s| s.id).max().unwrap_or(0) + 1;
    let created = simulation(id, request.container_guids);
    sims.push(created.clone());
    Ok(Json(created))
}

async fn list_containers() -> Json<Value> {
    Json(json!([
        { "guid": "c-1", "capacity": 95, "status": "active", "name": "Av. Arequipa",
          "isFavorite": false, "limit": 80, "latitude": "-12.068", "longitude": "-77.043" },
        { "guid": "c-2", "capacity": 62, "status": "active", "name": "Parque Kennedy",
          "isFavorite": true, "limit": 80, "latitude": -12.121, "longitude": -77.030 },
        { "guid": "c-3", "capacity": 99, "status": "inactive", "name": "Jr. de la Unión",
          "isFavorite": false, "limit": null, "latitude": -12.046, "longitude": -77.031 }
    ]))
}

fn container_from(guid: &str, body: &Value) -> Value {
    json!({
        "guid": guid,
        "capacity": body["capacity"],
        "status": body["status"],
        "name": body["name"],
        "isFavorite": false,
        "limit": body["limit"],
        "latitude": body["latitude"],
        "longitude": body["longitude"]
    })
}

fn container_not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "detail": "Container not found" })),
    )
}

async fn get_container(Path(guid): Path<String>) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if guid == "missing" {
        return Err(container_not_found());
    }
    Ok(Json(json!({
        "guid": guid, "capacity": 40, "status": "inactive", "name": "Plaza San Martín",
        "isFavorite": true, "limit": 70, "latitude": "-12.051", "longitude": "-77.034"
    })))
}

async fn create_container(
    State(backend): State<Arc<FakeBackend>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    backend
        .container_writes
        .lock()
        .unwrap()
        .push(("POST", String::new(), body.clone()));
    Json(container_from("c-new", &body))
}

async fn update_container(
    State(backend): State<Arc<FakeBackend>>,
    Path(guid): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if guid == "missing" {
        return Err(container_not_found());
    }
    backend
        .container_writes
        .lock()
        .unwrap()
        .push(("PUT", guid.clone(), body.clone()));
    Ok(Json(container_from(&guid, &body)))
}

async fn delete_container(
    State(backend): State<Arc<FakeBackend>>,
    Path(guid): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    if guid == "missing" {
        return Err(container_not_found());
    }
    backend
        .container_writes
        .lock()
        .unwrap()
        .push(("DELETE", guid, Value::Null));
    Ok(StatusCode::NO_CONTENT)
}

async fn report_container(
    State(backend): State<Arc<FakeBackend>>,
    Path(guid): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if guid == "missing" {
        return Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Container not found" })),
        ));
    }

    if let Some(auth) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        backend.auth_headers.lock().unwrap().push(auth.to_string());
    }
    backend.reports.lock().unwrap().push((guid.clone(), body.clone()));

    Ok(Json(json!({
        "guid": "r-100",
        "container_guid": guid,
        "reason": body["reason"],
        "status": "pending"
    })))
}

fn report(guid: &str, status: &str) -> Value {
    json!({
        "guid": guid,
        "container_guid": "c-1",
        "reason": "Tapa rota",
        "status": status,
        "reported_at": "2025-06-15T09:00:00",
        "reported_by_guid": "u-1"
    })
}

async fn list_reports() -> Json<Value> {
    Json(json!([report("r-1", "pending"), report("r-2", "resolved")]))
}

async fn resolve_report(Path(guid): Path<String>) -> Json<Value> {
    Json(report(&guid, "resolved"))
}

async fn signin(Json(body): Json<Value>) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if body["password"] == "secreto" {
        Ok(Json(json!({ "access_token": "tok-123", "role": "Citizen" })))
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Credenciales inválidas" })),
        ))
    }
}

async fn signup(
    State(backend): State<Arc<FakeBackend>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if body["email"] == "ana@wastetrack.pe" {
        return Err((
            StatusCode::CONFLICT,
            Json(json!({ "message": "Email ya registrado" })),
        ));
    }
    backend.signups.lock().unwrap().push(body);
    Ok(Json(json!({ "message": "Usuario registrado" })))
}

async fn geocode(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    match params.get("latlng").map(String::as_str) {
        Some("0,0") => Json(json!({ "status": "ZERO_RESULTS", "results": [] })),
        Some("1,1") => Json(json!({ "status": "OVER_QUERY_LIMIT", "results": [] })),
        Some("2,2") => Json(json!({ "status": "OK", "results": [] })),
        Some(_) => Json(json!({
            "status": "OK",
            "results": [{ "formatted_address": "Av. Arequipa 123, Lima" }]
        })),
        None => Json(json!({ "status": "INVALID_REQUEST" })),
    }
}

/// Levanta el backend falso en un puerto efímero y devuelve su URL base
pub async fn spawn_backend(backend: Arc<FakeBackend>) -> String {
    let app = Router::new()
        .route("/simulation/get-all-simulations", get(list_simulations))
        .route("/simulation/generate-simulation", post(generate_simulation))
        .route("/containers", get(list_containers).post(create_container))
        .route(
            "/containers/:guid",
            get(get_container).put(update_container).delete(delete_container),
        )
        .route("/containers/:guid/report", post(report_container))
        .route("/api/v1/reports/all", get(list_reports))
        .route("/api/v1/reports/:guid/resolve", put(resolve_report))
        .route("/auth/signin", post(signin))
        .route("/auth/signup", post(signup))
        .route("/geocode", get(geocode))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

pub fn test_config(backend_url: &str) -> EnvironmentConfig {
    let mut config = EnvironmentConfig::new(backend_url);
    config.route_poll_interval = Duration::from_millis(40);
    config.container_poll_interval = Duration::from_millis(40);
    config.http_timeout = Duration::from_secs(2);
    config
}

/// Espera hasta que la condición se cumpla (máximo 3 segundos)
pub async fn eventually(condition: impl Fn() -> bool) -> bool {
    for _ in 0..300 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}
