//! Fake Octopus REST server

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use octoform::http::client::{HttpClient, API_KEY_HEADER};
use octopus_client::{DeploymentProcess, ErrorResponse, Project};
use secrecy::SecretString;
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub const API_KEY: &str = "API-TESTKEY";

type Reply<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

#[derive(Default)]
pub struct ServerData {
    next_id: u32,
    pub projects: HashMap<String, Project>,
    pub processes: HashMap<String, DeploymentProcess>,
    pub reject_process_updates: bool,
}

pub type SharedData = Arc<Mutex<ServerData>>;

pub struct FakeServer {
    pub base_url: String,
    pub data: SharedData,
}

impl FakeServer {
    /// Bind to an ephemeral port and serve in the background
    pub async fn start() -> Self {
        let data = SharedData::default();
        let app = Router::new()
            .route("/api/projects", post(add_project))
            .route(
                "/api/projects/{id}",
                get(get_project).put(update_project).delete(delete_project),
            )
            .route(
                "/api/deploymentprocesses/{id}",
                get(get_process).put(update_process),
            )
            .with_state(data.clone())
            .layer(TraceLayer::new_for_http());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            data,
        }
    }

    pub fn client(&self) -> HttpClient {
        self.client_with_key(API_KEY)
    }

    pub fn client_with_key(&self, key: &str) -> HttpClient {
        HttpClient::new(
            &self.base_url,
            &SecretString::from(key.to_string()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    pub fn project(&self, id: &str) -> Option<Project> {
        self.data.lock().unwrap().projects.get(id).cloned()
    }

    pub fn process(&self, id: &str) -> Option<DeploymentProcess> {
        self.data.lock().unwrap().processes.get(id).cloned()
    }
}

fn failure(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error_message: message.to_string(),
            errors: Vec::new(),
        }),
    )
}

fn authorize(headers: &HeaderMap) -> Result<(), (StatusCode, Json<ErrorResponse>)> {
    match headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) {
        Some(API_KEY) => Ok(()),
        _ => Err(failure(
            StatusCode::UNAUTHORIZED,
            "You must be logged in to perform this action.",
        )),
    }
}

fn not_found(kind: &str, id: &str) -> (StatusCode, Json<ErrorResponse>) {
    failure(
        StatusCode::NOT_FOUND,
        &format!("The {} you requested was not found: {}", kind, id),
    )
}

async fn add_project(
    State(data): State<SharedData>,
    headers: HeaderMap,
    Json(mut project): Json<Project>,
) -> Reply<Project> {
    authorize(&headers)?;
    let mut data = data.lock().unwrap();

    if data.projects.values().any(|p| p.name == project.name) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error_message: "There was a problem with your request.".to_string(),
                errors: vec!["Name must be unique".to_string()],
            }),
        ));
    }

    data.next_id += 1;
    let id = format!("Projects-{}", data.next_id);
    let process_id = format!("deploymentprocess-{}", id);
    project.id = Some(id.clone());
    project.deployment_process_id = Some(process_id.clone());

    data.processes.insert(
        process_id.clone(),
        DeploymentProcess {
            id: Some(process_id),
            project_id: Some(id.clone()),
            version: Some(0),
            ..Default::default()
        },
    );
    data.projects.insert(id, project.clone());
    Ok(Json(project))
}

/// Like the real server, an empty description is returned as `null`
async fn get_project(
    State(data): State<SharedData>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Reply<Value> {
    authorize(&headers)?;
    let data = data.lock().unwrap();
    let project = data.projects.get(&id).ok_or_else(|| not_found("Project", &id))?;

    let mut body = serde_json::to_value(project).unwrap();
    if project.description.is_empty() {
        body["Description"] = Value::Null;
    }
    Ok(Json(body))
}

async fn update_project(
    State(data): State<SharedData>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(mut project): Json<Project>,
) -> Reply<Project> {
    authorize(&headers)?;
    let mut data = data.lock().unwrap();
    let existing = data.projects.get(&id).ok_or_else(|| not_found("Project", &id))?;

    project.id = Some(id.clone());
    project.deployment_process_id = existing.deployment_process_id.clone();
    data.projects.insert(id, project.clone());
    Ok(Json(project))
}

async fn delete_project(
    State(data): State<SharedData>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    authorize(&headers)?;
    let mut data = data.lock().unwrap();
    let project = data.projects.remove(&id).ok_or_else(|| not_found("Project", &id))?;
    if let Some(process_id) = project.deployment_process_id {
        data.processes.remove(&process_id);
    }
    Ok(StatusCode::OK)
}

async fn get_process(
    State(data): State<SharedData>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Reply<DeploymentProcess> {
    authorize(&headers)?;
    let data = data.lock().unwrap();
    data.processes
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("DeploymentProcess", &id))
}

async fn update_process(
    State(data): State<SharedData>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(mut process): Json<DeploymentProcess>,
) -> Reply<DeploymentProcess> {
    authorize(&headers)?;
    let mut data = data.lock().unwrap();
    if data.reject_process_updates {
        return Err(failure(StatusCode::BAD_REQUEST, "Step names must be unique"));
    }

    let existing = data
        .processes
        .get(&id)
        .ok_or_else(|| not_found("DeploymentProcess", &id))?;
    if existing.version != process.version {
        return Err(failure(StatusCode::CONFLICT, "The process has been modified"));
    }

    process.id = Some(id.clone());
    process.version = Some(process.version.unwrap_or_default() + 1);
    data.processes.insert(id, process.clone());
    Ok(Json(process))
}
