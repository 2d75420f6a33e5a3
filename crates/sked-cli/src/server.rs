//! HTTP API and static web front-end.
//!
//! ## Endpoints
//!
//! - `GET /api/nextdate?now=&date=&repeat=` - next occurrence as plain text
//! - `GET|POST|PUT|DELETE /api/task` - single task operations
//! - `GET /api/tasks` - upcoming tasks, `{"tasks": [...]}`
//! - `POST /api/task/done?id=` - mark a task done
//! - anything else - files from the configured web directory

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sked_core::clock::Clock;
use sked_core::date::CalendarDate;
use sked_core::error::CoreError;
use sked_core::models::{NewTaskData, Task, UpdateTaskData};
use sked_core::repository::SqliteRepository;
use sked_core::service::TaskService;
use sked_core::validation::parse_task_id;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Shared handler state.
pub struct AppState<C> {
    pub service: TaskService<SqliteRepository, C>,
    pub web_dir: Arc<PathBuf>,
    pub task_limit: u32,
}

impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            web_dir: Arc::clone(&self.web_dir),
            task_limit: self.task_limit,
        }
    }
}

pub fn router<C: Clock + 'static>(state: AppState<C>) -> Router {
    Router::new()
        .route("/api/nextdate", get(next_date::<C>))
        .route(
            "/api/task",
            get(get_task::<C>)
                .post(add_task::<C>)
                .put(update_task::<C>)
                .delete(delete_task::<C>),
        )
        .route("/api/tasks", get(list_tasks::<C>))
        .route("/api/task/done", post(done_task::<C>))
        .fallback(static_files::<C>)
        .with_state(state)
}

/// A running HTTP server.
///
/// Dropping it aborts the background task; `shutdown` lets in-flight
/// requests finish first.
pub struct Server {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Server {
    /// Binds `addr` (port `0` picks a free port) and starts serving in a
    /// background tokio task.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP listener cannot bind.
    pub async fn start<C: Clock + 'static>(addr: SocketAddr, state: AppState<C>) -> Result<Self> {
        let app = router(state);

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {}", addr))?;
        let addr = listener
            .local_addr()
            .context("failed to read the bound address")?;

        info!("listening on http://{}", addr);

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let shutdown = async {
                let _ = shutdown_rx.await;
            };
            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(shutdown)
                .await
            {
                error!("server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stops accepting connections and waits for open requests to finish.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                error!("server task failed: {}", e);
            }
        }
        info!("server stopped");
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum ApiError {
    Core(CoreError),
    BadRequest(String),
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::Core(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("invalid JSON body: {}", rejection.body_text()))
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Core(CoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Core(CoreError::InvalidInput(_)) | ApiError::Core(CoreError::Schedule(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Core(err) => err.to_string(),
            ApiError::BadRequest(msg) => msg.clone(),
        };

        if status.is_server_error() {
            error!(%status, error = %message, "request failed");
        } else {
            warn!(%status, error = %message, "request rejected");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct NextDateParams {
    now: Option<String>,
    date: Option<String>,
    repeat: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IdParams {
    id: Option<String>,
}

impl IdParams {
    fn task_id(&self) -> Result<i64, ApiError> {
        Ok(parse_task_id(self.id.as_deref().unwrap_or(""))?)
    }
}

#[derive(Debug, Serialize)]
struct IdResponse {
    id: String,
}

#[derive(Debug, Serialize)]
struct TasksResponse {
    tasks: Vec<Task>,
}

/// Plain-text endpoint: the body is the bare `YYYYMMDD` date or an error line.
async fn next_date<C: Clock + 'static>(
    State(state): State<AppState<C>>,
    Query(params): Query<NextDateParams>,
) -> Response {
    let present = |v: &Option<String>| v.as_deref().filter(|s| !s.is_empty()).map(str::to_owned);
    let (Some(now), Some(date), Some(repeat)) =
        (present(&params.now), present(&params.date), present(&params.repeat))
    else {
        return (StatusCode::BAD_REQUEST, "missing required parameter: now, date and repeat").into_response();
    };

    let now = match CalendarDate::parse(&now) {
        Ok(now) => now,
        Err(e) => {
            warn!(error = %e, "bad 'now' parameter");
            return (StatusCode::BAD_REQUEST, format!("invalid 'now': {}", e)).into_response();
        }
    };

    match state.service.next_date(Some(now), &date, &repeat) {
        Ok(next) => (StatusCode::OK, next.to_string()).into_response(),
        Err(e) => {
            warn!(error = %e, "next date rejected");
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

async fn get_task<C: Clock + 'static>(
    State(state): State<AppState<C>>,
    Query(params): Query<IdParams>,
) -> Result<Json<Task>, ApiError> {
    let id = params.task_id()?;
    Ok(Json(state.service.get_task(id).await?))
}

async fn add_task<C: Clock + 'static>(
    State(state): State<AppState<C>>,
    payload: Result<Json<NewTaskData>, JsonRejection>,
) -> Result<Json<IdResponse>, ApiError> {
    let Json(data) = payload?;
    let id = state.service.add_task(&data).await?;
    Ok(Json(IdResponse { id: id.to_string() }))
}

async fn update_task<C: Clock + 'static>(
    State(state): State<AppState<C>>,
    payload: Result<Json<UpdateTaskData>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(data) = payload?;
    state.service.update_task(&data).await?;
    Ok(Json(json!({})))
}

async fn delete_task<C: Clock + 'static>(
    State(state): State<AppState<C>>,
    Query(params): Query<IdParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = params.task_id()?;
    state.service.delete_task(id).await?;
    Ok(Json(json!({})))
}

async fn list_tasks<C: Clock + 'static>(
    State(state): State<AppState<C>>,
) -> Result<Json<TasksResponse>, ApiError> {
    let tasks = state.service.list_tasks(state.task_limit).await?;
    Ok(Json(TasksResponse { tasks }))
}

async fn done_task<C: Clock + 'static>(
    State(state): State<AppState<C>>,
    Query(params): Query<IdParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = params.task_id()?;
    state.service.complete_task(id).await?;
    Ok(Json(json!({})))
}

// ---------------------------------------------------------------------------
// Static files
// ---------------------------------------------------------------------------

async fn static_files<C: Clock + 'static>(
    State(state): State<AppState<C>>,
    method: Method,
    uri: Uri,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let Some(mut path) = resolve_static_path(&state.web_dir, uri.path()) else {
        warn!(path = uri.path(), "rejected static path");
        return StatusCode::NOT_FOUND.into_response();
    };
    if tokio::fs::metadata(&path).await.map(|m| m.is_dir()).unwrap_or(false) {
        path.push("index.html");
    }

    match tokio::fs::read(&path).await {
        Ok(body) => {
            debug!(path = %path.display(), "static file");
            ([(header::CONTENT_TYPE, content_type(&path))], body).into_response()
        }
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Maps a request path onto `root`, refusing anything that climbs out of it.
fn resolve_static_path(root: &Path, request_path: &str) -> Option<PathBuf> {
    let mut path = root.to_path_buf();
    for segment in request_path.split('/') {
        let segment = urlencoding::decode(segment).ok()?;
        match segment.as_ref() {
            "" | "." => continue,
            ".." => return None,
            s if s.contains(['/', '\\', ':', '\0']) => return None,
            s => path.push(s),
        }
    }
    Some(path)
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}
