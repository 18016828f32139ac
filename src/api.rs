//! HTTP API for the task store.
//!
//! JSON in, JSON out; every endpoint answers with the affected task (or the
//! task collection), and errors carry an `{"error": message}` body with the
//! status from [`Error::http_status`].
//!
//! The PATCH body is deliberately loose at the boundary: fields arrive as
//! free-form JSON, get sanitized into the typed write-set, and anything
//! unrecognized or malformed is dropped rather than rejected. Title and
//! due-date updates are the exception — those fail hard on bad input.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::{Error, ErrorBody, Result};
use crate::query::TaskFilter;
use crate::store::TaskStore;
use crate::task::{self, Task, TaskUpdate};

/// Shared application dependencies.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<TaskStore>,
}

impl AppState {
    pub fn new(store: TaskStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/todos", get(list_tasks).post(create_task))
        .route(
            "/todos/:id",
            patch(patch_task).put(rename_task).delete(delete_task),
        )
        .route("/todos/:id/dueDate", patch(set_due_date))
        .route("/todos/:id/toggle", patch(toggle_task))
        .with_state(state)
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.http_status();
        if status.is_server_error() {
            warn!(error = %self, "request failed");
        } else {
            debug!(error = %self, "request rejected");
        }
        (status, Json(ErrorBody::from(&self))).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct ListParams {
    status: Option<String>,
    priority: Option<String>,
    query: Option<String>,
}

/// GET /todos — filtered listing, newest first.
async fn list_tasks(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Task>>> {
    let filter = TaskFilter::from_params(
        params.status.as_deref(),
        params.priority.as_deref(),
        params.query.as_deref(),
    )?;
    let tasks = state.store.list(&filter)?;
    Ok(Json(tasks))
}

/// POST /todos — create from `{title}`; everything else is defaulted.
async fn create_task(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Task>> {
    let title = require_title(&body)?;
    let task = state.store.create(title)?;
    Ok(Json(task))
}

/// PATCH /todos/{id} — partial `{completed, status, priority}` update.
async fn patch_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Result<Json<Task>> {
    let updates = sanitize_patch_body(&body);
    let task = state.store.update(id, &updates)?;
    Ok(Json(task))
}

/// PUT /todos/{id} — replace the title.
async fn rename_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Result<Json<Task>> {
    let title = require_title(&body)?;
    let task = state.store.update(id, &[TaskUpdate::Rename(title)])?;
    Ok(Json(task))
}

/// DELETE /todos/{id} — permanent removal.
async fn delete_task(State(state): State<AppState>, Path(id): Path<u64>) -> Result<Json<Value>> {
    state.store.delete(id)?;
    Ok(Json(json!({ "message": "task deleted" })))
}

/// PATCH /todos/{id}/dueDate — set or clear the due date.
///
/// `{"dueDate": "..."}` must parse; `{"dueDate": null}` clears; a missing
/// field is rejected.
async fn set_due_date(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Result<Json<Task>> {
    let update = due_date_update(&body)?;
    let task = state.store.update(id, &[update])?;
    Ok(Json(task))
}

/// PATCH /todos/{id}/toggle — the checkbox route: `{completed}` alone.
async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Result<Json<Task>> {
    let completed = body
        .get("completed")
        .and_then(Value::as_bool)
        .ok_or_else(|| Error::Validation("completed must be a boolean".to_string()))?;
    let status = task::status_from_completed(completed);
    let task = state.store.update(id, &[TaskUpdate::SetStatus(status)])?;
    Ok(Json(task))
}

fn require_title(body: &Value) -> Result<String> {
    let title = body
        .get("title")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::Validation("title is required".to_string()))?;
    task::validate_title(title)
}

fn sanitize_patch_body(body: &Value) -> Vec<TaskUpdate> {
    task::sanitize_updates(
        body.get("completed").and_then(Value::as_bool),
        body.get("status").and_then(Value::as_str),
        body.get("priority").and_then(Value::as_str),
    )
}

fn due_date_update(body: &Value) -> Result<TaskUpdate> {
    match body.get("dueDate") {
        None => Err(Error::Validation("dueDate is required".to_string())),
        Some(Value::Null) => Ok(TaskUpdate::SetDueDate(None)),
        Some(Value::String(raw)) => Ok(TaskUpdate::SetDueDate(Some(task::parse_due_date(raw)?))),
        Some(_) => Err(Error::Validation(
            "dueDate must be a string or null".to_string(),
        )),
    }
}
