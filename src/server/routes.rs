use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use super::error::ServerError;
use super::queries;
use crate::server::AppState;

type JsonResult = Result<Json<Value>, ServerError>;

fn parse_id(raw: &str) -> Result<i64, ServerError> {
    raw.trim()
        .parse()
        .map_err(|_| ServerError::BadRequest(format!("invalid id: {}", raw)))
}

pub async fn list_records(
    State(state): State<Arc<AppState>>,
    Path(resource): Path<String>,
) -> JsonResult {
    let store = state.store.read().await;
    let rows = store.list(&resource)?;
    Ok(Json(Value::Array(rows.into_iter().map(Value::Object).collect())))
}

pub async fn get_record(
    State(state): State<Arc<AppState>>,
    Path((resource, id)): Path<(String, String)>,
) -> JsonResult {
    let id = parse_id(&id)?;
    let store = state.store.read().await;
    Ok(Json(Value::Object(store.get(&resource, id)?)))
}

pub async fn create_record(
    State(state): State<Arc<AppState>>,
    Path(resource): Path<String>,
    Json(payload): Json<Value>,
) -> JsonResult {
    let mut store = state.store.write().await;
    Ok(Json(Value::Object(store.create(&resource, &payload)?)))
}

pub async fn update_record(
    State(state): State<Arc<AppState>>,
    Path((resource, id)): Path<(String, String)>,
    Json(payload): Json<Value>,
) -> JsonResult {
    let id = parse_id(&id)?;
    let mut store = state.store.write().await;
    Ok(Json(Value::Object(store.update(&resource, id, &payload)?)))
}

pub async fn delete_record(
    State(state): State<Arc<AppState>>,
    Path((resource, id)): Path<(String, String)>,
) -> Result<StatusCode, ServerError> {
    let id = parse_id(&id)?;
    state.store.write().await.delete(&resource, id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn run_query(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> JsonResult {
    let store = state.store.read().await;
    Ok(Json(Value::Array(queries::run(&store, &name)?)))
}
