//! Record handlers: list (or count), read, create, update, delete.

use crate::error::AppError;
use crate::extractors::query::RecordQuery;
use crate::response::{status_ok, success_ok};
use crate::service::Record;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

fn body_to_record(value: Value) -> Result<Record, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

/// GET / — rows for `count/page/select/filter/sort`, or `{count}` with `countOnly`.
pub async fn list(
    State(state): State<AppState>,
    RecordQuery(params): RecordQuery,
) -> Result<Response, AppError> {
    if params.count_only {
        let count = state.store.count(params.options.filter.as_ref()).await?;
        return Ok(success_ok(count).into_response());
    }
    let rows = state.store.list(&params.options).await?;
    Ok(success_ok(rows).into_response())
}

/// GET /:id — the record, or `null` when there is none.
pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<String>,
    RecordQuery(params): RecordQuery,
) -> Result<impl IntoResponse, AppError> {
    let row = state.store.get(&id, params.options.select.as_deref()).await?;
    Ok(success_ok(row))
}

/// POST / — insert and return the stored record.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let data = body_to_record(body)?;
    let row = state.store.post(data).await?;
    Ok(success_ok(row))
}

/// PUT /:id — partial update; `{status}` tells whether a row changed.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let data = body_to_record(body)?;
    let changed = state.store.put(&id, &data).await?;
    Ok(status_ok(changed))
}

/// DELETE /:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state.store.delete(&id).await?;
    Ok(status_ok(deleted))
}
