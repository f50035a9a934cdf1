//! Response bodies for the record routes.

use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Body of PUT and DELETE: whether a row was affected.
#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub status: bool,
}

pub fn success_ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn status_ok(status: bool) -> (StatusCode, Json<StatusBody>) {
    (StatusCode::OK, Json(StatusBody { status }))
}
