//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("dbname is required")]
    MissingDbName,
    #[error("tableName is required")]
    MissingTableName,
    #[error("at least one field is required in fields")]
    NoFields,
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
    #[error("duplicate field key: {0}")]
    DuplicateField(String),
    #[error("more than one primary key: {0} and {1}")]
    MultiplePrimaryKeys(String, String),
    #[error("fields must include an `_id` field")]
    MissingIdField,
    #[error("no home directory; set dbPath or SQCRUD_DB_PATH")]
    NoHomeDir,
    #[error("config load: {0}")]
    Load(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("missing id")]
    MissingId,
    #[error("no data to insert")]
    NoDataToInsert,
    #[error("no matching field to update")]
    NoFieldToUpdate,
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("read after insert: {0}")]
    Readback(#[source] sqlx::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("bad request: {0}")]
    BadRequest(String),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl AppError {
    /// Stable machine-readable code for the error body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config_error",
            AppError::MissingId => "missing_id",
            AppError::NoDataToInsert => "no_data",
            AppError::NoFieldToUpdate => "no_matching_field",
            AppError::Db(_) => "database_error",
            AppError::Readback(_) => "readback_error",
            AppError::Io(_) => "io_error",
            AppError::BadRequest(_) => "bad_request",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Store failures all surface as 500 with the reason; only boundary parsing is a 400.
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}
