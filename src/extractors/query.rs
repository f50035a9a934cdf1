//! Parse list/read query parameters once into typed options.

use crate::error::AppError;
use crate::service::QueryOptions;
use crate::sql::{Predicate, NO_LIMIT};
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use std::collections::HashMap;

/// Recognised query parameters for the record routes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordQueryParams {
    pub options: QueryOptions,
    /// `countOnly`: answer `GET /` with `{count}` instead of rows.
    pub count_only: bool,
}

/// Extractor for `count`, `page`, `select`, `filter`, `sort` and `countOnly`.
/// Anything else in the query string is ignored.
#[derive(Clone, Debug, Default)]
pub struct RecordQuery(pub RecordQueryParams);

impl RecordQueryParams {
    pub fn from_pairs(params: HashMap<String, String>) -> Result<Self, AppError> {
        let mut out = RecordQueryParams::default();
        for (k, v) in params {
            match k.as_str() {
                "count" => out.options.count = Some(parse_count(&v)?),
                "page" => out.options.page = Some(parse_page(&v)?),
                "select" => out.options.select = non_empty(v),
                "sort" => out.options.sort = non_empty(v),
                "filter" => {
                    if !v.trim().is_empty() {
                        let p: Predicate = v
                            .parse()
                            .map_err(|e| AppError::BadRequest(format!("filter: {}", e)))?;
                        out.options.filter = Some(p);
                    }
                }
                "countOnly" => out.count_only = parse_flag(&v)?,
                _ => tracing::debug!(param = %k, "ignoring unknown query parameter"),
            }
        }
        Ok(out)
    }
}

fn non_empty(v: String) -> Option<String> {
    if v.trim().is_empty() {
        None
    } else {
        Some(v)
    }
}

fn parse_count(v: &str) -> Result<i64, AppError> {
    match v.trim().parse::<i64>() {
        Ok(n) if n == NO_LIMIT || n >= 0 => Ok(n),
        _ => Err(AppError::BadRequest(format!(
            "count must be a non-negative integer or {}",
            NO_LIMIT
        ))),
    }
}

fn parse_page(v: &str) -> Result<i64, AppError> {
    match v.trim().parse::<i64>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(AppError::BadRequest("page must be an integer >= 1".into())),
    }
}

fn parse_flag(v: &str) -> Result<bool, AppError> {
    match v.trim().to_ascii_lowercase().as_str() {
        "" | "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(AppError::BadRequest(format!("countOnly: unexpected value '{}'", other))),
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RecordQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(RecordQuery(RecordQueryParams::from_pairs(pairs)?))
    }
}
