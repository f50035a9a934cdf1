//! Record routes for one table. Each call builds an independent router bound to its store,
//! so several tables can be mounted side by side (e.g. `.nest("/users", record_routes(users))`).

use crate::handlers::record::{create, delete as delete_handler, list, read, update};
use crate::service::RecordStore;
use crate::state::AppState;
use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;

/// Maximum accepted request body, in bytes.
pub const BODY_LIMIT: usize = 1024 * 1024;

pub fn record_routes(store: RecordStore) -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(read).put(update).delete(delete_handler))
        .layer(ServiceBuilder::new().layer(RequestBodyLimitLayer::new(BODY_LIMIT)))
        .with_state(AppState::new(store))
}
