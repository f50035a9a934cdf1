//! Common routes: health, readiness, version.

use crate::state::AppState;
use crate::store::ping;
use crate::service::RecordStore;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadyBody {
    status: &'static str,
    table: String,
    database: &'static str,
}

/// Ready when the store's single connection answers; reports which table it serves.
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadyBody>) {
    let table = state.store.table().table_name.clone();
    match ping(state.store.pool()).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ReadyBody {
                status: "ok",
                table,
                database: "ok",
            }),
        ),
        Err(e) => {
            tracing::warn!(table = %table, error = %e, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadyBody {
                    status: "degraded",
                    table,
                    database: "unavailable",
                }),
            )
        }
    }
}

#[derive(Serialize)]
struct VersionBody {
    name: &'static str,
    version: &'static str,
}

async fn version() -> Json<VersionBody> {
    Json(VersionBody {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Common routes (no state): GET /health, GET /version.
pub fn common_routes() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
}

/// Common routes plus GET /ready, answered by pinging the given store's connection.
/// The server passes its first configured store.
pub fn common_routes_with_ready(store: RecordStore) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(AppState::new(store))
}
