//! Serves every table listed in `CONFIG_PATH` (a JSON table config or array of them),
//! each under `/<tableName>`, plus /health, /ready and /version.
//!
//! Run from repo root: `cargo run -p sqcrud-server`

use axum::Router;
use sqcrud::{common_routes, common_routes_with_ready, load_from_file, record_routes, RecordStore};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sqcrud=info,sqcrud_server=info")),
        )
        .init();

    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "tables.json".into());
    let configs = load_from_file(&config_path).await?;

    let mut app = Router::new();
    let mut first_store = None;
    for config in &configs {
        let store = RecordStore::open(config).await?;
        tracing::info!(table = %config.table_name, "mounting /{}", config.table_name);
        app = app.nest(&format!("/{}", config.table_name), record_routes(store.clone()));
        first_store.get_or_insert(store);
    }
    app = match first_store {
        Some(store) => app.merge(common_routes_with_ready(store)),
        None => {
            tracing::warn!(path = %config_path, "no tables configured");
            app.merge(common_routes())
        }
    };

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
