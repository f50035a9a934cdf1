//! sqcrud: CRUD store and REST router for a single SQLite table, generated from a field list.

pub mod config;
pub mod error;
pub mod extractors;
pub mod migration;
pub mod response;
pub mod sql;
pub mod state;
pub mod store;
pub mod service;
pub mod handlers;
pub mod routes;

pub use config::{default_db_path, load_from_file, resolve, FieldConfig, FieldType, ResolvedTable, StorageLocation, TableConfig};
pub use error::{AppError, ConfigError};
pub use migration::ensure_table;
pub use response::{status_ok, success_ok};
pub use routes::{common_routes, common_routes_with_ready, record_routes};
pub use service::{CountResult, QueryOptions, Record, RecordStore};
pub use sql::Predicate;
pub use state::AppState;
pub use store::open_pool;
