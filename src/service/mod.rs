//! RecordStore: CRUD over one table using the statement builder.

mod crud;
mod options;
pub use crud::{CountResult, Record, RecordStore};
pub use options::QueryOptions;
