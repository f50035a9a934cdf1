//! Resolved table: config validated and flattened for runtime use.

use crate::config::{default_db_path, validate, FieldConfig, TableConfig};
use crate::error::ConfigError;
use std::path::PathBuf;

/// Where the table's database lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageLocation {
    /// `<db_path>/<dbname>.db`
    File(PathBuf),
    /// Private in-memory database (tests).
    Memory,
}

#[derive(Clone, Debug)]
pub struct ResolvedTable {
    pub location: StorageLocation,
    pub table_name: String,
    pub fields: Vec<FieldConfig>,
}

/// Validate and resolve a file-backed table.
pub fn resolve(config: &TableConfig) -> Result<ResolvedTable, ConfigError> {
    validate(config)?;
    let dir = match &config.db_path {
        Some(dir) => dir.clone(),
        None => default_db_path()?,
    };
    let file = dir.join(format!("{}.db", config.db_name));
    Ok(ResolvedTable {
        location: StorageLocation::File(file),
        table_name: config.table_name.clone(),
        fields: config.fields.clone(),
    })
}

/// Validate and resolve a table kept in memory; `dbPath` is ignored.
pub fn resolve_in_memory(config: &TableConfig) -> Result<ResolvedTable, ConfigError> {
    validate(config)?;
    Ok(ResolvedTable {
        location: StorageLocation::Memory,
        table_name: config.table_name.clone(),
        fields: config.fields.clone(),
    })
}
