//! Config validation: required setup fields and schema consistency.

use crate::config::{TableConfig, ID_KEY};
use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

fn identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static identifier pattern"))
}

/// Table and field names are interpolated into statements, so they must be plain identifiers.
pub fn is_identifier(s: &str) -> bool {
    identifier_re().is_match(s)
}

pub fn validate(config: &TableConfig) -> Result<(), ConfigError> {
    if config.db_name.trim().is_empty() {
        return Err(ConfigError::MissingDbName);
    }
    if config.table_name.trim().is_empty() {
        return Err(ConfigError::MissingTableName);
    }
    if config.fields.is_empty() {
        return Err(ConfigError::NoFields);
    }
    if !is_identifier(&config.table_name) {
        return Err(ConfigError::InvalidIdentifier(config.table_name.clone()));
    }

    let mut keys = HashSet::new();
    let mut primary: Option<&str> = None;
    for field in &config.fields {
        if !is_identifier(&field.key) {
            return Err(ConfigError::InvalidIdentifier(field.key.clone()));
        }
        if !keys.insert(field.key.as_str()) {
            return Err(ConfigError::DuplicateField(field.key.clone()));
        }
        if field.primary_key {
            if let Some(first) = primary {
                return Err(ConfigError::MultiplePrimaryKeys(first.to_string(), field.key.clone()));
            }
            primary = Some(&field.key);
        }
    }
    if !keys.contains(ID_KEY) {
        return Err(ConfigError::MissingIdField);
    }
    Ok(())
}
