//! Load table configs from a JSON file; default database directory.

use crate::config::TableConfig;
use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Env var overriding the default database directory.
pub const DB_PATH_ENV: &str = "SQCRUD_DB_PATH";

/// Database directory when a config omits `dbPath`: `SQCRUD_DB_PATH`, else `<home>/sqcrud/db`.
pub fn default_db_path() -> Result<PathBuf, ConfigError> {
    db_path_from(std::env::var(DB_PATH_ENV).ok(), dirs::home_dir())
}

fn db_path_from(env_override: Option<String>, home: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    if let Some(p) = env_override.filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let home = home.ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join("sqcrud").join("db"))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<TableConfig>),
    One(TableConfig),
}

/// Parse a JSON document holding one table config or an array of them.
pub fn parse_configs(json: &str) -> Result<Vec<TableConfig>, ConfigError> {
    let parsed: OneOrMany = serde_json::from_str(json).map_err(|e| ConfigError::Load(e.to_string()))?;
    Ok(match parsed {
        OneOrMany::Many(v) => v,
        OneOrMany::One(c) => vec![c],
    })
}

pub async fn load_from_file(path: impl AsRef<Path>) -> Result<Vec<TableConfig>, ConfigError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "loading table config");
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
    parse_configs(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldType;

    #[test]
    fn parses_single_and_array() {
        let one = r#"{"dbname":"app","tableName":"users","fields":[{"key":"_id","type":"TEXT","primaryKey":true}]}"#;
        let configs = parse_configs(one).unwrap();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].db_name, "app");
        assert_eq!(configs[0].table_name, "users");
        assert!(configs[0].fields[0].primary_key);
        assert!(!configs[0].fields[0].required);
        assert_eq!(configs[0].fields[0].type_, FieldType::Text);

        let many = format!("[{one},{one}]");
        assert_eq!(parse_configs(&many).unwrap().len(), 2);
    }

    #[test]
    fn db_path_prefers_env_then_home() {
        let home = Some(PathBuf::from("/home/ana"));
        assert_eq!(
            db_path_from(Some("/var/lib/sqcrud".into()), home.clone()).unwrap(),
            PathBuf::from("/var/lib/sqcrud")
        );
        assert_eq!(
            db_path_from(Some(String::new()), home.clone()).unwrap(),
            PathBuf::from("/home/ana/sqcrud/db")
        );
        assert_eq!(db_path_from(None, home).unwrap(), PathBuf::from("/home/ana/sqcrud/db"));
    }

    #[test]
    fn db_path_without_home_is_an_error() {
        assert!(matches!(db_path_from(None, None), Err(ConfigError::NoHomeDir)));
        assert!(db_path_from(Some("/data".into()), None).is_ok());
    }

    #[test]
    fn rejects_unknown_type() {
        let bad = r#"{"dbname":"app","tableName":"t","fields":[{"key":"_id","type":"VARCHAR"}]}"#;
        assert!(matches!(parse_configs(bad), Err(ConfigError::Load(_))));
    }
}
