//! Raw table configuration as supplied by the caller (JSON or in-memory structs).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Column type of a field. Serialized in upper case to match the SQL type name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldType {
    Text,
    Number,
    Double,
    Blob,
}

impl FieldType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            FieldType::Text => "TEXT",
            FieldType::Number => "NUMBER",
            FieldType::Double => "DOUBLE",
            FieldType::Blob => "BLOB",
        }
    }

    /// TEXT and BLOB values are stored as text; NUMBER and DOUBLE are numeric.
    pub fn is_textual(&self) -> bool {
        matches!(self, FieldType::Text | FieldType::Blob)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// One column of the table.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    pub key: String,
    #[serde(rename = "type")]
    pub type_: FieldType,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub required: bool,
}

impl FieldConfig {
    pub fn new(key: impl Into<String>, type_: FieldType) -> Self {
        FieldConfig {
            key: key.into(),
            type_,
            primary_key: false,
            unique: false,
            required: false,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Configuration for one store: where the database file lives, which table, and its fields.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    /// Directory holding the database file. Defaults to [`crate::config::default_db_path`].
    #[serde(default)]
    pub db_path: Option<PathBuf>,
    /// Database file stem; the file is `<db_path>/<dbname>.db`.
    #[serde(default, rename = "dbname")]
    pub db_name: String,
    #[serde(default)]
    pub table_name: String,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

/// Reserved external identifier key.
pub const ID_KEY: &str = "_id";
