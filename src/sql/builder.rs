//! Builds the CREATE TABLE column list and the INSERT, UPDATE, SELECT, WHERE, ORDER BY and
//! LIMIT fragments for one table. All functions are pure; "nothing to emit" is `None`.

use crate::config::{FieldConfig, ID_KEY};
use crate::sql::filter::Predicate;
use crate::sql::params::coerce_for_field;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Page size when the caller does not pass `count`.
pub const DEFAULT_COUNT: i64 = 30;
/// `count` value that disables LIMIT/OFFSET.
pub const NO_LIMIT: i64 = -1;

/// SQL text plus the values bound to its `?` placeholders, in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    pub fn new() -> Self {
        QueryBuf::default()
    }

    pub fn push_sql(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    /// Append another fragment, keeping its params after ours.
    pub fn append(&mut self, other: QueryBuf) {
        self.sql.push_str(&other.sql);
        self.params.extend(other.params);
    }
}

fn field<'a>(fields: &'a [FieldConfig], key: &str) -> Option<&'a FieldConfig> {
    fields.iter().find(|f| f.key == key)
}

/// Comma-joined column definitions in schema order: `key TYPE[ PRIMARY KEY| UNIQUE][ NOT NULL]`.
pub fn create_table(fields: &[FieldConfig]) -> String {
    fields
        .iter()
        .map(|f| {
            let mut def = format!("{} {}", f.key, f.type_.as_sql());
            if f.primary_key {
                def.push_str(" PRIMARY KEY");
            } else if f.unique {
                def.push_str(" UNIQUE");
            }
            if f.required {
                def.push_str(" NOT NULL");
            }
            def
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn create_table_statement(table: &str, fields: &[FieldConfig]) -> String {
    format!("CREATE TABLE IF NOT EXISTS {} ({})", table, create_table(fields))
}

/// `(<cols>) VALUES (?, ...)` for the schema fields present in `data`, in schema order.
///
/// Returns `None` unless at least two fields matched. A body carrying nothing but the
/// generated `_id` is therefore rejected, and so is any genuine single-column insert.
pub fn insert(fields: &[FieldConfig], data: &Map<String, Value>) -> Option<QueryBuf> {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    for f in fields {
        if let Some(v) = data.get(&f.key) {
            cols.push(f.key.as_str());
            q.params.push(coerce_for_field(f.type_, v));
        }
    }
    if cols.len() < 2 {
        return None;
    }
    let placeholders = vec!["?"; cols.len()].join(", ");
    q.sql = format!("({}) VALUES ({})", cols.join(", "), placeholders);
    Some(q)
}

/// `SET a = ?, b = ?` for the schema fields present in `data`. `_id` is never updated.
pub fn update(fields: &[FieldConfig], data: &Map<String, Value>) -> Option<QueryBuf> {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for f in fields {
        if f.key == ID_KEY {
            continue;
        }
        if let Some(v) = data.get(&f.key) {
            sets.push(format!("{} = ?", f.key));
            q.params.push(coerce_for_field(f.type_, v));
        }
    }
    if sets.is_empty() {
        return None;
    }
    q.sql = format!("SET {}", sets.join(", "));
    Some(q)
}

/// Column list for `select=a,b`. `None` means select all (`*`): either no spec was given
/// or none of its keys are schema fields.
pub fn select_clause(fields: &[FieldConfig], select: Option<&str>) -> Option<String> {
    let select = select?;
    let cols: Vec<&str> = select
        .split(',')
        .map(str::trim)
        .filter(|k| field(fields, k).is_some())
        .collect();
    if cols.is_empty() {
        return None;
    }
    Some(cols.join(", "))
}

/// ` ORDER BY k1 DIR, ...` for `sort=-age,name`. A leading `-` sorts descending, `+` or no
/// prefix ascending; unknown keys are dropped.
pub fn order_by_clause(fields: &[FieldConfig], sort: Option<&str>) -> Option<String> {
    let sort = sort?;
    let mut parts = Vec::new();
    for raw in sort.split(',').map(str::trim) {
        let (key, dir) = match raw.strip_prefix('-') {
            Some(k) => (k, "DESC"),
            None => (raw.strip_prefix('+').unwrap_or(raw), "ASC"),
        };
        if field(fields, key).is_some() {
            parts.push(format!("{} {}", key, dir));
        }
    }
    if parts.is_empty() {
        return None;
    }
    Some(format!(" ORDER BY {}", parts.join(", ")))
}

/// ` WHERE ...` with bound params, or `None` when there is no filter or nothing in it
/// refers to a schema field.
pub fn where_clause(fields: &[FieldConfig], filter: Option<&Predicate>) -> Option<QueryBuf> {
    let filter = filter?;
    let columns: HashSet<&str> = fields.iter().map(|f| f.key.as_str()).collect();
    let mut q = QueryBuf::new();
    let body = filter.render(&columns, &mut q.params)?;
    q.sql = format!(" WHERE {}", body);
    Some(q)
}

/// ` LIMIT n OFFSET m`. `count == -1` disables paging; defaults are count 30, page 1.
pub fn limit_clause(count: Option<i64>, page: Option<i64>) -> Option<String> {
    let count = match count {
        Some(NO_LIMIT) => return None,
        Some(c) if c >= 0 => c,
        _ => DEFAULT_COUNT,
    };
    let page = page.unwrap_or(1).max(1);
    // Far-out pages saturate; SQLite just returns no rows for them.
    let offset = (page - 1).saturating_mul(count);
    Some(format!(" LIMIT {} OFFSET {}", count, offset))
}
