//! Record CRUD execution against SQLite.

use crate::config::{resolve, resolve_in_memory, ResolvedTable, TableConfig, ID_KEY};
use crate::error::AppError;
use crate::migration::ensure_table;
use crate::service::QueryOptions;
use crate::sql::{
    insert, limit_clause, order_by_clause, select_clause, update, where_clause, Predicate,
    QueryBuf, SqliteBindValue,
};
use crate::store::open_pool;
use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqlitePool, SqliteQueryResult, SqliteRow};
use std::sync::Arc;

/// One row as a field key → value map. `_id` is the external identifier.
pub type Record = Map<String, Value>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CountResult {
    pub count: i64,
}

/// CRUD over a single configured table. Cheap to clone; clones share the same handle.
#[derive(Clone, Debug)]
pub struct RecordStore {
    pool: SqlitePool,
    table: Arc<ResolvedTable>,
}

impl RecordStore {
    /// Validate the config, open `<dbPath>/<dbname>.db` and create the table if missing.
    pub async fn open(config: &TableConfig) -> Result<Self, AppError> {
        let table = resolve(config)?;
        Self::open_resolved(table).await
    }

    /// Same as [`RecordStore::open`] but backed by a private in-memory database.
    pub async fn open_in_memory(config: &TableConfig) -> Result<Self, AppError> {
        let table = resolve_in_memory(config)?;
        Self::open_resolved(table).await
    }

    pub async fn open_resolved(table: ResolvedTable) -> Result<Self, AppError> {
        let pool = open_pool(&table.location).await?;
        ensure_table(&pool, &table).await?;
        tracing::info!(table = %table.table_name, "record store ready");
        Ok(RecordStore {
            pool,
            table: Arc::new(table),
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn table(&self) -> &ResolvedTable {
        &self.table
    }

    /// Count rows matching an optional filter.
    pub async fn count(&self, filter: Option<&Predicate>) -> Result<CountResult, AppError> {
        let mut q = QueryBuf::new();
        q.push_sql(&format!("SELECT count(*) AS count FROM {}", self.table.table_name));
        if let Some(w) = where_clause(&self.table.fields, filter) {
            q.append(w);
        }
        let row = self.query_one(&q).await?;
        let count = row
            .as_ref()
            .and_then(|r| r.get("count"))
            .and_then(Value::as_i64)
            .unwrap_or(0);
        Ok(CountResult { count })
    }

    /// List rows: select, filter, sort and page resolved from `options`.
    pub async fn list(&self, options: &QueryOptions) -> Result<Vec<Record>, AppError> {
        let fields = &self.table.fields;
        let cols = select_clause(fields, options.select.as_deref()).unwrap_or_else(|| "*".into());
        let mut q = QueryBuf::new();
        q.push_sql(&format!("SELECT {} FROM {}", cols, self.table.table_name));
        if let Some(w) = where_clause(fields, options.filter.as_ref()) {
            q.append(w);
        }
        if let Some(order) = order_by_clause(fields, options.sort.as_deref()) {
            q.push_sql(&order);
        }
        if let Some(limit) = limit_clause(options.count, options.page) {
            q.push_sql(&limit);
        }
        self.query_many(&q).await
    }

    /// Fetch one record by `_id`. `Ok(None)` when no row matches.
    pub async fn get(&self, id: &str, select: Option<&str>) -> Result<Option<Record>, AppError> {
        if id.is_empty() {
            return Err(AppError::MissingId);
        }
        let cols = select_clause(&self.table.fields, select).unwrap_or_else(|| "*".into());
        let q = QueryBuf {
            sql: format!("SELECT {} FROM {} WHERE {} = ?", cols, self.table.table_name, ID_KEY),
            params: vec![Value::String(id.to_string())],
        };
        self.query_one(&q).await
    }

    /// Insert a record, generating `_id` when absent, and return the stored row.
    pub async fn post(&self, mut data: Record) -> Result<Record, AppError> {
        if data.get(ID_KEY).map_or(true, is_falsy) {
            data.insert(ID_KEY.to_string(), Value::String(new_id()));
        }
        let stmt = insert(&self.table.fields, &data).ok_or(AppError::NoDataToInsert)?;
        let mut q = QueryBuf::new();
        q.push_sql(&format!("INSERT INTO {} ", self.table.table_name));
        q.append(stmt);
        let result = self.execute(&q).await?;

        let reread = QueryBuf {
            sql: format!("SELECT * FROM {} WHERE rowid = ?", self.table.table_name),
            params: vec![Value::from(result.last_insert_rowid())],
        };
        tracing::debug!(sql = %reread.sql, params = ?reread.params, "query");
        let row = bind_params(&reread)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Readback)?;
        Ok(row_to_record(&row))
    }

    /// Update the supplied fields of the record with `_id = id`. `false` when nothing matched.
    pub async fn put(&self, id: &str, data: &Record) -> Result<bool, AppError> {
        if id.is_empty() {
            return Err(AppError::MissingId);
        }
        let stmt = update(&self.table.fields, data).ok_or(AppError::NoFieldToUpdate)?;
        let mut q = QueryBuf::new();
        q.push_sql(&format!("UPDATE {} ", self.table.table_name));
        q.append(stmt);
        q.push_sql(&format!(" WHERE {} = ?", ID_KEY));
        q.params.push(Value::String(id.to_string()));
        let result = self.execute(&q).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete the record with `_id = id`. `false` when nothing matched.
    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        if id.is_empty() {
            return Err(AppError::MissingId);
        }
        let q = QueryBuf {
            sql: format!("DELETE FROM {} WHERE {} = ?", self.table.table_name, ID_KEY),
            params: vec![Value::String(id.to_string())],
        };
        let result = self.execute(&q).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn query_one(&self, q: &QueryBuf) -> Result<Option<Record>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_params(q).fetch_optional(&self.pool).await?;
        Ok(row.map(|r| row_to_record(&r)))
    }

    async fn query_many(&self, q: &QueryBuf) -> Result<Vec<Record>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_params(q).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(row_to_record).collect())
    }

    async fn execute(&self, q: &QueryBuf) -> Result<SqliteQueryResult, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        Ok(bind_params(q).execute(&self.pool).await?)
    }
}

/// Absent-equivalent `_id` values: null, `""`, `0` and `false`.
fn is_falsy(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

fn bind_params(q: &QueryBuf) -> Query<'_, Sqlite, SqliteArguments<'_>> {
    let mut query = sqlx::query(&q.sql);
    for p in &q.params {
        query = query.bind(SqliteBindValue::from_json(p));
    }
    query
}

fn row_to_record(row: &SqliteRow) -> Record {
    use sqlx::{Column, Row};
    let mut map = Map::new();
    for (idx, col) in row.columns().iter().enumerate() {
        map.insert(col.name().to_string(), cell_to_value(row, idx));
    }
    map
}

/// Decode by the value's storage class rather than the declared column type.
fn cell_to_value(row: &SqliteRow, idx: usize) -> Value {
    use sqlx::{Row, TypeInfo, ValueRef};
    let Ok(raw) = row.try_get_raw(idx) else {
        return Value::Null;
    };
    if raw.is_null() {
        return Value::Null;
    }
    let storage_class = raw.type_info().name().to_string();
    match storage_class.as_str() {
        "INTEGER" => row
            .try_get_unchecked::<i64, _>(idx)
            .map(Value::from)
            .unwrap_or(Value::Null),
        "REAL" => row
            .try_get_unchecked::<f64, _>(idx)
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        "BLOB" => row
            .try_get_unchecked::<Vec<u8>, _>(idx)
            .map(|bytes| Value::Array(bytes.into_iter().map(Value::from).collect()))
            .unwrap_or(Value::Null),
        _ => row
            .try_get_unchecked::<String, _>(idx)
            .map(Value::String)
            .unwrap_or(Value::Null),
    }
}
