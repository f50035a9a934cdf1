//! Apply the table schema: CREATE TABLE IF NOT EXISTS from the configured fields.

use crate::config::ResolvedTable;
use crate::error::AppError;
use crate::sql::create_table_statement;
use sqlx::SqlitePool;

/// Idempotent; an existing table is left untouched even if its columns differ.
pub async fn ensure_table(pool: &SqlitePool, table: &ResolvedTable) -> Result<(), AppError> {
    let sql = create_table_statement(&table.table_name, &table.fields);
    tracing::debug!(sql = %sql, "ensure table");
    sqlx::query(&sql).execute(pool).await?;
    Ok(())
}
