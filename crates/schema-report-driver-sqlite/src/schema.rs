//! SQLite schema introspection
//!
//! Tables come from `sqlite_master`, columns from the `table_info` pragma. The
//! pragma is used in its table-valued form so the table name is bound as a
//! parameter instead of being spliced into the SQL text.

use rusqlite::types::ValueRef;
use schema_report_core::{ColumnInfo, ReportError, Result, SchemaIntrospection, TableInfo};

use crate::SqliteConnection;

// No ORDER BY: callers get the catalog's own order.
const LIST_TABLES_SQL: &str = "SELECT name FROM sqlite_master WHERE type = 'table'";

const TABLE_INFO_SQL: &str = r#"SELECT cid, name, type, "notnull", dflt_value, pk
FROM pragma_table_info(?1, 'main')
ORDER BY cid"#;

impl SchemaIntrospection for SqliteConnection {
    #[tracing::instrument(skip(self))]
    fn list_tables(&self) -> Result<Vec<TableInfo>> {
        tracing::debug!("listing tables from sqlite_master");
        let mut stmt = self
            .raw()
            .prepare(LIST_TABLES_SQL)
            .map_err(|e| catalog_error(self, e))?;

        let tables = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .and_then(|rows| {
                rows.map(|name| name.map(TableInfo::new))
                    .collect::<rusqlite::Result<Vec<_>>>()
            })
            .map_err(|e| catalog_error(self, e))?;

        tracing::debug!(table_count = tables.len(), "tables listed");
        Ok(tables)
    }

    #[tracing::instrument(skip(self))]
    fn get_columns(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        tracing::trace!(table = %table, "fetching column information");
        let mut stmt = self
            .raw()
            .prepare(TABLE_INFO_SQL)
            .map_err(|e| column_error(table, e))?;

        let columns = stmt
            .query_map([table], |row| {
                let ordinal: i64 = row.get(0)?;
                let pk: i64 = row.get(5)?;
                Ok(ColumnInfo {
                    ordinal: usize::try_from(ordinal).unwrap_or_default(),
                    name: row.get(1)?,
                    data_type: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    not_null: row.get::<_, i64>(3)? != 0,
                    default_value: value_ref_to_text(row.get_ref(4)?),
                    primary_key: u32::try_from(pk).unwrap_or_default(),
                })
            })
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
            .map_err(|e| column_error(table, e))?;

        tracing::trace!(table = %table, column_count = columns.len(), "columns fetched");
        Ok(columns)
    }
}

/// `dflt_value` is normally the expression text, but keep numbers readable if
/// a build of SQLite ever hands them back typed.
fn value_ref_to_text(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(s) | ValueRef::Blob(s) => Some(String::from_utf8_lossy(s).into_owned()),
    }
}

fn catalog_error(conn: &SqliteConnection, e: rusqlite::Error) -> ReportError {
    tracing::error!(error = %e, "failed to read schema catalog");
    ReportError::Query(format!(
        "Failed to list tables in '{}': {}",
        conn.path().display(),
        e
    ))
}

fn column_error(table: &str, e: rusqlite::Error) -> ReportError {
    tracing::error!(error = %e, table = %table, "failed to read column metadata");
    ReportError::Query(format!("Failed to read columns of table '{}': {}", table, e))
}
