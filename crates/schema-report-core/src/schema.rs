//! Schema introspection trait and descriptor types

use crate::Result;
use serde::{Deserialize, Serialize};

/// Prefix SQLite reserves for its own bookkeeping tables
pub const INTERNAL_TABLE_PREFIX: &str = "sqlite_";

/// Schema introspection interface
///
/// Implementations are expected to be cheap, read-only views over an open
/// connection. All calls are synchronous.
pub trait SchemaIntrospection {
    /// List all tables, in the order the schema catalog returns them
    fn list_tables(&self) -> Result<Vec<TableInfo>>;

    /// Get columns for a table, in ordinal order
    fn get_columns(&self, table: &str) -> Result<Vec<ColumnInfo>>;

    /// Collect the columns of every table into a single report.
    ///
    /// Stops at the first table whose columns cannot be read.
    fn schema_report(&self, skip_internal: bool) -> Result<SchemaReport> {
        let tables = self.list_tables()?;
        let mut report = SchemaReport::default();

        for info in tables {
            if skip_internal && info.is_internal() {
                tracing::trace!(table = %info.name, "skipping internal table");
                continue;
            }
            let columns = self.get_columns(&info.name)?;
            report.tables.push(TableSchema {
                name: info.name,
                columns,
            });
        }

        tracing::debug!(table_count = report.tables.len(), "schema report collected");
        Ok(report)
    }
}

/// Table information as read from the schema catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    pub name: String,
}

impl TableInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Whether this is one of SQLite's own tables (`sqlite_sequence`, `sqlite_stat1`, ...)
    pub fn is_internal(&self) -> bool {
        self.name.starts_with(INTERNAL_TABLE_PREFIX)
    }
}

/// Column information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    /// Zero-based position within the table (`cid`)
    pub ordinal: usize,
    pub name: String,
    /// Declared type exactly as written in the DDL; empty when none was given
    pub data_type: String,
    pub not_null: bool,
    /// Default value as literal or expression text, e.g. `0` or `'pending'`
    pub default_value: Option<String>,
    /// 1-based position within the primary key, 0 when not part of it
    pub primary_key: u32,
}

impl ColumnInfo {
    pub fn is_primary_key(&self) -> bool {
        self.primary_key > 0
    }
}

/// A table together with its ordered columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
}

/// Every table of one database, in catalog order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaReport {
    pub tables: Vec<TableSchema>,
}

impl SchemaReport {
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.iter().find(|t| t.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FakeCatalog {
        tables: Vec<&'static str>,
        fail_on: Option<&'static str>,
        column_calls: Cell<usize>,
    }

    impl FakeCatalog {
        fn new(tables: Vec<&'static str>) -> Self {
            Self {
                tables,
                fail_on: None,
                column_calls: Cell::new(0),
            }
        }
    }

    impl SchemaIntrospection for FakeCatalog {
        fn list_tables(&self) -> Result<Vec<TableInfo>> {
            Ok(self.tables.iter().map(|t| TableInfo::new(*t)).collect())
        }

        fn get_columns(&self, table: &str) -> Result<Vec<ColumnInfo>> {
            self.column_calls.set(self.column_calls.get() + 1);
            if self.fail_on == Some(table) {
                return Err(crate::ReportError::Query(format!("no such table: {}", table)));
            }
            Ok(vec![ColumnInfo {
                ordinal: 0,
                name: format!("{}_id", table),
                data_type: "INTEGER".into(),
                not_null: false,
                default_value: None,
                primary_key: 1,
            }])
        }
    }

    #[test]
    fn test_internal_table_detection() {
        assert!(TableInfo::new("sqlite_sequence").is_internal());
        assert!(TableInfo::new("sqlite_stat1").is_internal());
        assert!(!TableInfo::new("users").is_internal());
        assert!(!TableInfo::new("my_sqlite_notes").is_internal());
    }

    #[test]
    fn test_primary_key_position() {
        let mut column = ColumnInfo {
            ordinal: 2,
            name: "tenant".into(),
            data_type: "TEXT".into(),
            not_null: true,
            default_value: None,
            primary_key: 0,
        };
        assert!(!column.is_primary_key());
        column.primary_key = 2;
        assert!(column.is_primary_key());
    }

    #[test]
    fn test_schema_report_keeps_catalog_order() {
        let catalog = FakeCatalog::new(vec!["zebra", "apple", "mango"]);
        let report = catalog.schema_report(false).unwrap();

        let names: Vec<_> = report.tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["zebra", "apple", "mango"]);
        assert_eq!(report.table("apple").unwrap().columns[0].name, "apple_id");
    }

    #[test]
    fn test_schema_report_skip_internal() {
        let catalog = FakeCatalog::new(vec!["orders", "sqlite_sequence"]);

        let all = catalog.schema_report(false).unwrap();
        assert_eq!(all.tables.len(), 2);

        let user_only = catalog.schema_report(true).unwrap();
        assert_eq!(user_only.tables.len(), 1);
        assert!(user_only.table("sqlite_sequence").is_none());
    }

    #[test]
    fn test_schema_report_stops_at_first_failure() {
        let mut catalog = FakeCatalog::new(vec!["a", "broken", "c"]);
        catalog.fail_on = Some("broken");

        let err = catalog.schema_report(false).unwrap_err();
        assert!(err.to_string().contains("no such table: broken"));
        assert_eq!(catalog.column_calls.get(), 2);
    }

    #[test]
    fn test_empty_report() {
        let catalog = FakeCatalog::new(Vec::new());
        let report = catalog.schema_report(false).unwrap();
        assert!(report.is_empty());
    }
}
