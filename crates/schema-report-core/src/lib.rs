//! schema-report core - shared abstractions for the schema reporter
//!
//! This crate holds everything that does not depend on a concrete database
//! engine:
//!
//! - `SchemaIntrospection` - trait a driver implements to list tables and columns
//! - `TableInfo`, `ColumnInfo`, `TableSchema`, `SchemaReport` - descriptor types
//! - `ReportFormat` - streamed text and JSON renderers
//! - `ReportError` / `Result` - the error type shared by all crates

mod error;
mod report;
mod schema;

pub use error::*;
pub use report::*;
pub use schema::*;
