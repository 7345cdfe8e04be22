//! Report rendering
//!
//! The text layout is byte-stable: the same schema always renders to the same
//! bytes. Text is written one table at a time, so a table whose columns cannot
//! be read still leaves every earlier block on the output.

use crate::{ColumnInfo, Result, SchemaIntrospection, SchemaReport, TableSchema};
use std::io::Write;

/// First line of every text report
pub const TEXT_REPORT_HEADER: &str = "Tables and their columns:";

/// Output format for a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    /// Read the schema from `source` and write it to `out` in this format.
    ///
    /// JSON is a single document, so it is only written once every table has
    /// been read.
    pub fn write_report<S, W>(self, source: &S, skip_internal: bool, out: &mut W) -> Result<()>
    where
        S: SchemaIntrospection + ?Sized,
        W: Write,
    {
        match self {
            ReportFormat::Text => stream_text(source, skip_internal, out),
            ReportFormat::Json => render_json(&source.schema_report(skip_internal)?, out),
        }
    }
}

/// Write the plain-text report straight from `source`.
///
/// The header goes out once the table list has been read. Each table's
/// `Table:` line is written before its columns are queried and the block is
/// flushed as soon as it is complete.
///
/// ```text
/// Tables and their columns:
///
/// Table: users
///   - Column: id
///     Type: INTEGER
///     Not Null: False
///     Default Value: None
///     Primary Key: True
///
/// ```
pub fn stream_text<S, W>(source: &S, skip_internal: bool, out: &mut W) -> Result<()>
where
    S: SchemaIntrospection + ?Sized,
    W: Write,
{
    let tables = source.list_tables()?;
    write_header(out)?;

    for info in tables {
        if skip_internal && info.is_internal() {
            tracing::trace!(table = %info.name, "skipping internal table");
            continue;
        }
        writeln!(out, "Table: {}", info.name)?;
        out.flush()?;

        let columns = source.get_columns(&info.name)?;
        write_columns(&columns, out)?;
        out.flush()?;
    }

    Ok(())
}

/// Render an already collected report in the text layout
pub fn render_text<W: Write>(report: &SchemaReport, out: &mut W) -> Result<()> {
    write_header(out)?;
    for table in &report.tables {
        write_table(table, out)?;
    }
    out.flush()?;
    Ok(())
}

fn write_header<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "{}", TEXT_REPORT_HEADER)?;
    writeln!(out)?;
    Ok(())
}

fn write_table<W: Write>(table: &TableSchema, out: &mut W) -> Result<()> {
    writeln!(out, "Table: {}", table.name)?;
    write_columns(&table.columns, out)
}

/// Column entries followed by the blank separator line
fn write_columns<W: Write>(columns: &[ColumnInfo], out: &mut W) -> Result<()> {
    for column in columns {
        write_column(column, out)?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_column<W: Write>(column: &ColumnInfo, out: &mut W) -> Result<()> {
    writeln!(out, "  - Column: {}", column.name)?;
    writeln!(out, "    Type: {}", column.data_type)?;
    writeln!(out, "    Not Null: {}", flag(column.not_null))?;
    writeln!(
        out,
        "    Default Value: {}",
        column.default_value.as_deref().unwrap_or("None")
    )?;
    writeln!(out, "    Primary Key: {}", flag(column.is_primary_key()))?;
    Ok(())
}

fn flag(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Render the report as pretty-printed JSON followed by a newline
pub fn render_json<W: Write>(report: &SchemaReport, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
