//! schema-report - print the tables and columns of a SQLite database
//!
//! The binary in `cli.rs` is a thin shell around [`run`], which opens the
//! database and writes each table's columns as it reads them.

pub mod logging;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use schema_report_core::ReportFormat;
use schema_report_driver_sqlite::SqliteConnection;
use std::io::Write;
use std::path::PathBuf;

/// Database inspected when no path is given
pub const DEFAULT_DATABASE_PATH: &str = "database/main.db";

#[derive(Parser, Debug)]
#[command(
    name = "schema-report",
    version,
    about = "Print the tables and columns of a SQLite database"
)]
pub struct Cli {
    /// Path to the SQLite database file
    #[arg(default_value = DEFAULT_DATABASE_PATH)]
    pub database: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Leave out SQLite's own tables (sqlite_sequence, sqlite_stat1, ...)
    #[arg(long)]
    pub skip_internal: bool,

    /// Increase diagnostic output on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented plain text
    Text,
    /// Pretty-printed JSON
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

/// Everything `run` needs, independent of how it was parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub database: PathBuf,
    pub format: ReportFormat,
    pub skip_internal: bool,
}

impl ReportOptions {
    pub fn new(database: impl Into<PathBuf>) -> Self {
        Self {
            database: database.into(),
            format: ReportFormat::default(),
            skip_internal: false,
        }
    }
}

impl From<&Cli> for ReportOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            database: cli.database.clone(),
            format: cli.format.into(),
            skip_internal: cli.skip_internal,
        }
    }
}

/// Open the database and write its report to `out`.
///
/// Text output goes out table by table: if one table's columns cannot be read,
/// every block before it has already been written when the error comes back.
/// A file that is not a database fails on the table list, before any output.
#[tracing::instrument(skip(out))]
pub fn run<W: Write>(options: &ReportOptions, out: &mut W) -> anyhow::Result<()> {
    let database = options.database.display();
    let conn = SqliteConnection::open(&options.database)
        .with_context(|| format!("failed to open database '{}'", database))?;

    options
        .format
        .write_report(&conn, options.skip_internal, out)
        .with_context(|| format!("failed to report schema of '{}'", database))?;

    conn.close()?;
    tracing::info!("report written");
    Ok(())
}
