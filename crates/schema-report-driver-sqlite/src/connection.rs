//! SQLite connection implementation

use rusqlite::{Connection as RusqliteConnection, OpenFlags};
use schema_report_core::{ReportError, Result};
use std::path::{Path, PathBuf};

/// SQLite connection wrapper
///
/// The database is always opened read-only; the reporter never writes to the
/// file it inspects. The handle is released either through [`close`] or when
/// the value is dropped.
///
/// [`close`]: SqliteConnection::close
pub struct SqliteConnection {
    conn: RusqliteConnection,
    path: PathBuf,
}

impl SqliteConnection {
    /// Open an existing SQLite database for reading.
    ///
    /// A missing file is an error. A file that exists but is not a database
    /// opens fine and only fails on the first query.
    #[tracing::instrument]
    pub fn open(path: &Path) -> Result<Self> {
        tracing::info!(path = %path.display(), "opening SQLite database");
        let expanded_path = Self::expand_path(path)?;

        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = RusqliteConnection::open_with_flags(&expanded_path, flags).map_err(|e| {
            tracing::error!(error = %e, "failed to open SQLite database");
            ReportError::Connection(format!(
                "Failed to open SQLite database at '{}': {}",
                expanded_path.display(),
                e
            ))
        })?;

        tracing::info!(path = %expanded_path.display(), "SQLite database connection established");
        Ok(Self {
            conn,
            path: expanded_path,
        })
    }

    /// Expand path to handle ~ (home directory) and relative paths.
    ///
    /// Paths that are not valid UTF-8 are only made absolute.
    fn expand_path(path: &Path) -> Result<PathBuf> {
        let text = path.to_str();
        if text.is_some_and(|t| t.starts_with("file:")) {
            return Ok(path.to_path_buf());
        }

        let expanded = if let Some(rest) = text.and_then(|t| t.strip_prefix("~/")) {
            let home = std::env::var_os("HOME").ok_or_else(|| {
                ReportError::Configuration("Unable to determine HOME directory".into())
            })?;
            PathBuf::from(home).join(rest)
        } else if text.is_some_and(|t| t.starts_with('~')) {
            return Err(ReportError::Configuration(
                "User-specific home directories (~user) are not supported".into(),
            ));
        } else {
            path.to_path_buf()
        };

        if expanded.is_relative() {
            Ok(std::env::current_dir()?.join(expanded))
        } else {
            Ok(expanded)
        }
    }

    /// Absolute path of the open database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn raw(&self) -> &RusqliteConnection {
        &self.conn
    }

    /// Close the connection, surfacing any error SQLite reports on shutdown
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| {
            ReportError::Connection(format!("Failed to close SQLite database: {}", e))
        })?;
        tracing::debug!("SQLite connection closed");
        Ok(())
    }
}

impl std::fmt::Debug for SqliteConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteConnection")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
