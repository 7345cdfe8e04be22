//! SQLite schema introspection

mod connection;
mod schema;

pub use connection::SqliteConnection;
