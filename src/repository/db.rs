//! Database Connection and Setup
//!
//! Opens the SQLite database and creates the schema.

use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

/// Shared database connection
#[derive(Clone)]
pub struct DbState {
    conn: Arc<Mutex<Connection>>,
}

impl DbState {
    /// Handle for repositories; all clones share one connection
    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        self.conn.clone()
    }
}

/// Open (or create) the database described by a connection string.
///
/// Accepts `sqlite://path`, `sqlite:path`, a bare path, or `:memory:`.
pub async fn init_db(database_url: &str) -> DomainResult<DbState> {
    let path = database_path(database_url)?;

    let conn = if path == ":memory:" {
        Connection::open_in_memory()?
    } else {
        Connection::open(Path::new(path))
            .map_err(|e| DomainError::Internal(format!("Failed to open {}: {}", path, e)))?
    };

    run_migrations(&conn)?;

    Ok(DbState {
        conn: Arc::new(Mutex::new(conn)),
    })
}

fn database_path(database_url: &str) -> DomainResult<&str> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url)
        .trim();

    if path.is_empty() {
        return Err(DomainError::InvalidInput("Empty database path".to_string()));
    }
    Ok(path)
}

/// Create tables if they don't exist
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            created_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            created_at INTEGER NOT NULL
        );

        -- Ordered item references of each category
        CREATE TABLE IF NOT EXISTS category_items (
            category_id INTEGER NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
            item_id INTEGER NOT NULL REFERENCES items(id) ON DELETE CASCADE,
            position INTEGER NOT NULL,
            PRIMARY KEY (category_id, item_id)
        );

        CREATE INDEX IF NOT EXISTS idx_categories_name ON categories(name);
        CREATE INDEX IF NOT EXISTS idx_category_items_item ON category_items(item_id);",
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path() {
        assert_eq!(database_path("sqlite://todo.db").unwrap(), "todo.db");
        assert_eq!(database_path("sqlite:data/todo.db").unwrap(), "data/todo.db");
        assert_eq!(database_path("/var/lib/todo.db").unwrap(), "/var/lib/todo.db");
        assert_eq!(database_path(":memory:").unwrap(), ":memory:");
        assert!(database_path("sqlite://").is_err());
    }

    #[tokio::test]
    async fn test_init_file_db() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("todo.db").display());

        init_db(&url).await.expect("first open");
        // Schema creation is idempotent
        init_db(&url).await.expect("second open");
        assert!(dir.path().join("todo.db").exists());
    }
}
