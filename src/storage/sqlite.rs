//! SQLite connection handle shared by every entity store

use std::path::Path;
use std::sync::Arc;
use parking_lot::Mutex;
use rusqlite::Connection;
use tracing::{debug, info};
use crate::Result;
use super::schema;

/// Shared handle to the SQLite database.
///
/// Cloning is cheap and every clone talks to the same connection. Each call
/// to [`Database::with_connection`] holds the lock for its whole duration,
/// which is the only serialization between concurrent callers.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        info!(path = %path.display(), "Opening story database");
        Self::from_connection(Connection::open(path)?)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        self.with_connection(|conn| {
            for stmt in schema::all_schema_statements() {
                conn.execute(stmt, [])?;
            }
            debug!("Story schema ready");
            Ok(())
        })
    }

    /// Execute a closure with the connection
    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }

    /// Whether two handles share the same connection
    pub fn same_connection(&self, other: &Database) -> bool {
        Arc::ptr_eq(&self.conn, &other.conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_is_created() {
        let db = Database::open_in_memory().unwrap();
        let tables: Vec<String> = db
            .with_connection(|conn| {
                let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")?;
                let names = stmt
                    .query_map([], |row| row.get(0))?
                    .collect::<rusqlite::Result<Vec<String>>>()?;
                Ok(names)
            })
            .unwrap();

        assert_eq!(tables, vec!["chapters", "choices", "media", "stories"]);
    }

    #[test]
    fn test_clones_share_connection() {
        let db = Database::open_in_memory().unwrap();
        let other = Database::open_in_memory().unwrap();

        assert!(db.same_connection(&db.clone()));
        assert!(!db.same_connection(&other));
    }

    #[test]
    fn test_reopen_file_keeps_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stories.db");

        Database::open(&path).unwrap();
        // Second open must not fail on the existing tables
        Database::open(&path).unwrap();
    }
}
