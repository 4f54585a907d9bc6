//! SQLite connection for the LinkStash storage area.

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

use super::migrations;

/// How long a write waits on a lock held by another process (the CLI and
/// the RPC server may share one file).
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Migrated SQLite connection holding the `local_storage` table.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens or creates the database file at `path`. Parent directories must exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        Self::init(Connection::open(path)?)
    }

    /// Opens a private in-memory database, dropped with the `Database`.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, rusqlite::Error> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        migrations::run_all(&conn)?;
        Ok(Self { conn })
    }

    /// Schema version recorded in the `schema_version` table.
    pub fn schema_version(&self) -> i32 {
        migrations::get_schema_version(&self.conn)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
