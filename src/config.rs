use std::path::PathBuf;
use std::time::Duration;

use rusqlite::Connection;
use serde::Deserialize;

use crate::error::Result;
use crate::sqlite::ParcelStore;

/// Path understood by SQLite as a private in-memory database.
pub const IN_MEMORY_PATH: &str = ":memory:";

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

/// Connection settings for the parcel database.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParcelStoreConfig {
    /// Path to the SQLite database file
    pub db_path: PathBuf,
    /// How long a statement waits on a locked database, in milliseconds
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl ParcelStoreConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(IN_MEMORY_PATH)
    }

    pub fn with_busy_timeout_ms(mut self, busy_timeout_ms: u64) -> Self {
        self.busy_timeout_ms = busy_timeout_ms;
        self
    }

    /// Opens the database and makes sure the `parcel` table exists.
    ///
    /// The returned connection belongs to the caller; hand it to
    /// [`ParcelStore::new`] by reference.
    pub fn open(&self) -> Result<Connection> {
        let conn = Connection::open(&self.db_path)?;
        conn.busy_timeout(Duration::from_millis(self.busy_timeout_ms))?;
        tracing::info!(path = %self.db_path.display(), "opened parcel database");
        ParcelStore::new(&conn).ensure_schema()?;
        Ok(conn)
    }
}
