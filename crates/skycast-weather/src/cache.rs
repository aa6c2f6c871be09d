//! SQLite-backed cache for raw provider responses.
//!
//! Entries are keyed by the full request signature (path + serialized
//! parameters) and carry a fetch timestamp so staleness is explicit. A
//! failed fetch is stored as a null body and served like any other entry
//! until it expires.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::Duration;

pub struct ResponseCache {
    conn: Connection,
}

/// A cache lookup that found a fresh entry. `body` is `None` when the
/// cached outcome was a failure.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedResponse {
    pub body: Option<String>,
}

impl ResponseCache {
    /// Open or create the cache database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path).context("Failed to open response cache database")?;
        let cache = Self { conn };
        cache.init_schema()?;
        Ok(cache)
    }

    /// Create an in-memory cache (for testing).
    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let cache = Self { conn };
        cache.init_schema()?;
        Ok(cache)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS responses (
                    key TEXT PRIMARY KEY,
                    body TEXT,
                    fetched_at INTEGER NOT NULL
                );
                "#,
            )
            .context("Failed to initialize response cache schema")?;
        Ok(())
    }

    /// Store a response body (or a null for a failed fetch), overwriting
    /// any previous entry for the key.
    pub fn store(&self, key: &str, body: Option<&str>) -> Result<()> {
        let now = chrono::Utc::now().timestamp_millis();
        self.conn.execute(
            "INSERT OR REPLACE INTO responses (key, body, fetched_at) VALUES (?1, ?2, ?3)",
            params![key, body, now],
        )?;
        Ok(())
    }

    /// Look up an entry no older than `max_age`. Returns `None` on a miss
    /// or an expired entry.
    pub fn get_fresh(&self, key: &str, max_age: Duration) -> Result<Option<CachedResponse>> {
        let cutoff = chrono::Utc::now().timestamp_millis() - max_age.as_millis() as i64;

        let row = self
            .conn
            .query_row(
                "SELECT body FROM responses WHERE key = ?1 AND fetched_at >= ?2",
                params![key, cutoff],
                |row| row.get::<_, Option<String>>(0),
            )
            .optional()?;

        Ok(row.map(|body| CachedResponse { body }))
    }

    /// Drop all cached responses.
    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM responses", [])?;
        Ok(())
    }

    /// Delete entries older than `max_age`.
    pub fn purge_expired(&self, max_age: Duration) -> Result<usize> {
        let cutoff = chrono::Utc::now().timestamp_millis() - max_age.as_millis() as i64;
        let purged = self
            .conn
            .execute("DELETE FROM responses WHERE fetched_at < ?1", params![cutoff])?;
        Ok(purged)
    }

    /// Backdate an entry's fetch time (test hook for expiry paths).
    #[cfg(test)]
    pub fn backdate(&self, key: &str, age: Duration) -> Result<()> {
        let fetched_at = chrono::Utc::now().timestamp_millis() - age.as_millis() as i64;
        self.conn.execute(
            "UPDATE responses SET fetched_at = ?1 WHERE key = ?2",
            params![fetched_at, key],
        )?;
        Ok(())
    }
}
