//! SQLite storage implementation.
//!
//! The main persistence backend for LinkStash. One connection, two
//! collections: saved links and settings. The router owns exactly one
//! instance; nothing else touches the database file.

use crate::error::{Error, Result};
use crate::model::SavedLink;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::time::Duration;

/// SQLite-based storage backend.
#[derive(Debug)]
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open a database at the given path.
    ///
    /// Creates the database and applies schema if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or schema fails.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_timeout(path, None)
    }

    /// Open a database with an optional busy timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or schema fails.
    pub fn open_with_timeout(path: &Path, timeout_ms: Option<u64>) -> Result<Self> {
        let conn = Connection::open(path)?;

        if let Some(timeout) = timeout_ms {
            conn.busy_timeout(Duration::from_millis(timeout))?;
        } else {
            // Default 5 second timeout
            conn.busy_timeout(Duration::from_secs(5))?;
        }

        super::schema::apply_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        super::schema::apply_schema(&conn)?;
        Ok(Self { conn })
    }

    // ==================
    // Settings Operations
    // ==================

    /// Upsert a setting. No error if the key had no prior value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn put_setting(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![key, value],
        )?;
        Ok(())
    }

    /// Read a setting, `None` when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    // ==================
    // Link Operations
    // ==================

    /// Insert a link, assigning a fresh id and the creation timestamp.
    ///
    /// Returns the assigned id. Underlying engine failures (disk, quota)
    /// propagate uninterpreted.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn add_link(&mut self, url: &str, title: &str, summary: &str, tags: &[String]) -> Result<i64> {
        let timestamp = chrono::Utc::now().to_rfc3339();
        let tags_json = serde_json::to_string(tags)?;

        self.conn.execute(
            "INSERT INTO links (url, title, summary, timestamp, tags)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![url, title, summary, timestamp, tags_json],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    /// Insert a link only if no record with the exact URL string exists.
    ///
    /// Lookup and insert run inside one IMMEDIATE transaction, so two
    /// concurrent saves of the same URL cannot both get through: the
    /// write lock serializes them and the loser sees the winner's row.
    ///
    /// Returns `Some(id)` on insert, `None` when the URL was already present.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails.
    pub fn insert_link_if_absent(
        &mut self,
        url: &str,
        title: &str,
        summary: &str,
        tags: &[String],
    ) -> Result<Option<i64>> {
        let timestamp = chrono::Utc::now().to_rfc3339();
        let tags_json = serde_json::to_string(tags)?;

        let tx = self
            .conn
            .transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;

        let existing: Option<i64> = tx
            .query_row("SELECT id FROM links WHERE url = ?1 LIMIT 1", [url], |row| {
                row.get(0)
            })
            .optional()?;

        if existing.is_some() {
            tx.commit()?;
            return Ok(None);
        }

        tx.execute(
            "INSERT INTO links (url, title, summary, timestamp, tags)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![url, title, summary, timestamp, tags_json],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Some(id))
    }

    /// List all links, newest first.
    ///
    /// Ordered by insertion order (`id DESC`), not by timestamp
    /// comparison; insertion order is the reliable proxy here.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_links(&self) -> Result<Vec<SavedLink>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, url, title, summary, timestamp, tags
             FROM links ORDER BY id DESC",
        )?;

        let rows = stmt.query_map([], row_to_link)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    /// Delete a link by id. Succeeds silently if the id is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete statement fails.
    pub fn delete_link(&mut self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM links WHERE id = ?1", [id])?;
        Ok(())
    }

    /// Find the first link whose URL exactly equals the argument.
    ///
    /// Exact string match only: no normalization, no case folding.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_by_url(&self, url: &str) -> Result<Option<SavedLink>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, url, title, summary, timestamp, tags
             FROM links WHERE url = ?1 ORDER BY id LIMIT 1",
        )?;

        let link = stmt.query_row([url], row_to_link).optional()?;
        Ok(link)
    }

    /// Count saved links.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_links(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM links", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}

fn row_to_link(row: &rusqlite::Row<'_>) -> rusqlite::Result<SavedLink> {
    let tags_json: String = row.get(5)?;
    Ok(SavedLink {
        id: row.get(0)?,
        url: row.get(1)?,
        title: row.get(2)?,
        summary: row.get(3)?,
        timestamp: row.get(4)?,
        // Tolerate hand-edited rows: bad tags JSON degrades to empty
        tags: serde_json::from_str(&tags_json).unwrap_or_default(),
    })
}
