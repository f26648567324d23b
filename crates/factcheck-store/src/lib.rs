//! FactCheck Storage Layer
//!
//! Implements the `HistoryStore` trait on SQLite.
//!
//! # Examples
//!
//! ```no_run
//! use factcheck_store::SqliteHistoryStore;
//!
//! let store = SqliteHistoryStore::new(":memory:").unwrap();
//! // Store is now ready to record fact-checks
//! ```

#![warn(missing_docs)]

use factcheck_domain::traits::HistoryStore;
use factcheck_domain::{HistoryEntry, Source, VerdictResult};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-based implementation of HistoryStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Share one store behind a
/// `Mutex` or give each thread its own instance.
pub struct SqliteHistoryStore {
    conn: Connection,
}

impl SqliteHistoryStore {
    /// Create a new SqliteHistoryStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Number of stored fact-checks
    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM fact_checks", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<HistoryEntry> {
        let sources_json: String = row.get(6)?;
        let sources: Vec<Source> = serde_json::from_str(&sources_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(HistoryEntry {
            id: Some(row.get(0)?),
            statement: row.get(1)?,
            result: VerdictResult {
                verdict: row.get(2)?,
                confidence: row.get(3)?,
                reason: row.get(4)?,
                additional_context: row.get(5)?,
                sources,
            },
            created_at: row.get::<_, i64>(7)? as u64,
        })
    }
}

impl HistoryStore for SqliteHistoryStore {
    type Error = StoreError;

    fn record(&mut self, entry: &HistoryEntry) -> Result<i64, Self::Error> {
        let sources_json = serde_json::to_string(&entry.result.sources)
            .map_err(|e| StoreError::InvalidData(format!("Failed to encode sources: {}", e)))?;

        self.conn.execute(
            "INSERT INTO fact_checks (statement, verdict, confidence, reason, additional_context, sources_json, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                &entry.statement,
                &entry.result.verdict,
                &entry.result.confidence,
                &entry.result.reason,
                &entry.result.additional_context,
                &sources_json,
                entry.created_at as i64,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn recent(&self, limit: Option<usize>) -> Result<Vec<HistoryEntry>, Self::Error> {
        let mut sql = String::from(
            "SELECT id, statement, verdict, confidence, reason, additional_context, sources_json, created_at
             FROM fact_checks ORDER BY created_at DESC, id DESC",
        );
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(limit) = limit {
            sql.push_str(" LIMIT ?");
            params.push(Box::new(limit as i64));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let entries = stmt
            .query_map(&param_refs[..], Self::row_to_entry)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }
}
