//! Persisted fact-check records

use crate::verdict::VerdictResult;
use serde::{Deserialize, Serialize};

/// A verdict as stored by the history collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Row identifier, `None` until stored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// The statement that was checked
    pub statement: String,

    /// The verdict returned to the caller
    #[serde(flatten)]
    pub result: VerdictResult,

    /// Seconds since the Unix epoch
    pub created_at: u64,
}

impl HistoryEntry {
    /// Create an unsaved entry
    pub fn new(statement: impl Into<String>, result: VerdictResult, created_at: u64) -> Self {
        Self {
            id: None,
            statement: statement.into(),
            result,
            created_at,
        }
    }
}
