//! The statement submitted for fact-checking

use std::fmt;
use thiserror::Error;

/// Upper bound on statement length, in characters
pub const MAX_STATEMENT_CHARS: usize = 2_000;

/// Reasons a statement is rejected before the pipeline runs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatementError {
    /// Empty or whitespace-only input
    #[error("Statement cannot be empty")]
    Empty,

    /// Input longer than [`MAX_STATEMENT_CHARS`]
    #[error("Statement too long: {len} chars (max: {max})")]
    TooLong {
        /// Character count of the rejected input
        len: usize,
        /// Configured maximum
        max: usize,
    },
}

/// A non-empty, trimmed natural-language claim
///
/// # Examples
///
/// ```
/// use factcheck_domain::Statement;
///
/// let s = Statement::new("  The Eiffel Tower is in Berlin.  ").unwrap();
/// assert_eq!(s.as_str(), "The Eiffel Tower is in Berlin.");
///
/// assert!(Statement::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Statement(String);

impl Statement {
    /// Validate and wrap a statement
    pub fn new(text: impl AsRef<str>) -> Result<Self, StatementError> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(StatementError::Empty);
        }

        let len = trimmed.chars().count();
        if len > MAX_STATEMENT_CHARS {
            return Err(StatementError::TooLong {
                len,
                max: MAX_STATEMENT_CHARS,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Borrow the statement text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the statement, returning the inner text
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for Statement {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
