//! FactCheck Domain Layer
//!
//! Core data model and capability interfaces for the fact-check pipeline.
//! Nothing in this crate performs I/O; providers and storage live in other crates.
//!
//! ## Key Concepts
//!
//! - **Statement**: The claim submitted for checking, never empty
//! - **Evidence Item**: One ranked web snippet with its provenance (title/URL)
//! - **Verdict Result**: The validated output contract handed back to callers
//! - **History Entry**: A persisted verdict, owned by the history collaborator
//!
//! ## Architecture
//!
//! ```text
//! Statement → SearchProvider → [EvidenceItem] → GenerationProvider → VerdictResult
//! ```
//!
//! The traits in [`traits`] are the seams where tests substitute deterministic fakes.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod evidence;
pub mod history;
pub mod statement;
pub mod traits;
pub mod verdict;

// Re-exports for convenience
pub use evidence::{EvidenceItem, Source};
pub use history::HistoryEntry;
pub use statement::{Statement, StatementError, MAX_STATEMENT_CHARS};
pub use verdict::VerdictResult;
