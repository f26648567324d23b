//! FactCheck Pipeline
//!
//! Retrieval-augmented fact checking: live web evidence is placed in front of
//! a language model which must answer with a fixed JSON verdict.
//!
//! # Architecture
//!
//! ```text
//! Statement → Search → Prompt → Generation → Parser → VerdictResult
//! ```
//!
//! Each outbound call runs under its own deadline. The `sources` of every
//! result are rebuilt from the retrieved evidence, never taken from the model.
//!
//! # Example Usage
//!
//! ```no_run
//! use factcheck_pipeline::{FactChecker, PipelineConfig, PromptTemplate};
//! use factcheck_llm::MockProvider;
//! use factcheck_search::MockSearchProvider;
//! use factcheck_domain::EvidenceItem;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let search = MockSearchProvider::new(vec![EvidenceItem::new(
//!     "Eiffel Tower",
//!     "https://en.wikipedia.org/wiki/Eiffel_Tower",
//!     "The Eiffel Tower is in Paris.",
//!     0.95,
//! )]);
//! let llm = MockProvider::new(
//!     r#"{"verdict":"True","confidence":"High","reason":"...","additional_context":"..."}"#,
//! );
//!
//! let checker = FactChecker::new(search, llm, PromptTemplate::builtin(), PipelineConfig::default())?;
//! let result = checker.check("The Eiffel Tower is in Paris").await?;
//!
//! println!("{} ({})", result.verdict, result.confidence);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod checker;
mod config;
mod error;
mod parser;
mod prompt;

#[cfg(test)]
mod tests;

pub use checker::{FactCheck, FactChecker, NoHistory};
pub use config::PipelineConfig;
pub use error::{PipelineError, Stage};
pub use parser::{decode_verdict, parse_model_output, strip_code_fence};
pub use prompt::{compose, render_evidence, PromptTemplate, EVIDENCE_SLOT, STATEMENT_SLOT};
