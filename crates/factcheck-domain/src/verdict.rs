//! The validated fact-check result

use crate::evidence::{EvidenceItem, Source};
use serde::{Deserialize, Serialize};

/// Final output of one fact-check
///
/// `verdict` and `confidence` come from a vocabulary defined by the
/// instruction template, so they are kept as text rather than enums.
/// `sources` is always rebuilt from retrieved evidence, one entry per item
/// in retrieval order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictResult {
    /// Classification, e.g. "True", "False", "Uncertain"
    pub verdict: String,

    /// Confidence level, e.g. "High", "Medium", "Low"
    pub confidence: String,

    /// Justification for the verdict
    pub reason: String,

    /// Clarifying facts beyond the verdict
    pub additional_context: String,

    /// Citations derived from the evidence the model was given
    #[serde(default)]
    pub sources: Vec<Source>,
}

impl VerdictResult {
    /// Replace `sources` with citations derived from `evidence`
    pub fn with_sources_from(mut self, evidence: &[EvidenceItem]) -> Self {
        self.sources = evidence.iter().map(Source::from).collect();
        self
    }
}
