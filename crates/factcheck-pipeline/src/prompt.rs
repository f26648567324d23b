//! Prompt composition for fact-checking
//!
//! The instruction template owns the output-format contract given to the
//! model. The pipeline only fills its two slots.

use crate::error::PipelineError;
use factcheck_domain::{EvidenceItem, Statement};
use std::path::Path;

/// Slot replaced by the serialized evidence block
pub const EVIDENCE_SLOT: &str = "{evidence}";

/// Slot replaced by the statement text
pub const STATEMENT_SLOT: &str = "{statement}";

/// Evidence block used when retrieval returned nothing
const NO_EVIDENCE: &str = "No evidence was retrieved.";

const BUILTIN_TEMPLATE: &str = include_str!("../prompts/fact_check_prompt.txt");

/// A validated instruction template, loaded once and read-only afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    text: String,
    has_evidence_slot: bool,
}

impl PromptTemplate {
    /// Validate template text
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Configuration`] if the text is blank or has
    /// no `{statement}` slot.
    pub fn new(text: impl Into<String>) -> Result<Self, PipelineError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(PipelineError::Configuration(
                "Instruction template is empty".to_string(),
            ));
        }
        if !text.contains(STATEMENT_SLOT) {
            return Err(PipelineError::Configuration(format!(
                "Instruction template has no {} slot",
                STATEMENT_SLOT
            )));
        }

        let has_evidence_slot = text.contains(EVIDENCE_SLOT);
        Ok(Self {
            text,
            has_evidence_slot,
        })
    }

    /// The template shipped with the crate
    pub fn builtin() -> Self {
        Self {
            text: BUILTIN_TEMPLATE.to_string(),
            has_evidence_slot: true,
        }
    }

    /// Read a template file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::Configuration(format!(
                "Failed to read template at {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::new(text)
    }

    /// Whether the template has its own `{evidence}` slot
    pub fn has_evidence_slot(&self) -> bool {
        self.has_evidence_slot
    }

    /// Raw template text
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Serialize evidence as one labeled line per item, in retrieval order
pub fn render_evidence(evidence: &[EvidenceItem]) -> String {
    if evidence.is_empty() {
        return NO_EVIDENCE.to_string();
    }

    evidence
        .iter()
        .map(|item| format!("Source: {}, Content: {}", item.url, item.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the generation prompt
///
/// Slots are filled in a single left-to-right pass, so slot text that appears
/// inside evidence or the statement is copied verbatim. Templates without an
/// `{evidence}` slot get the evidence block directly above the first
/// statement slot.
pub fn compose(template: &PromptTemplate, evidence: &[EvidenceItem], statement: &Statement) -> String {
    let evidence_block = render_evidence(evidence);
    let mut prompt = String::with_capacity(
        template.text.len() + evidence_block.len() + statement.as_str().len(),
    );
    let mut evidence_pending = !template.has_evidence_slot;
    let mut rest = template.text.as_str();

    while let Some(pos) = rest.find('{') {
        prompt.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix(EVIDENCE_SLOT) {
            prompt.push_str(&evidence_block);
            rest = after;
        } else if let Some(after) = tail.strip_prefix(STATEMENT_SLOT) {
            if evidence_pending {
                prompt.push_str(&evidence_block);
                prompt.push_str("\n\n");
                evidence_pending = false;
            }
            prompt.push_str(statement.as_str());
            rest = after;
        } else {
            prompt.push('{');
            rest = &tail[1..];
        }
    }
    prompt.push_str(rest);

    prompt
}
