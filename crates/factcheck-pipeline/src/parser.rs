//! Parse raw model output into a verdict
//!
//! Two pure stages: `strip_code_fence` (raw text → cleaned text) and
//! `decode_verdict` (cleaned text → structured result). Any structural
//! mismatch fails the whole request; nothing is partially recovered.

use crate::error::PipelineError;
use factcheck_domain::VerdictResult;
use serde::Deserialize;

const FENCE: &str = "```";

/// Fields the instruction template asks the model to emit
#[derive(Debug, Deserialize)]
struct RawVerdict {
    verdict: String,
    confidence: String,
    reason: String,
    additional_context: String,
}

/// Remove a surrounding markdown code fence and outer whitespace
///
/// Handles an optional language tag on the opener (```` ```json ````).
/// Opener and closer are stripped independently; text without a fence is
/// only trimmed.
pub fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(after_opener) = text.strip_prefix(FENCE) {
        // Skip the language tag, if any
        text = after_opener.trim_start_matches(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    }
    // A closer is removed even without an opener
    if let Some(before_closer) = text.trim_end().strip_suffix(FENCE) {
        text = before_closer;
    }

    text.trim()
}

/// Decode cleaned model output into a verdict with no sources attached
///
/// # Errors
///
/// Returns [`PipelineError::Parse`] carrying `cleaned` when the text is not a
/// JSON object with the four required string fields, or when `verdict` or
/// `confidence` is blank.
pub fn decode_verdict(cleaned: &str) -> Result<VerdictResult, PipelineError> {
    let raw: RawVerdict = serde_json::from_str(cleaned).map_err(|e| PipelineError::Parse {
        message: format!("Failed to decode model output: {}", e),
        raw: cleaned.to_string(),
    })?;

    if raw.verdict.trim().is_empty() {
        return Err(PipelineError::Parse {
            message: "verdict is empty".to_string(),
            raw: cleaned.to_string(),
        });
    }
    if raw.confidence.trim().is_empty() {
        return Err(PipelineError::Parse {
            message: "confidence is empty".to_string(),
            raw: cleaned.to_string(),
        });
    }

    Ok(VerdictResult {
        verdict: raw.verdict,
        confidence: raw.confidence,
        reason: raw.reason,
        additional_context: raw.additional_context,
        sources: Vec::new(),
    })
}

/// Strip any code fence, then decode
pub fn parse_model_output(raw: &str) -> Result<VerdictResult, PipelineError> {
    decode_verdict(strip_code_fence(raw))
}
