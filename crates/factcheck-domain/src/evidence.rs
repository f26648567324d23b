//! Retrieved evidence and the provenance distilled from it

use serde::{Deserialize, Serialize};

/// One ranked web snippet returned by the search provider
///
/// Items are immutable once retrieved and belong to a single pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    /// Page title
    pub title: String,

    /// Page URL
    pub url: String,

    /// Snippet text used to ground the verdict
    pub content: String,

    /// Provider-assigned relevance score (higher is more relevant)
    pub score: f64,
}

impl EvidenceItem {
    /// Create a new evidence item
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        content: impl Into<String>,
        score: f64,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            content: content.into(),
            score,
        }
    }
}

/// Citation attached to a verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Page title
    pub title: String,

    /// Page URL
    pub url: String,
}

impl From<&EvidenceItem> for Source {
    fn from(item: &EvidenceItem) -> Self {
        Self {
            title: item.title.clone(),
            url: item.url.clone(),
        }
    }
}
