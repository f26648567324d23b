//! Output formatting for the CLI.

use crate::error::Result;
use colored::*;
use factcheck_domain::{HistoryEntry, VerdictResult};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style, Width},
};

/// Width at which table cells wrap
const STATEMENT_COLUMN_WIDTH: usize = 48;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text and tables
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a fact-check result.
    pub fn format_verdict(&self, result: &VerdictResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Text => Ok(self.format_verdict_text(result)),
        }
    }

    fn format_verdict_text(&self, result: &VerdictResult) -> String {
        let mut lines = vec![
            format!(
                "{} {} (confidence: {})",
                self.bold("Verdict:"),
                self.verdict_label(&result.verdict),
                result.confidence
            ),
            String::new(),
            format!("{} {}", self.bold("Reason:"), result.reason),
        ];

        if !result.additional_context.is_empty() {
            lines.push(format!("{} {}", self.bold("Context:"), result.additional_context));
        }

        if !result.sources.is_empty() {
            lines.push(String::new());
            lines.push(self.bold("Sources:"));
            for (i, source) in result.sources.iter().enumerate() {
                lines.push(format!("  {}. {} <{}>", i + 1, source.title, source.url));
            }
        }

        lines.join("\n")
    }

    /// Format history entries.
    pub fn format_history(&self, entries: &[HistoryEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
            OutputFormat::Text => Ok(self.format_history_table(entries)),
        }
    }

    fn format_history_table(&self, entries: &[HistoryEntry]) -> String {
        if entries.is_empty() {
            return self.colorize("No fact-checks found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Statement", "Verdict", "Confidence", "Sources", "Checked At"]);

        for entry in entries {
            builder.push_record([
                entry.id.map(|id| id.to_string()).unwrap_or_default(),
                entry.statement.clone(),
                entry.result.verdict.clone(),
                entry.result.confidence.clone(),
                entry.result.sources.len().to_string(),
                entry.created_at.to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()))
            .with(Modify::new(Rows::new(1..)).with(Width::wrap(STATEMENT_COLUMN_WIDTH)));

        table.to_string()
    }

    fn verdict_label(&self, verdict: &str) -> String {
        let color = match verdict.to_lowercase().as_str() {
            "true" => "green",
            "false" => "red",
            _ => "yellow",
        };
        self.colorize(verdict, color)
    }

    fn bold(&self, text: &str) -> String {
        if self.color_enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
