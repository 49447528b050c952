use anyhow::Result;
use clap::ValueEnum;
use engine::{HistoryEntry, SearchHit};
use std::fmt::Write as _;

pub const NO_RESULTS: &str = "No results found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

/// Search results the way the interactive prompt shows them.
pub fn render_hits(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return format!("{NO_RESULTS}\n");
    }
    let mut out = String::new();
    for hit in hits {
        let _ = writeln!(out, "Document ID: {} (Score: {})", hit.doc_id, hit.score);
        let _ = writeln!(out, "{}\n", hit.content);
    }
    out
}

/// Selection history report; each entry carries the document's current score.
pub fn render_history(entries: &[HistoryEntry], format: Format) -> Result<String> {
    match format {
        Format::Json => Ok(serde_json::to_string_pretty(entries)?),
        Format::Text => {
            let mut out = String::from("Search Choices History\n\n");
            for entry in entries {
                let _ = writeln!(out, "Document ID: {} (Score: {})", entry.record.doc_id, entry.score);
                let _ = writeln!(out, "Selected at: {}", entry.record.timestamp()?);
                let _ = writeln!(out, "{}\n", entry.record.content);
            }
            Ok(out)
        }
    }
}
