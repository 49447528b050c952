use crate::corpus::Corpus;
use crate::feedback::FeedbackStore;
use crate::DocId;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    /// Document text with matching words wrapped in highlight markers.
    pub content: String,
    pub score: u64,
}

/// Wraps whole words that contain a query token.
#[derive(Debug, Clone)]
pub struct Highlighter {
    open: String,
    close: String,
}

impl Default for Highlighter {
    fn default() -> Self { Self::new("*", "*") }
}

impl Highlighter {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self { open: open.into(), close: close.into() }
    }

    /// Rebuild `content` word by word (whitespace split). A hit renders as
    /// `" {open} {word} {close} "`, any other word as `" {word}"`.
    pub fn highlight(&self, content: &str, tokens: &[String]) -> String {
        let mut out = String::with_capacity(content.len() + 16);
        for word in content.split_whitespace() {
            let lower = word.to_lowercase();
            if tokens.iter().any(|t| lower.contains(t.as_str())) {
                out.push(' ');
                out.push_str(&self.open);
                out.push(' ');
                out.push_str(word);
                out.push(' ');
                out.push_str(&self.close);
                out.push(' ');
            } else {
                out.push(' ');
                out.push_str(word);
            }
        }
        out
    }
}

/// Literal term-frequency part of a document's score.
///
/// Each normalized token (duplicates included) adds its number of
/// non-overlapping occurrences in the lower-cased content, so stems also hit
/// inside longer words.
pub fn term_score(content: &str, tokens: &[String]) -> u64 {
    let lower = content.to_lowercase();
    tokens.iter().map(|t| lower.matches(t.as_str()).count() as u64).sum()
}

/// Score, order and highlight the candidates.
///
/// Highest score first; equal scores keep ascending doc id order.
pub fn rank(
    candidates: &BTreeSet<DocId>,
    tokens: &[String],
    corpus: &Corpus,
    feedback: &FeedbackStore,
    highlighter: &Highlighter,
) -> Vec<SearchHit> {
    let mut scored: Vec<(u64, DocId, &str)> = candidates
        .iter()
        .filter_map(|id| corpus.get(*id))
        .map(|doc| (feedback.score(doc.id) + term_score(&doc.content, tokens), doc.id, doc.content.as_str()))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    scored
        .into_iter()
        .map(|(score, doc_id, content)| SearchHit { doc_id, content: highlighter.highlight(content, tokens), score })
        .collect()
}
