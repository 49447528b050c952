use crate::corpus::Corpus;
use crate::error::{EngineError, Result};
use crate::DocId;
use parking_lot::Mutex;
use serde::{ser::Error as _, Serialize, Serializer};
use std::collections::HashMap;
use time::macros::format_description;
use time::OffsetDateTime;

/// One "document selected" event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionRecord {
    pub doc_id: DocId,
    /// Document text at the time of selection.
    pub content: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub selected_at: OffsetDateTime,
}

impl SelectionRecord {
    pub fn timestamp(&self) -> std::result::Result<String, time::error::Format> {
        format_timestamp(self.selected_at)
    }
}

/// A selection together with a score for its document: the score the selection
/// produced when returned from [`FeedbackStore::select`], the current score in
/// [`FeedbackStore::report`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub record: SelectionRecord,
    pub score: u64,
}

/// `YYYY-MM-DD HH:MM:SS`
pub fn format_timestamp(at: OffsetDateTime) -> std::result::Result<String, time::error::Format> {
    at.format(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))
}

fn serialize_timestamp<S: Serializer>(at: &OffsetDateTime, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    let formatted = format_timestamp(*at).map_err(S::Error::custom)?;
    serializer.serialize_str(&formatted)
}

#[derive(Debug, Default)]
struct FeedbackState {
    scores: HashMap<DocId, u64>,
    history: Vec<SelectionRecord>,
}

/// Selection counts and the append-only selection history.
///
/// Both live behind one lock so a selection's increment and append are seen
/// together by readers.
#[derive(Debug, Default)]
pub struct FeedbackStore {
    state: Mutex<FeedbackState>,
}

impl FeedbackStore {
    pub fn new() -> Self { Self::default() }

    /// Count a selection of `doc_id` and append it to the history, returning the
    /// record with the score this selection brought the document to.
    ///
    /// Ids outside the corpus fail with [`EngineError::UnknownDocument`] and leave
    /// the store untouched.
    pub fn select(&self, doc_id: DocId, corpus: &Corpus) -> Result<HistoryEntry> {
        let Some(doc) = corpus.get(doc_id) else {
            tracing::warn!(doc_id, "selection of unknown document");
            return Err(EngineError::UnknownDocument(doc_id));
        };
        let record = SelectionRecord {
            doc_id,
            content: doc.content.clone(),
            selected_at: OffsetDateTime::now_utc(),
        };
        let score = {
            let mut state = self.state.lock();
            let score = state.scores.entry(doc_id).or_insert(0);
            *score += 1;
            let score = *score;
            state.history.push(record.clone());
            score
        };
        tracing::info!(doc_id, score, "recorded selection");
        Ok(HistoryEntry { record, score })
    }

    pub fn score(&self, doc_id: DocId) -> u64 {
        self.state.lock().scores.get(&doc_id).copied().unwrap_or(0)
    }

    /// Snapshot of the history, oldest first.
    pub fn history(&self) -> Vec<SelectionRecord> {
        self.state.lock().history.clone()
    }

    /// History entries paired with each document's current score.
    pub fn report(&self) -> Vec<HistoryEntry> {
        let state = self.state.lock();
        state
            .history
            .iter()
            .map(|r| HistoryEntry { record: r.clone(), score: state.scores.get(&r.doc_id).copied().unwrap_or(0) })
            .collect()
    }

    pub fn len(&self) -> usize { self.state.lock().history.len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Document;

    fn corpus() -> Corpus {
        Corpus::from_documents(vec![Document::new(1, "first"), Document::new(2, "second")]).unwrap()
    }

    #[test]
    fn repeated_selection_accumulates() {
        let store = FeedbackStore::new();
        let c = corpus();
        store.select(1, &c).unwrap();
        store.select(1, &c).unwrap();
        store.select(2, &c).unwrap();
        assert_eq!(store.score(1), 2);
        assert_eq!(store.score(2), 1);
        let history = store.history();
        assert_eq!(history.iter().map(|r| r.doc_id).collect::<Vec<_>>(), vec![1, 1, 2]);
        assert_eq!(history[0].content, "first");
    }

    #[test]
    fn unknown_document_leaves_state_alone() {
        let store = FeedbackStore::new();
        let c = corpus();
        store.select(1, &c).unwrap();
        let err = store.select(9999, &c).unwrap_err();
        assert!(matches!(err, EngineError::UnknownDocument(9999)));
        assert_eq!(store.score(9999), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn report_uses_current_scores() {
        let store = FeedbackStore::new();
        let c = corpus();
        store.select(1, &c).unwrap();
        store.select(1, &c).unwrap();
        let report = store.report();
        assert!(report.iter().all(|entry| entry.score == 2));
    }

    #[test]
    fn select_returns_the_score_it_produced() {
        let store = FeedbackStore::new();
        let c = corpus();
        assert_eq!(store.select(1, &c).unwrap().score, 1);
        assert_eq!(store.select(2, &c).unwrap().score, 1);
        assert_eq!(store.select(1, &c).unwrap().score, 2);
    }

    #[test]
    fn concurrent_selections_stay_consistent() {
        let store = FeedbackStore::new();
        let c = corpus();
        let (shared, c) = (&store, &c);
        let mut scores: Vec<u64> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(move || (0..100).map(|_| shared.select(1, c).unwrap().score).collect::<Vec<_>>()))
                .collect();
            handles.into_iter().flat_map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(store.score(1), 800);
        assert_eq!(store.history().len(), 800);
        let report = store.report();
        assert_eq!(report.len(), 800);
        assert!(report.iter().all(|entry| entry.score == 800));
        // each increment was paired with exactly one append
        scores.sort_unstable();
        assert_eq!(scores, (1..=800).collect::<Vec<u64>>());
    }

    #[test]
    fn timestamp_format() {
        let at = time::macros::datetime!(2024-03-05 07:08:09 UTC);
        assert_eq!(format_timestamp(at).unwrap(), "2024-03-05 07:08:09");
    }

    #[test]
    fn records_serialize_with_formatted_timestamp() {
        let record = SelectionRecord {
            doc_id: 1,
            content: "first".into(),
            selected_at: time::macros::datetime!(2024-03-05 07:08:09 UTC),
        };
        let json = serde_json::to_value(HistoryEntry { record, score: 4 }).unwrap();
        assert_eq!(json["selected_at"], "2024-03-05 07:08:09");
        assert_eq!(json["score"], 4);
    }
}
