use crate::config::EngineConfig;
use crate::corpus::{Corpus, Document};
use crate::error::Result;
use crate::feedback::{FeedbackStore, HistoryEntry, SelectionRecord};
use crate::fuzzy::FuzzyMatcher;
use crate::index::InvertedIndex;
use crate::query::QueryResolver;
use crate::rank::{rank, Highlighter, SearchHit};
use crate::synonyms::{SenseInventory, Thesaurus};
use crate::tokenizer::Normalizer;
use crate::DocId;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct EngineStats {
    pub num_docs: u32,
    pub num_terms: usize,
    pub selections: usize,
}

/// Corpus, index and feedback behind one synchronous API.
///
/// The corpus and index never change after construction; only the feedback
/// store mutates, under its own lock, so an `Engine` can be shared across
/// threads behind an `Arc`.
pub struct Engine {
    corpus: Corpus,
    index: InvertedIndex,
    normalizer: Normalizer,
    thesaurus: Arc<dyn Thesaurus>,
    matcher: FuzzyMatcher,
    max_fuzzy_keys: Option<usize>,
    highlighter: Highlighter,
    feedback: FeedbackStore,
}

impl Engine {
    /// Build the index once from `corpus`, loading the sense inventory `config` names.
    pub fn build_index(corpus: Corpus, config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let thesaurus: Arc<dyn Thesaurus> = match &config.senses_path {
            Some(path) => Arc::new(SenseInventory::from_path(path)?),
            None => SenseInventory::embedded(),
        };
        Ok(Self::assemble(corpus, config, thesaurus))
    }

    /// Default configuration over `corpus`.
    pub fn new(corpus: Corpus) -> Self {
        Self::assemble(corpus, &EngineConfig::default(), SenseInventory::embedded())
    }

    /// Like [`Engine::build_index`], with a caller-supplied thesaurus.
    pub fn with_thesaurus(corpus: Corpus, config: &EngineConfig, thesaurus: Arc<dyn Thesaurus>) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(corpus, config, thesaurus))
    }

    fn assemble(corpus: Corpus, config: &EngineConfig, thesaurus: Arc<dyn Thesaurus>) -> Self {
        let normalizer = Normalizer::new(config.remove_stopwords);
        let index = InvertedIndex::build(&corpus, &normalizer);
        Self {
            corpus,
            index,
            normalizer,
            thesaurus,
            matcher: FuzzyMatcher::new(config.fuzzy_cutoff),
            max_fuzzy_keys: config.max_fuzzy_keys,
            highlighter: Highlighter::new(config.highlight_open.clone(), config.highlight_close.clone()),
            feedback: FeedbackStore::new(),
        }
    }

    /// Ranked, highlighted hits for `query`. Empty when the query has no tokens
    /// or nothing matches.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let tokens = self.normalizer.normalize(query);
        if tokens.is_empty() {
            return Vec::new();
        }
        let resolver = QueryResolver {
            index: &self.index,
            thesaurus: self.thesaurus.as_ref(),
            matcher: self.matcher,
            max_fuzzy_keys: self.max_fuzzy_keys,
        };
        let candidates = resolver.resolve(&tokens);
        let hits = rank(&candidates, &tokens, &self.corpus, &self.feedback, &self.highlighter);
        tracing::debug!(query, hits = hits.len(), "search complete");
        hits
    }

    /// Record a selection; the returned entry carries the score it produced.
    pub fn record_selection(&self, doc_id: DocId) -> Result<HistoryEntry> {
        self.feedback.select(doc_id, &self.corpus)
    }

    pub fn export_history(&self) -> Vec<SelectionRecord> {
        self.feedback.history()
    }

    /// History with each document's current score, ready for a report writer.
    pub fn export_report(&self) -> Vec<HistoryEntry> {
        self.feedback.report()
    }

    pub fn score(&self, doc_id: DocId) -> u64 { self.feedback.score(doc_id) }

    pub fn document(&self, doc_id: DocId) -> Option<&Document> { self.corpus.get(doc_id) }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            num_docs: self.index.num_docs(),
            num_terms: self.index.num_terms(),
            selections: self.feedback.len(),
        }
    }
}
