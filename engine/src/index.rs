use crate::corpus::Corpus;
use crate::tokenizer::Normalizer;
use crate::DocId;
use std::collections::BTreeMap;

/// Token → ids of the documents containing it.
///
/// A document id is appended once per occurrence, so a token repeated inside a
/// document shows up repeatedly in its list. Callers treat the lists as
/// presence information only. Keys iterate in sorted order.
#[derive(Debug, Default, Clone)]
pub struct InvertedIndex {
    postings: BTreeMap<String, Vec<DocId>>,
    num_docs: u32,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Build the index over every document of the corpus, in ascending id order.
    pub fn build(corpus: &Corpus, normalizer: &Normalizer) -> Self {
        let mut index = Self::new();
        for doc in corpus.iter() {
            for token in normalizer.normalize(&doc.content) {
                index.postings.entry(token).or_default().push(doc.id);
            }
            index.num_docs += 1;
        }
        tracing::info!(num_docs = index.num_docs, num_terms = index.postings.len(), "built inverted index");
        index
    }

    pub fn get(&self, token: &str) -> Option<&[DocId]> {
        self.postings.get(token).map(Vec::as_slice)
    }

    pub fn contains(&self, token: &str) -> bool { self.postings.contains_key(token) }

    /// Every distinct token in the index, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(String::as_str)
    }

    pub fn num_terms(&self) -> usize { self.postings.len() }

    pub fn num_docs(&self) -> u32 { self.num_docs }

    pub fn is_empty(&self) -> bool { self.postings.is_empty() }
}
