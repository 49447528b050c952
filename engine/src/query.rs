use crate::fuzzy::FuzzyMatcher;
use crate::index::InvertedIndex;
use crate::synonyms::{expand, Thesaurus};
use crate::DocId;
use std::collections::BTreeSet;

/// Turns normalized query tokens into the set of candidate documents.
pub struct QueryResolver<'a> {
    pub index: &'a InvertedIndex,
    pub thesaurus: &'a dyn Thesaurus,
    pub matcher: FuzzyMatcher,
    /// Upper bound on keys scanned per fuzzy lookup.
    pub max_fuzzy_keys: Option<usize>,
}

impl<'a> QueryResolver<'a> {
    /// Expand `tokens` with synonyms and collect every document any term reaches.
    ///
    /// Terms that are not index keys fall back to fuzzy matching against the
    /// whole vocabulary, which costs O(distinct tokens) per such term. Every key
    /// at or above the cutoff contributes, not only the closest one.
    pub fn resolve(&self, tokens: &[String]) -> BTreeSet<DocId> {
        let mut results = BTreeSet::new();
        if tokens.is_empty() {
            return results;
        }
        let expanded = expand(self.thesaurus, tokens);
        for term in &expanded {
            if let Some(ids) = self.index.get(term) {
                results.extend(ids.iter().copied());
                continue;
            }
            let close = self.close_keys(term);
            if !close.is_empty() {
                tracing::debug!(term = %term, matches = ?close, "fuzzy fallback");
            }
            for key in close {
                if let Some(ids) = self.index.get(key) {
                    results.extend(ids.iter().copied());
                }
            }
        }
        tracing::debug!(tokens = tokens.len(), expanded = expanded.len(), candidates = results.len(), "resolved query");
        results
    }

    fn close_keys(&self, term: &str) -> Vec<&'a str> {
        let limit = self.max_fuzzy_keys.unwrap_or(usize::MAX);
        self.index
            .keys()
            .take(limit)
            .filter(|key| self.matcher.is_close(term, key))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Corpus, Document};
    use crate::synonyms::SenseInventory;
    use crate::tokenizer::{normalize, Normalizer};

    fn index() -> InvertedIndex {
        let corpus = Corpus::from_documents(vec![
            Document::new(1, "Risk management"),
            Document::new(2, "Electrical hazards"),
            Document::new(3, "Compliance audits"),
        ])
        .unwrap();
        InvertedIndex::build(&corpus, &Normalizer::default())
    }

    #[test]
    fn exact_synonym_and_fuzzy_paths() {
        let index = index();
        let inv = SenseInventory::parse("n risk hazard").unwrap();
        let resolver = QueryResolver { index: &index, thesaurus: &inv, matcher: FuzzyMatcher::default(), max_fuzzy_keys: None };

        assert_eq!(resolver.resolve(&normalize("risk")), BTreeSet::from([1, 2]));
        assert_eq!(resolver.resolve(&normalize("complience")), BTreeSet::from([3]));
        assert!(resolver.resolve(&normalize("")).is_empty());
        assert!(resolver.resolve(&normalize("zzzz")).is_empty());
    }

    #[test]
    fn key_budget_scans_the_sorted_prefix() {
        let index = index();
        let inv = SenseInventory::new();
        let resolver = QueryResolver { index: &index, thesaurus: &inv, matcher: FuzzyMatcher::new(0.0), max_fuzzy_keys: Some(1) };
        // cutoff 0 accepts anything, so only the budget bounds the result;
        // the first key in sorted order is "audit" (doc 3)
        assert_eq!(resolver.resolve(&normalize("qqq")), BTreeSet::from([3]));
    }

    #[test]
    fn every_close_key_contributes() {
        let corpus = Corpus::from_documents(vec![
            Document::new(1, "abcde"),
            Document::new(2, "abcdf"),
            Document::new(3, "zzzzz"),
        ])
        .unwrap();
        let index = InvertedIndex::build(&corpus, &Normalizer::default());
        let inv = SenseInventory::new();
        let resolver = QueryResolver { index: &index, thesaurus: &inv, matcher: FuzzyMatcher::default(), max_fuzzy_keys: None };
        assert_eq!(resolver.resolve(&["abcdx".to_string()]), BTreeSet::from([1, 2]));
    }
}
