//! Semantic expansion of query tokens through a word-sense inventory.
//!
//! A sense is one meaning of a word together with every lemma that expresses
//! it. Looking a token up returns the lemmas of all senses it belongs to; those
//! lemmas are used verbatim as match keys, never stemmed.

use crate::error::{EngineError, Result};
use lazy_static::lazy_static;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::Arc;

lazy_static! {
    static ref EMBEDDED: Arc<SenseInventory> = Arc::new(
        SenseInventory::parse(include_str!("../data/senses.txt")).expect("embedded sense file is well-formed")
    );
}

/// Anything that can map a token to semantically related forms.
pub trait Thesaurus: Send + Sync {
    /// Related lemmas for `token`; empty when the token is unknown.
    fn synonyms(&self, token: &str) -> BTreeSet<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl PartOfSpeech {
    const ALL: [PartOfSpeech; 4] = [Self::Noun, Self::Verb, Self::Adjective, Self::Adverb];

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "n" => Some(Self::Noun),
            "v" => Some(Self::Verb),
            "a" | "s" => Some(Self::Adjective),
            "r" => Some(Self::Adverb),
            _ => None,
        }
    }

    /// Inflectional suffix rewrites used to reach a base form.
    fn detachment_rules(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Noun => &[
                ("s", ""), ("ses", "s"), ("xes", "x"), ("zes", "z"),
                ("ches", "ch"), ("shes", "sh"), ("men", "man"), ("ies", "y"),
            ],
            Self::Verb => &[
                ("s", ""), ("ies", "y"), ("es", "e"), ("es", ""),
                ("ed", "e"), ("ed", ""), ("ing", "e"), ("ing", ""),
            ],
            Self::Adjective => &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")],
            Self::Adverb => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sense {
    pub pos: PartOfSpeech,
    pub lemmas: Vec<String>,
}

/// In-memory word-sense database.
#[derive(Debug, Clone, Default)]
pub struct SenseInventory {
    senses: Vec<Sense>,
    by_lemma: HashMap<(String, PartOfSpeech), Vec<usize>>,
}

impl SenseInventory {
    pub fn new() -> Self { Self::default() }

    /// The inventory compiled into the crate.
    pub fn embedded() -> Arc<SenseInventory> { Arc::clone(&EMBEDDED) }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let inventory = Self::parse(&text)?;
        tracing::info!(path = %path.as_ref().display(), senses = inventory.len(), "loaded sense inventory");
        Ok(inventory)
    }

    /// Parse `<pos> <lemma> <lemma> ...` lines; blank lines and `#` comments are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut inventory = Self::new();
        for (n, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') { continue; }
            let mut fields = line.split_whitespace();
            let tag = fields.next().unwrap_or_default();
            let pos = PartOfSpeech::from_tag(tag).ok_or_else(|| EngineError::InvalidSenseLine {
                line: n + 1,
                reason: format!("unknown part of speech `{tag}`"),
            })?;
            let lemmas: Vec<String> = fields.map(str::to_lowercase).collect();
            if lemmas.is_empty() {
                return Err(EngineError::InvalidSenseLine { line: n + 1, reason: "sense has no lemmas".into() });
            }
            inventory.add_sense(Sense { pos, lemmas });
        }
        Ok(inventory)
    }

    pub fn add_sense(&mut self, sense: Sense) {
        let idx = self.senses.len();
        for lemma in &sense.lemmas {
            let slots = self.by_lemma.entry((lemma.clone(), sense.pos)).or_default();
            if !slots.contains(&idx) {
                slots.push(idx);
            }
        }
        self.senses.push(sense);
    }

    pub fn len(&self) -> usize { self.senses.len() }

    pub fn is_empty(&self) -> bool { self.senses.is_empty() }

    /// Every sense reachable from `word`, trying its base forms per part of speech.
    pub fn senses_of(&self, word: &str) -> Vec<&Sense> {
        let word = word.to_lowercase();
        let mut found: Vec<usize> = Vec::new();
        for pos in PartOfSpeech::ALL {
            let mut forms = vec![word.clone()];
            for (suffix, replacement) in pos.detachment_rules() {
                if let Some(stem) = word.strip_suffix(suffix) {
                    forms.push(format!("{stem}{replacement}"));
                }
            }
            for form in forms {
                if let Some(slots) = self.by_lemma.get(&(form, pos)) {
                    for &idx in slots {
                        if !found.contains(&idx) {
                            found.push(idx);
                        }
                    }
                }
            }
        }
        found.into_iter().map(|idx| &self.senses[idx]).collect()
    }
}

impl Thesaurus for SenseInventory {
    fn synonyms(&self, token: &str) -> BTreeSet<String> {
        self.senses_of(token)
            .into_iter()
            .flat_map(|sense| sense.lemmas.iter().cloned())
            .collect()
    }
}

/// The input tokens plus the synonyms of each one.
pub fn expand<T: Thesaurus + ?Sized>(thesaurus: &T, tokens: &[String]) -> BTreeSet<String> {
    let mut expanded: BTreeSet<String> = tokens.iter().cloned().collect();
    for token in tokens {
        expanded.extend(thesaurus.synonyms(token));
    }
    expanded
}
