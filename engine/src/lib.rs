//! In-memory document search with stemming, synonym expansion, a fuzzy
//! fallback for near-miss terms, and ranking boosted by selection feedback.

pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod feedback;
pub mod fuzzy;
pub mod index;
pub mod query;
pub mod rank;
pub mod synonyms;
pub mod tokenizer;

pub type DocId = u32;

pub use config::EngineConfig;
pub use corpus::{Corpus, Document};
pub use engine::{Engine, EngineStats};
pub use error::{EngineError, Result};
pub use feedback::{HistoryEntry, SelectionRecord};
pub use rank::SearchHit;
