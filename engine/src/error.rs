use crate::DocId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    /// A selection named a document that is not part of the corpus.
    #[error("unknown document: {0}")]
    UnknownDocument(DocId),

    /// Corpus ingestion saw the same id twice.
    #[error("duplicate document id: {0}")]
    DuplicateDocument(DocId),

    /// A line of a sense file could not be parsed.
    #[error("invalid sense entry on line {line}: {reason}")]
    InvalidSenseLine { line: usize, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
