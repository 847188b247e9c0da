use crate::document::DocumentId;
use thiserror::Error;

/// The single failure kind of the search engine.
///
/// Every variant is detected before any state is touched, so a failed call
/// leaves the index exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("document id must be non-negative, got {0}")]
    NegativeId(DocumentId),
    #[error("document with id {0} already exists")]
    DuplicateId(DocumentId),
    #[error("document text contains invalid characters")]
    InvalidDocumentText,
    #[error("query contains invalid characters")]
    InvalidQueryText,
    #[error("invalid minus word {0:?}")]
    InvalidMinusWord(String),
    #[error("stop word {0:?} contains invalid characters")]
    InvalidStopWord(String),
}
