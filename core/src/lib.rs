//! In-memory full-text search over caller-identified documents.
//!
//! Documents are indexed into mirrored word→document and document→word
//! postings, queried with plus/minus words, scored by TF-IDF and ranked
//! top-K. Every query operation runs either sequentially or across the rayon
//! worker pool, selected per call with [`ExecutionMode`].

pub mod concurrent_map;
pub mod config;
pub mod document;
pub mod duplicates;
pub mod error;
pub mod execution;
pub mod index;
pub mod paginator;
pub mod postings;
pub mod process_queries;
pub mod query;
pub mod ranking;
pub mod request_queue;
pub mod server;
pub mod tokenizer;

pub use concurrent_map::ConcurrentMap;
pub use document::{Document, DocumentId, DocumentRecord, DocumentStatus};
pub use error::ValidationError;
pub use execution::ExecutionMode;
pub use server::{DocumentPredicate, MatchResult, SearchServer};
