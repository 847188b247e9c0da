//! Search facade: indexing, ranked retrieval and per-document matching.

use crate::concurrent_map::ScoreMap;
use crate::document::{Document, DocumentId, DocumentStatus};
use crate::error::ValidationError;
use crate::execution::ExecutionMode;
use crate::index::DocumentIndex;
use crate::postings::WordFrequencies;
use crate::query::Query;
use crate::ranking::rank;
use crate::tokenizer::StopWords;
use std::collections::BTreeMap;

/// Decides whether a document may appear in search results.
///
/// Implemented for [`DocumentStatus`] (keep documents with that status) and
/// for any `Fn(DocumentId, DocumentStatus, i32) -> bool` taking id, status and
/// rating.
pub trait DocumentPredicate: Sync {
    fn matches(&self, id: DocumentId, status: DocumentStatus, rating: i32) -> bool;
}

impl DocumentPredicate for DocumentStatus {
    fn matches(&self, _id: DocumentId, status: DocumentStatus, _rating: i32) -> bool {
        status == *self
    }
}

impl<F> DocumentPredicate for F
where
    F: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
{
    fn matches(&self, id: DocumentId, status: DocumentStatus, rating: i32) -> bool {
        self(id, status, rating)
    }
}

/// Plus-words of a query found in one document, plus that document's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult<'s> {
    /// Sorted, without repeats. Empty when a minus-word matched.
    pub words: Vec<&'s str>,
    pub status: DocumentStatus,
}

/// In-memory TF-IDF search server.
///
/// `add_document` and `remove_document*` take `&mut self`; every query takes
/// `&self`. The borrow rules therefore allow any number of concurrent queries
/// or exactly one mutation. To share a server between threads that also
/// mutate it, wrap it in `parking_lot::RwLock`.
#[derive(Debug, Default)]
pub struct SearchServer {
    index: DocumentIndex,
}

impl SearchServer {
    pub fn new<I, S>(stop_words: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            index: DocumentIndex::new(StopWords::new(stop_words)?),
        })
    }

    /// Build from a space-separated list of stop words.
    pub fn from_stop_words_text(text: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            index: DocumentIndex::new(StopWords::from_text(text)?),
        })
    }

    pub fn add_document(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<(), ValidationError> {
        self.index.add_document(id, text, status, ratings)
    }

    pub fn remove_document(&mut self, id: DocumentId) {
        self.remove_document_in(ExecutionMode::Sequential, id);
    }

    /// Remove a document; a no-op for unknown ids.
    pub fn remove_document_in(&mut self, mode: ExecutionMode, id: DocumentId) {
        self.index.remove_document(id, mode);
    }

    /// Top documents with status [`DocumentStatus::Actual`].
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>, ValidationError> {
        self.find_top_documents_in(ExecutionMode::Sequential, raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by<P>(
        &self,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>, ValidationError>
    where
        P: DocumentPredicate,
    {
        self.find_top_documents_in(ExecutionMode::Sequential, raw_query, predicate)
    }

    /// Score every document against the query and return the best ranked ones.
    ///
    /// Results are identical in both modes up to floating-point summation order.
    pub fn find_top_documents_in<P>(
        &self,
        mode: ExecutionMode,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>, ValidationError>
    where
        P: DocumentPredicate,
    {
        let query = self.parse_query(mode, raw_query)?;
        let documents = self.find_all_documents(mode, &query, &predicate);
        Ok(rank(documents, mode))
    }

    /// Plus-words of the query present in document `id`, or `None` for an unknown id.
    pub fn match_document(
        &self,
        raw_query: &str,
        id: DocumentId,
    ) -> Result<Option<MatchResult<'_>>, ValidationError> {
        self.match_document_in(ExecutionMode::Sequential, raw_query, id)
    }

    pub fn match_document_in(
        &self,
        mode: ExecutionMode,
        raw_query: &str,
        id: DocumentId,
    ) -> Result<Option<MatchResult<'_>>, ValidationError> {
        let Some(record) = self.index.record(id) else {
            return Ok(None);
        };
        let status = record.status;
        let stop_words = self.index.stop_words();
        let query = match mode {
            ExecutionMode::Sequential => Query::parse(raw_query, stop_words)?,
            ExecutionMode::Parallel => Query::parse_unsorted(raw_query, stop_words)?,
        };

        let words = self.index.word_frequencies(id);
        if mode.any(&query.minus_words, |word| words.contains_key(*word)) {
            return Ok(Some(MatchResult {
                words: Vec::new(),
                status,
            }));
        }

        let mut matched: Vec<&str> = mode.filter_map(&query.plus_words, |word| {
            words.get_key_value(*word).map(|(key, _)| &**key)
        });
        mode.sort_dedup(&mut matched);
        Ok(Some(MatchResult {
            words: matched,
            status,
        }))
    }

    /// Term frequencies of a document; empty for an unknown id.
    pub fn word_frequencies(&self, id: DocumentId) -> &WordFrequencies {
        self.index.word_frequencies(id)
    }

    pub fn document_count(&self) -> usize {
        self.index.document_count()
    }

    /// Known ids in ascending order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.index.document_ids()
    }

    #[doc(hidden)]
    pub fn index(&self) -> &DocumentIndex {
        &self.index
    }

    fn parse_query<'q>(
        &self,
        mode: ExecutionMode,
        raw_query: &'q str,
    ) -> Result<Query<'q>, ValidationError> {
        let mut query = Query::parse_unsorted(raw_query, self.index.stop_words())?;
        // A repeated plus-word must contribute once, whatever the mode.
        query.dedup(mode);
        Ok(query)
    }

    /// Accumulate relevance for plus-words, then drop documents with minus-words.
    ///
    /// Sequential mode sums into a plain ordered map; parallel mode spreads the
    /// words over the pool and sums into a [`ScoreMap`].
    fn find_all_documents<P>(
        &self,
        mode: ExecutionMode,
        query: &Query<'_>,
        predicate: &P,
    ) -> Vec<Document>
    where
        P: DocumentPredicate,
    {
        let postings = self.index.postings();
        let relevance = match mode {
            ExecutionMode::Sequential => {
                let mut scores = BTreeMap::new();
                for word in &query.plus_words {
                    self.add_word_relevance(word, predicate, |id, relevance| {
                        *scores.entry(id).or_insert(0.0) += relevance;
                    });
                }
                for word in &query.minus_words {
                    if let Some(docs) = postings.documents_with(word) {
                        for id in docs.keys() {
                            scores.remove(id);
                        }
                    }
                }
                scores
            }
            ExecutionMode::Parallel => {
                let scores = ScoreMap::new();
                mode.for_each(&query.plus_words, |word| {
                    self.add_word_relevance(word, predicate, |id, relevance| {
                        *scores.access(id) += relevance;
                    });
                });

                // for_each has joined every accumulation task, so no plus-word
                // update can land after a minus-word erase below.
                mode.for_each(&query.minus_words, |word| {
                    if let Some(docs) = postings.documents_with(word) {
                        for &id in docs.keys() {
                            scores.erase(id);
                        }
                    }
                });
                scores.into_map()
            }
        };

        relevance
            .into_iter()
            .filter_map(|(id, relevance)| {
                self.index.record(id).map(|record| Document::new(id, relevance, record.rating))
            })
            .collect()
    }

    /// Feed `idf * tf` of `word` for every document passing `predicate` to `add`.
    fn add_word_relevance<P, F>(&self, word: &str, predicate: &P, mut add: F)
    where
        P: DocumentPredicate,
        F: FnMut(DocumentId, f64),
    {
        let Some(docs) = self.index.postings().documents_with(word) else {
            return;
        };
        let idf = self.index.inverse_document_frequency(docs);
        for (&id, &tf) in docs {
            let Some(record) = self.index.record(id) else {
                continue;
            };
            if predicate.matches(id, record.status, record.rating) {
                add(id, idf * tf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODES: [ExecutionMode; 2] = [ExecutionMode::Sequential, ExecutionMode::Parallel];

    fn cat_server() -> SearchServer {
        let mut server = SearchServer::from_stop_words_text("").unwrap();
        server
            .add_document(42, "cat in the city", DocumentStatus::Actual, &[1, 2, 3])
            .unwrap();
        server
    }

    #[test]
    fn minus_word_excludes_document() {
        let server = cat_server();
        for mode in MODES {
            let excluded = server.find_top_documents_in(mode, "cat -in", DocumentStatus::Actual);
            assert!(excluded.unwrap().is_empty());
            let found = server.find_top_documents_in(mode, "cat", DocumentStatus::Actual).unwrap();
            assert_eq!(found.len(), 1);
            assert_eq!(found[0].id, 42);
            assert_eq!(found[0].rating, 2);
        }
    }

    #[test]
    fn match_returns_sorted_plus_words() {
        let server = cat_server();
        for mode in MODES {
            let result = server.match_document_in(mode, "in cat cat dog", 42).unwrap().unwrap();
            assert_eq!(result.words, vec!["cat", "in"]);
            assert_eq!(result.status, DocumentStatus::Actual);
        }
    }

    #[test]
    fn match_with_minus_word_is_empty() {
        let server = cat_server();
        for mode in MODES {
            let result = server.match_document_in(mode, "-in cat", 42).unwrap().unwrap();
            assert!(result.words.is_empty());
            assert_eq!(result.status, DocumentStatus::Actual);
        }
    }

    #[test]
    fn match_unknown_id_skips_parsing() {
        let server = cat_server();
        assert_eq!(server.match_document("cat --bad", 7).unwrap(), None);
        assert!(server.match_document("cat --bad", 42).is_err());
    }

    #[test]
    fn repeated_plus_word_counts_once() {
        let mut server = cat_server();
        server.add_document(1, "dog", DocumentStatus::Actual, &[]).unwrap();
        for mode in MODES {
            let once = server.find_top_documents_in(mode, "cat", DocumentStatus::Actual).unwrap();
            let twice =
                server.find_top_documents_in(mode, "cat cat", DocumentStatus::Actual).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn closure_predicate_filters() {
        let mut server = SearchServer::from_stop_words_text("").unwrap();
        server.add_document(1, "a b c", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
        server.add_document(2, "a b", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
        let even_ids = |id: DocumentId, _: DocumentStatus, _: i32| id % 2 == 0;
        let found = server.find_top_documents_by("a b c", even_ids).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);
    }

    #[test]
    fn invalid_query_is_an_error() {
        let server = cat_server();
        for mode in MODES {
            let err =
                server.find_top_documents_in(mode, "cat -", DocumentStatus::Actual).unwrap_err();
            assert_eq!(err, ValidationError::InvalidMinusWord("-".into()));
        }
    }

    #[test]
    fn invalid_stop_words_fail_construction() {
        assert!(matches!(
            SearchServer::new(["ok", "bad\u{2}"]),
            Err(ValidationError::InvalidStopWord(_))
        ));
    }
}
