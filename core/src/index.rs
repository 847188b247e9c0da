use crate::document::{DocumentId, DocumentRecord, DocumentStatus};
use crate::error::ValidationError;
use crate::execution::ExecutionMode;
use crate::postings::{DocumentFrequencies, Postings, WordFrequencies};
use crate::tokenizer::{is_valid_text, StopWords};
use std::collections::BTreeMap;

static NO_WORDS: WordFrequencies = BTreeMap::new();

/// Document records, their postings and the stop words applied to both.
///
/// Mutation goes through `&mut self`, so at most one add or remove can be in
/// flight while readers hold `&self`.
#[derive(Debug, Default)]
pub struct DocumentIndex {
    stop_words: StopWords,
    documents: BTreeMap<DocumentId, DocumentRecord>,
    postings: Postings,
}

impl DocumentIndex {
    pub fn new(stop_words: StopWords) -> Self {
        Self {
            stop_words,
            documents: BTreeMap::new(),
            postings: Postings::new(),
        }
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Validate and index a document. Nothing is modified when validation fails.
    pub fn add_document(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<(), ValidationError> {
        if id < 0 {
            return Err(ValidationError::NegativeId(id));
        }
        if self.documents.contains_key(&id) {
            return Err(ValidationError::DuplicateId(id));
        }
        if !is_valid_text(text) {
            return Err(ValidationError::InvalidDocumentText);
        }

        let words = self.stop_words.split_no_stop(text);
        self.postings.insert(id, &words);
        let record = DocumentRecord::new(status, ratings);
        self.documents.insert(id, record);
        tracing::debug!(id, words = words.len(), rating = record.rating, "document added");
        Ok(())
    }

    /// Remove a document and all its postings. Unknown ids are ignored.
    pub fn remove_document(&mut self, id: DocumentId, mode: ExecutionMode) -> bool {
        if self.documents.remove(&id).is_none() {
            return false;
        }
        self.postings.remove(id, mode);
        tracing::debug!(id, ?mode, "document removed");
        true
    }

    /// Term frequencies of a document; empty for an unknown id.
    pub fn word_frequencies(&self, id: DocumentId) -> &WordFrequencies {
        self.postings.words_of(id).unwrap_or(&NO_WORDS)
    }

    pub fn record(&self, id: DocumentId) -> Option<&DocumentRecord> {
        self.documents.get(&id)
    }

    pub fn contains(&self, id: DocumentId) -> bool {
        self.documents.contains_key(&id)
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Known ids in ascending order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.documents.keys().copied()
    }

    pub fn postings(&self) -> &Postings {
        &self.postings
    }

    /// `ln(total documents / documents containing the word)`.
    pub fn inverse_document_frequency(&self, docs: &DocumentFrequencies) -> f64 {
        (self.documents.len() as f64 / docs.len() as f64).ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_with(stop: &str) -> DocumentIndex {
        DocumentIndex::new(StopWords::from_text(stop).unwrap())
    }

    #[test]
    fn stop_words_are_not_indexed() {
        let mut index = index_with("a");
        index.add_document(1, "a b", DocumentStatus::Actual, &[1, 2]).unwrap();
        index.add_document(2, "a c", DocumentStatus::Actual, &[1, 2]).unwrap();
        assert!(!index.word_frequencies(1).contains_key("a"));
        assert!(index.postings().documents_with("a").is_none());
    }

    #[test]
    fn rejects_negative_id() {
        let mut index = index_with("");
        let err = index.add_document(-1, "cat", DocumentStatus::Actual, &[]).unwrap_err();
        assert_eq!(err, ValidationError::NegativeId(-1));
        assert_eq!(index.document_count(), 0);
    }

    #[test]
    fn rejects_duplicate_and_keeps_first_document() {
        let mut index = index_with("");
        index.add_document(1, "cat city", DocumentStatus::Actual, &[5]).unwrap();
        let err = index.add_document(1, "dog", DocumentStatus::Banned, &[1]).unwrap_err();
        assert_eq!(err, ValidationError::DuplicateId(1));
        assert_eq!(index.record(1).unwrap().rating, 5);
        assert_eq!(index.record(1).unwrap().status, DocumentStatus::Actual);
        assert!(index.word_frequencies(1).contains_key("cat"));
        assert!(index.postings().documents_with("dog").is_none());
    }

    #[test]
    fn rejects_control_characters() {
        let mut index = index_with("");
        let err = index.add_document(1, "big \u{1}dog", DocumentStatus::Actual, &[]).unwrap_err();
        assert_eq!(err, ValidationError::InvalidDocumentText);
        assert!(!index.contains(1));
    }

    #[test]
    fn document_of_only_stop_words_still_counts() {
        let mut index = index_with("in the");
        index.add_document(4, "in the", DocumentStatus::Actual, &[]).unwrap();
        assert_eq!(index.document_count(), 1);
        assert!(index.word_frequencies(4).is_empty());
    }

    #[test]
    fn unknown_id_has_empty_frequencies() {
        let index = index_with("");
        assert!(index.word_frequencies(17).is_empty());
    }

    #[test]
    fn remove_is_idempotent() {
        let mut index = index_with("");
        index.add_document(1, "cat", DocumentStatus::Actual, &[]).unwrap();
        index.add_document(2, "dog", DocumentStatus::Actual, &[]).unwrap();
        assert!(index.remove_document(1, ExecutionMode::Sequential));
        assert!(!index.remove_document(1, ExecutionMode::Parallel));
        assert_eq!(index.document_ids().collect::<Vec<_>>(), vec![2]);
        assert!(index.postings().is_consistent());
    }

    #[test]
    fn idf_uses_natural_log() {
        let mut index = index_with("");
        index.add_document(1, "a b c", DocumentStatus::Actual, &[]).unwrap();
        index.add_document(2, "a b", DocumentStatus::Actual, &[]).unwrap();
        let c = index.postings().documents_with("c").unwrap();
        assert!((index.inverse_document_frequency(c) - 2f64.ln()).abs() < 1e-12);
        let a = index.postings().documents_with("a").unwrap();
        assert_eq!(index.inverse_document_frequency(a), 0.0);
    }
}
