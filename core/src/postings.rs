//! Mirrored word→document and document→word postings.
//!
//! Both views are private to [`Postings`] and only `insert` and `remove` touch
//! them, each updating the two sides together. Word keys are interned `Arc<str>`
//! shared by both views.

use crate::document::DocumentId;
use crate::execution::ExecutionMode;
use std::collections::BTreeMap;
use std::sync::Arc;

/// word → term frequency within one document.
pub type WordFrequencies = BTreeMap<Arc<str>, f64>;
/// document → term frequency of one word.
pub type DocumentFrequencies = BTreeMap<DocumentId, f64>;

#[derive(Debug, Default)]
pub struct Postings {
    by_word: BTreeMap<Arc<str>, DocumentFrequencies>,
    by_document: BTreeMap<DocumentId, WordFrequencies>,
}

impl Postings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the already filtered `words` of document `id`.
    ///
    /// Each occurrence adds `1 / words.len()` to the word's term frequency.
    /// `id` must not already be indexed.
    pub fn insert(&mut self, id: DocumentId, words: &[&str]) {
        debug_assert!(!self.by_document.contains_key(&id), "document {id} indexed twice");

        let mut counted: BTreeMap<&str, f64> = BTreeMap::new();
        if !words.is_empty() {
            let weight = 1.0 / words.len() as f64;
            for &word in words {
                *counted.entry(word).or_insert(0.0) += weight;
            }
        }

        let mut freqs = WordFrequencies::new();
        for (word, tf) in counted {
            let key = match self.by_word.get_key_value(word) {
                Some((key, _)) => Arc::clone(key),
                None => Arc::from(word),
            };
            self.by_word.entry(Arc::clone(&key)).or_default().insert(id, tf);
            freqs.insert(key, tf);
        }
        self.by_document.insert(id, freqs);
    }

    /// Drop every posting of `id`, pruning words left without documents.
    /// Returns false when `id` was not indexed.
    ///
    /// In parallel mode the affected word buckets are detached from the
    /// forward map and edited concurrently, then the non-empty ones are
    /// reattached.
    pub fn remove(&mut self, id: DocumentId, mode: ExecutionMode) -> bool {
        let Some(words) = self.by_document.remove(&id) else {
            return false;
        };

        match mode {
            ExecutionMode::Sequential => {
                for word in words.keys() {
                    if let Some(docs) = self.by_word.get_mut(word) {
                        docs.remove(&id);
                        if docs.is_empty() {
                            self.by_word.remove(word);
                        }
                    }
                }
            }
            ExecutionMode::Parallel => {
                let mut detached: Vec<(Arc<str>, DocumentFrequencies)> =
                    words.keys().filter_map(|word| self.by_word.remove_entry(word)).collect();
                mode.for_each_mut(&mut detached, |(_, docs)| {
                    docs.remove(&id);
                });
                self.by_word.extend(detached.into_iter().filter(|(_, docs)| !docs.is_empty()));
            }
        }
        true
    }

    pub fn documents_with(&self, word: &str) -> Option<&DocumentFrequencies> {
        self.by_word.get(word)
    }

    pub fn words_of(&self, id: DocumentId) -> Option<&WordFrequencies> {
        self.by_document.get(&id)
    }

    /// Number of distinct indexed words.
    pub fn vocabulary_len(&self) -> usize {
        self.by_word.len()
    }

    /// Check that both views describe the same set of postings with equal
    /// weights and that no word bucket is empty.
    #[doc(hidden)]
    pub fn is_consistent(&self) -> bool {
        let forward_ok = self.by_word.iter().all(|(word, docs)| {
            !docs.is_empty()
                && docs.iter().all(|(id, tf)| {
                    self.by_document.get(id).and_then(|words| words.get(word)) == Some(tf)
                })
        });
        let inverse_ok = self.by_document.iter().all(|(id, words)| {
            words
                .iter()
                .all(|(word, tf)| self.by_word.get(word).and_then(|docs| docs.get(id)) == Some(tf))
        });
        forward_ok && inverse_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODES: [ExecutionMode; 2] = [ExecutionMode::Sequential, ExecutionMode::Parallel];

    #[test]
    fn term_frequency_accumulates_repeats() {
        let mut postings = Postings::new();
        postings.insert(1, &["fluffy", "cat", "fluffy", "tail"]);
        let words = postings.words_of(1).unwrap();
        assert_eq!(words.get("fluffy"), Some(&0.5));
        assert_eq!(words.get("cat"), Some(&0.25));
        assert_eq!(postings.documents_with("tail").unwrap().get(&1), Some(&0.25));
        assert!(postings.is_consistent());
    }

    #[test]
    fn words_are_shared_between_views() {
        let mut postings = Postings::new();
        postings.insert(1, &["cat"]);
        postings.insert(2, &["cat", "dog"]);
        let (forward_key, _) = postings.by_word.get_key_value("cat").unwrap();
        let (inverse_key, _) = postings.words_of(2).unwrap().get_key_value("cat").unwrap();
        assert!(Arc::ptr_eq(forward_key, inverse_key));
    }

    #[test]
    fn empty_document_has_no_postings() {
        let mut postings = Postings::new();
        postings.insert(5, &[]);
        assert!(postings.words_of(5).unwrap().is_empty());
        assert_eq!(postings.vocabulary_len(), 0);
    }

    #[test]
    fn remove_prunes_empty_words() {
        for mode in MODES {
            let mut postings = Postings::new();
            postings.insert(0, &["hello", "world"]);
            postings.insert(1, &["hello", "rust"]);
            assert!(postings.remove(0, mode));
            assert!(postings.documents_with("world").is_none());
            assert_eq!(postings.documents_with("hello").unwrap().len(), 1);
            assert!(postings.words_of(0).is_none());
            assert!(postings.is_consistent());
        }
    }

    #[test]
    fn remove_unknown_is_noop() {
        for mode in MODES {
            let mut postings = Postings::new();
            postings.insert(0, &["hello"]);
            assert!(!postings.remove(99, mode));
            assert_eq!(postings.vocabulary_len(), 1);
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "indexed twice")]
    fn double_insert_panics_in_debug_builds() {
        let mut postings = Postings::new();
        postings.insert(3, &["old"]);
        postings.insert(3, &["new"]);
    }
}
