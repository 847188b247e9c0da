use crate::error::ValidationError;
use std::collections::BTreeSet;

/// Split text on the space character, skipping runs of spaces.
pub fn split_into_words(text: &str) -> Vec<&str> {
    text.split(' ').filter(|word| !word.is_empty()).collect()
}

/// True when the text holds no control characters (below U+0020).
pub fn is_valid_text(text: &str) -> bool {
    !text.bytes().any(|b| b < b' ')
}

/// Words ignored by both indexing and query parsing.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: BTreeSet<String>,
}

impl StopWords {
    /// Build the set, rejecting any word with control characters. Empty words are skipped.
    pub fn new<I, S>(words: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for word in words {
            let word = word.as_ref();
            if !is_valid_text(word) {
                return Err(ValidationError::InvalidStopWord(word.to_string()));
            }
            if !word.is_empty() {
                set.insert(word.to_string());
            }
        }
        Ok(Self { words: set })
    }

    /// Parse a space-separated list of stop words.
    pub fn from_text(text: &str) -> Result<Self, ValidationError> {
        Self::new(split_into_words(text))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Tokenize and drop stop words, keeping the order of the text.
    pub fn split_no_stop<'t>(&self, text: &'t str) -> Vec<&'t str> {
        split_into_words(text).into_iter().filter(|word| !self.contains(word)).collect()
    }
}
