use crate::config::MINUS_MARKER;
use crate::error::ValidationError;
use crate::execution::ExecutionMode;
use crate::tokenizer::{is_valid_text, StopWords};

/// A parsed search query. Words borrow from the raw query text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query<'q> {
    pub plus_words: Vec<&'q str>,
    pub minus_words: Vec<&'q str>,
}

impl<'q> Query<'q> {
    /// Parse and deduplicate both word sets, which come back sorted.
    pub fn parse(text: &'q str, stop_words: &StopWords) -> Result<Self, ValidationError> {
        let mut query = Self::parse_unsorted(text, stop_words)?;
        query.dedup(ExecutionMode::Sequential);
        Ok(query)
    }

    /// Parse keeping query order and repeated words.
    ///
    /// Repeats are not merged here; callers that score must run
    /// [`Query::dedup`] before accumulating so a word counts once.
    pub fn parse_unsorted(text: &'q str, stop_words: &StopWords) -> Result<Self, ValidationError> {
        let mut query = Query::default();
        for word in stop_words.split_no_stop(text) {
            if !is_valid_text(word) {
                return Err(ValidationError::InvalidQueryText);
            }
            match word.strip_prefix(MINUS_MARKER) {
                Some(minus) => query.minus_words.push(parse_minus_word(minus)?),
                None => query.plus_words.push(word),
            }
        }
        tracing::trace!(plus = ?query.plus_words, minus = ?query.minus_words, "query parsed");
        Ok(query)
    }

    /// Sort both word sets and drop repeats.
    pub fn dedup(&mut self, mode: ExecutionMode) {
        mode.sort_dedup(&mut self.plus_words);
        mode.sort_dedup(&mut self.minus_words);
    }

    pub fn is_empty(&self) -> bool {
        self.plus_words.is_empty() && self.minus_words.is_empty()
    }
}

fn parse_minus_word(word: &str) -> Result<&str, ValidationError> {
    if word.is_empty() || word.starts_with(MINUS_MARKER) {
        return Err(ValidationError::InvalidMinusWord(format!("{MINUS_MARKER}{word}")));
    }
    Ok(word)
}
