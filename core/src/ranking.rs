//! Ordering and truncation of scored documents.

use crate::config::{MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
use crate::document::Document;
use crate::execution::ExecutionMode;

/// Sort by relevance descending and keep the top [`MAX_RESULT_DOCUMENT_COUNT`].
///
/// A tie group starts at the most relevant document not yet grouped and takes
/// every following document less than [`RELEVANCE_EPSILON`] below it, so any
/// two members are within the epsilon of each other. Each group is ordered by
/// rating descending, then by id.
pub fn rank(mut documents: Vec<Document>, mode: ExecutionMode) -> Vec<Document> {
    mode.sort_by(&mut documents, |lhs, rhs| {
        rhs.relevance.total_cmp(&lhs.relevance).then(lhs.id.cmp(&rhs.id))
    });

    let mut start = 0;
    while start < documents.len() {
        let mut end = start + 1;
        while end < documents.len()
            && documents[start].relevance - documents[end].relevance < RELEVANCE_EPSILON
        {
            end += 1;
        }
        documents[start..end]
            .sort_by(|lhs, rhs| rhs.rating.cmp(&lhs.rating).then(lhs.id.cmp(&rhs.id)));
        if end >= MAX_RESULT_DOCUMENT_COUNT {
            break;
        }
        start = end;
    }

    documents.truncate(MAX_RESULT_DOCUMENT_COUNT);
    documents
}
