use crate::document::DocumentId;
use crate::server::SearchServer;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Remove every document whose set of words (weights ignored) equals that of
/// a document with a smaller id. Returns the removed ids in ascending order.
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocumentId> {
    let mut seen: BTreeSet<Vec<Arc<str>>> = BTreeSet::new();
    let mut duplicates = Vec::new();
    for id in server.document_ids() {
        let words: Vec<Arc<str>> = server.word_frequencies(id).keys().cloned().collect();
        if !seen.insert(words) {
            duplicates.push(id);
        }
    }

    for &id in &duplicates {
        server.remove_document(id);
        tracing::info!(id, "Found duplicate document id {id}");
    }
    duplicates
}
