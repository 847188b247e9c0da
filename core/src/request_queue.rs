//! Sliding-window tracking of searches that found nothing.

use crate::config::REQUEST_WINDOW;
use crate::document::{Document, DocumentStatus};
use crate::error::ValidationError;
use crate::server::{DocumentPredicate, SearchServer};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy)]
struct RequestOutcome {
    empty: bool,
    timestamp: u64,
}

/// Forwards searches to a server and counts how many of the last
/// [`REQUEST_WINDOW`] requests returned no documents.
pub struct RequestQueue<'s> {
    server: &'s SearchServer,
    requests: VecDeque<RequestOutcome>,
    current_time: u64,
    empty_results: usize,
}

impl<'s> RequestQueue<'s> {
    pub fn new(server: &'s SearchServer) -> Self {
        Self {
            server,
            requests: VecDeque::new(),
            current_time: 0,
            empty_results: 0,
        }
    }

    pub fn add_find_request<P>(
        &mut self,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>, ValidationError>
    where
        P: DocumentPredicate,
    {
        let documents = self.server.find_top_documents_by(raw_query, predicate)?;
        self.record(documents.is_empty());
        Ok(documents)
    }

    /// Search for documents with status [`DocumentStatus::Actual`].
    pub fn add_actual_request(
        &mut self,
        raw_query: &str,
    ) -> Result<Vec<Document>, ValidationError> {
        self.add_find_request(raw_query, DocumentStatus::Actual)
    }

    pub fn no_result_requests(&self) -> usize {
        self.empty_results
    }

    fn record(&mut self, empty: bool) {
        self.current_time += 1;
        while let Some(oldest) = self.requests.front() {
            if self.current_time - oldest.timestamp < REQUEST_WINDOW {
                break;
            }
            if oldest.empty {
                self.empty_results -= 1;
            }
            self.requests.pop_front();
        }

        self.requests.push_back(RequestOutcome {
            empty,
            timestamp: self.current_time,
        });
        if empty {
            self.empty_results += 1;
        }
    }
}
