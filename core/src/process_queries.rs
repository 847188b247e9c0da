//! Running many queries at once over the rayon pool.

use crate::document::Document;
use crate::error::ValidationError;
use crate::server::SearchServer;
use rayon::prelude::*;

/// Run every query (status Actual, sequential scoring) in parallel.
/// Results come back in query order; any invalid query fails the batch.
pub fn process_queries<Q>(
    server: &SearchServer,
    queries: &[Q],
) -> Result<Vec<Vec<Document>>, ValidationError>
where
    Q: AsRef<str> + Sync,
{
    queries.par_iter().map(|query| server.find_top_documents(query.as_ref())).collect()
}

/// Like [`process_queries`] but flattened, keeping query order then rank order.
pub fn process_queries_joined<Q>(
    server: &SearchServer,
    queries: &[Q],
) -> Result<Vec<Document>, ValidationError>
where
    Q: AsRef<str> + Sync,
{
    Ok(process_queries(server, queries)?.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentStatus;

    fn server() -> SearchServer {
        let mut server = SearchServer::from_stop_words_text("and with").unwrap();
        let texts = [
            "funny pet and nasty rat",
            "funny pet with curly hair",
            "funny pet and not very nasty rat",
            "pet with rat and rat and rat",
            "nasty rat with curly hair",
        ];
        for (id, text) in (1..).zip(texts) {
            server.add_document(id, text, DocumentStatus::Actual, &[1, 2]).unwrap();
        }
        server
    }

    #[test]
    fn results_follow_query_order() {
        let server = server();
        let queries = ["nasty rat -not", "not very funny nasty pet", "curly hair"];
        let batched = process_queries(&server, &queries).unwrap();
        assert_eq!(batched.len(), 3);
        for (query, result) in queries.iter().zip(&batched) {
            assert_eq!(result, &server.find_top_documents(query).unwrap());
        }
    }

    #[test]
    fn joined_flattens_in_order() {
        let server = server();
        let queries = vec!["nasty rat -not".to_string(), "curly hair".to_string()];
        let joined = process_queries_joined(&server, &queries).unwrap();
        let expected: Vec<Document> = queries
            .iter()
            .flat_map(|q| server.find_top_documents(q).unwrap())
            .collect();
        assert_eq!(joined, expected);
    }

    #[test]
    fn invalid_query_fails_batch() {
        let server = server();
        assert!(process_queries(&server, &["rat", "--rat"]).is_err());
    }
}
