//! Compile-time tuning constants.

/// Maximum number of documents returned by a top-documents search.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevance values closer than this are treated as a tie and ordered by rating.
pub const RELEVANCE_EPSILON: f64 = 1e-5;

/// Default number of independently locked buckets in a [`crate::ConcurrentMap`].
pub const DEFAULT_BUCKET_COUNT: usize = 128;

/// Length of the request-tracking window, in requests (one per minute of a day).
pub const REQUEST_WINDOW: u64 = 1440;

/// Prefix marking a minus-word in a query.
pub const MINUS_MARKER: char = '-';
