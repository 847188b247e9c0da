//! Sharded map used to accumulate relevance from many threads at once.
//!
//! Keys are routed to one of a fixed number of buckets by `key mod bucket_count`.
//! Each bucket is an ordered map behind its own lock, so updates to keys in
//! different buckets never wait on each other.

use crate::config::DEFAULT_BUCKET_COUNT;
use crate::document::DocumentId;
use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
use std::collections::BTreeMap;

/// Per-query relevance accumulator.
pub type ScoreMap = ConcurrentMap<DocumentId, f64>;

pub struct ConcurrentMap<K, V> {
    buckets: Vec<Mutex<BTreeMap<K, V>>>,
}

impl<K, V> ConcurrentMap<K, V>
where
    K: Ord + Copy + Into<i64>,
{
    pub fn new() -> Self {
        Self::with_bucket_count(DEFAULT_BUCKET_COUNT)
    }

    /// A bucket count of zero is raised to one.
    pub fn with_bucket_count(bucket_count: usize) -> Self {
        let buckets = (0..bucket_count.max(1)).map(|_| Mutex::new(BTreeMap::new())).collect();
        Self { buckets }
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    fn bucket_index(&self, key: K) -> usize {
        let key: i64 = key.into();
        key.rem_euclid(self.buckets.len() as i64) as usize
    }

    /// Lock the owning bucket and return the value for `key`, inserting a default
    /// one if absent. The bucket stays locked until the guard is dropped.
    pub fn access(&self, key: K) -> MappedMutexGuard<'_, V>
    where
        V: Default,
    {
        let bucket = self.buckets[self.bucket_index(key)].lock();
        MutexGuard::map(bucket, |entries| entries.entry(key).or_default())
    }

    /// Remove `key` if present. Returns whether an entry was removed.
    pub fn erase(&self, key: K) -> bool {
        self.buckets[self.bucket_index(key)].lock().remove(&key).is_some()
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.lock().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|bucket| bucket.lock().is_empty())
    }

    /// Merge every bucket into one ordered map, locking one bucket at a time.
    ///
    /// Each bucket is copied at a single instant but the buckets are not read
    /// together, so this is only a consistent view once writers have stopped.
    pub fn snapshot(&self) -> BTreeMap<K, V>
    where
        V: Clone,
    {
        let mut merged = BTreeMap::new();
        for bucket in &self.buckets {
            let entries = bucket.lock();
            merged.extend(entries.iter().map(|(k, v)| (*k, v.clone())));
        }
        merged
    }

    pub fn into_map(self) -> BTreeMap<K, V> {
        self.buckets.into_iter().flat_map(|bucket| bucket.into_inner()).collect()
    }
}

impl<K, V> Default for ConcurrentMap<K, V>
where
    K: Ord + Copy + Into<i64>,
{
    fn default() -> Self {
        Self::new()
    }
}
