//! Sequential vs parallel execution strategy.
//!
//! Callers pick a mode per call. The engine writes each algorithm once against
//! the primitives below; the mode only decides whether the items are walked on
//! the calling thread or spread over the rayon pool.

use rayon::prelude::*;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    #[default]
    Sequential,
    Parallel,
}

impl ExecutionMode {
    pub fn is_parallel(self) -> bool {
        matches!(self, ExecutionMode::Parallel)
    }

    /// Run `f` on every item. Returns only after all calls have finished.
    pub(crate) fn for_each<T, F>(self, items: &[T], f: F)
    where
        T: Sync,
        F: Fn(&T) + Sync + Send,
    {
        match self {
            ExecutionMode::Sequential => items.iter().for_each(f),
            ExecutionMode::Parallel => items.par_iter().for_each(f),
        }
    }

    pub(crate) fn for_each_mut<T, F>(self, items: &mut [T], f: F)
    where
        T: Send,
        F: Fn(&mut T) + Sync + Send,
    {
        match self {
            ExecutionMode::Sequential => items.iter_mut().for_each(f),
            ExecutionMode::Parallel => items.par_iter_mut().for_each(f),
        }
    }

    pub(crate) fn any<T, F>(self, items: &[T], predicate: F) -> bool
    where
        T: Sync,
        F: Fn(&T) -> bool + Sync + Send,
    {
        match self {
            ExecutionMode::Sequential => items.iter().any(predicate),
            ExecutionMode::Parallel => items.par_iter().any(predicate),
        }
    }

    /// Map every item and keep the `Some` results, in item order.
    pub(crate) fn filter_map<T, U, F>(self, items: &[T], f: F) -> Vec<U>
    where
        T: Sync,
        U: Send,
        F: Fn(&T) -> Option<U> + Sync + Send,
    {
        match self {
            ExecutionMode::Sequential => items.iter().filter_map(f).collect(),
            ExecutionMode::Parallel => items.par_iter().filter_map(f).collect(),
        }
    }

    pub(crate) fn sort_by<T, F>(self, items: &mut [T], compare: F)
    where
        T: Send,
        F: Fn(&T, &T) -> Ordering + Sync,
    {
        match self {
            ExecutionMode::Sequential => items.sort_by(compare),
            ExecutionMode::Parallel => items.par_sort_by(compare),
        }
    }

    /// Sort and drop repeated values.
    pub(crate) fn sort_dedup<T>(self, items: &mut Vec<T>)
    where
        T: Ord + Send,
    {
        match self {
            ExecutionMode::Sequential => items.sort_unstable(),
            ExecutionMode::Parallel => items.par_sort_unstable(),
        }
        items.dedup();
    }
}
