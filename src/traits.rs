//! Public trait surface for mergeable priority queues.
//!
//! The crate ships a single implementation ([`crate::binomial::BinomialHeap`]),
//! but tests and benchmarks stay generic over this trait so workloads read
//! the same regardless of the backing structure.

/// A destructively mergeable min-priority queue.
///
/// Keys require a total order (`Ord`) and the queue is min-oriented: `peek`
/// and `extract_min` address the smallest key. Keys need not be unique.
///
/// Empty-queue conditions are reported through `Option`, never through a
/// sentinel key value; the key domain is unbounded and any sentinel could
/// collide with a legitimate key.
pub trait MergeableHeap<K: Ord> {
    /// Creates an empty queue.
    fn new() -> Self;

    /// Number of keys currently stored.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds `key` to the queue.
    fn insert(&mut self, key: K);

    /// The minimum key, or `None` if the queue is empty.
    fn peek(&self) -> Option<&K>;

    /// Removes and returns the minimum key, or `None` if the queue is empty.
    fn extract_min(&mut self) -> Option<K>;

    /// Lowers the first key equal to `old` (in the implementation's search
    /// order) to `new`, restoring queue order afterwards.
    ///
    /// Returns `true` if a key was changed. A call with `new >= old`, or
    /// with an `old` not present in the queue, changes nothing and returns
    /// `false`; ignoring the return value makes both cases silent no-ops.
    ///
    /// If `old` occurs more than once, which occurrence is lowered is
    /// unspecified.
    fn decrease_key(&mut self, old: &K, new: K) -> bool;

    /// Moves every key of `other` into `self`, consuming `other`.
    fn merge(&mut self, other: Self);
}
