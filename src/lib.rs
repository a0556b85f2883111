//! Mergeable min-priority queue backed by a binomial heap.
//!
//! A binomial heap is a forest of binomial trees with:
//! - O(log n) insert and extract-min
//! - O(log n) peek (root-list scan)
//! - O(log n) structural merge
//! - decrease-key addressed by key value (O(n) locate + O(log n) sift-up)
//!
//! The forest keeps at most one tree per degree, so the shape of a heap of
//! size n mirrors the binary representation of n. Merging two heaps is
//! carry propagation over their root lists, the same bookkeeping as binary
//! addition.
//!
//! Nodes live in a generational arena ([`arena::NodeArena`]); parent, child
//! and sibling links are arena ids rather than references, so removing the
//! minimum frees exactly one slot and can never leave a dangling pointer.
//!
//! # Example
//!
//! ```rust
//! use binomial_queue::binomial::BinomialHeap;
//! use binomial_queue::MergeableHeap;
//!
//! let mut heap = BinomialHeap::new();
//! heap.insert(5);
//! heap.insert(3);
//! heap.insert(8);
//! assert_eq!(heap.peek(), Some(&3));
//! assert_eq!(heap.extract_min(), Some(3));
//! assert_eq!(heap.extract_min(), Some(5));
//! ```

pub mod arena;
pub mod binomial;
pub mod traits;

pub use traits::MergeableHeap;
