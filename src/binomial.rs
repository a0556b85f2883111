//! Binomial heap: a forest of binomial trees.
//!
//! # Structure
//!
//! **Binomial tree Bd**: B0 is a single node; a Bd root has exactly d
//! children which are, in child-list order, Bd-1, Bd-2, ..., B0. A Bd tree
//! therefore holds exactly 2^d nodes.
//!
//! The heap is a root list of such trees chained through `sibling` links,
//! sorted by strictly increasing degree with at most one tree per degree.
//! A heap of n keys thus contains a Bd tree exactly where bit d of n is
//! set, and every operation reduces to binary arithmetic on root lists:
//!
//! - **insert** adds a B0 tree and lets the carry propagate
//! - **merge** is a two-pointer merge of the degree-sorted root lists
//!   followed by consolidation, which links equal-degree pairs the way
//!   addition resolves 1+1 into a carry
//! - **extract-min** removes a root and re-injects its children (a ready
//!   root list once reversed) through the same merge path
//!
//! The min-heap property holds across every parent-child edge, so the
//! global minimum is always among the O(log n) roots.
//!
//! Nodes are arena-allocated ([`NodeArena`]); every link is an
//! `Option<NodeId>`. `extract_min` is the only operation that frees a
//! slot, and it frees exactly the removed root.

use crate::arena::{NodeArena, NodeId};
use crate::traits::MergeableHeap;
use slotmap::SecondaryMap;
use std::mem;

/// A single tree node.
///
/// `degree` always equals the number of direct children. `child` points at
/// the leftmost (highest-degree) child; `sibling` chains both the root
/// list and child lists.
#[derive(Debug, Clone)]
struct Node<K> {
    key: K,
    degree: usize,
    parent: Option<NodeId>,
    child: Option<NodeId>,
    sibling: Option<NodeId>,
}

/// Mergeable min-priority queue backed by a binomial heap.
///
/// # Example
///
/// ```rust
/// use binomial_queue::binomial::BinomialHeap;
/// use binomial_queue::MergeableHeap;
///
/// let mut heap = BinomialHeap::new();
/// for key in [5, 3, 8, 1] {
///     heap.insert(key);
/// }
/// assert_eq!(heap.extract_min(), Some(1));
/// assert_eq!(heap.peek(), Some(&3));
/// ```
#[derive(Debug, Clone)]
pub struct BinomialHeap<K: Ord> {
    arena: NodeArena<Node<K>>,
    /// Head of the degree-sorted root list; `None` means the heap is empty.
    head: Option<NodeId>,
    len: usize,
}

impl<K: Ord> Default for BinomialHeap<K> {
    fn default() -> Self {
        Self {
            arena: NodeArena::new(),
            head: None,
            len: 0,
        }
    }
}

impl<K: Ord> MergeableHeap<K> for BinomialHeap<K> {
    fn new() -> Self {
        Self::default()
    }

    fn len(&self) -> usize {
        self.len
    }

    /// Inserts `key` as a singleton B0 tree and consolidates it into the
    /// forest.
    ///
    /// O(log n) worst case (a full carry chain), O(1) amortized over a
    /// sequence of inserts, exactly like incrementing a binary counter.
    fn insert(&mut self, key: K) {
        let node = self.arena.insert(Node {
            key,
            degree: 0,
            parent: None,
            child: None,
            sibling: None,
        });
        let merged = self.merge_root_lists(self.head, Some(node));
        self.head = self.consolidate(merged);
        self.len += 1;
    }

    /// Returns the minimum key without removing it, or `None` on an empty
    /// heap.
    ///
    /// Scans only the root list: the heap property guarantees the global
    /// minimum is a root. O(log n).
    fn peek(&self) -> Option<&K> {
        let head = self.head?;
        let mut min = head;
        let mut curr = self.arena[head].sibling;
        while let Some(c) = curr {
            if self.arena[c].key < self.arena[min].key {
                min = c;
            }
            curr = self.arena[c].sibling;
        }
        Some(&self.arena[min].key)
    }

    /// Removes and returns the minimum key, or `None` on an empty heap.
    ///
    /// The minimum root is spliced out of the root list, its child list is
    /// reversed in place (children are stored in decreasing degree, the
    /// root list needs increasing) with parent links cleared, and the
    /// reversed list is consolidated back into the forest. Only then is
    /// the removed root's slot freed. O(log n).
    fn extract_min(&mut self) -> Option<K> {
        let head = self.head?;

        // Find the minimum root and its predecessor for an O(1) splice.
        let mut min = head;
        let mut min_prev: Option<NodeId> = None;
        let mut prev = head;
        let mut curr = self.arena[head].sibling;
        while let Some(c) = curr {
            if self.arena[c].key < self.arena[min].key {
                min = c;
                min_prev = Some(prev);
            }
            prev = c;
            curr = self.arena[c].sibling;
        }

        // Unlink the minimum root.
        let after = self.arena[min].sibling.take();
        match min_prev {
            None => self.head = after,
            Some(p) => self.arena[p].sibling = after,
        }

        // Reverse the child list into a valid root list, clearing parent
        // links to mark each child as a root candidate.
        let mut reversed: Option<NodeId> = None;
        let mut child = self.arena[min].child.take();
        while let Some(c) = child {
            let node = &mut self.arena[c];
            let next = node.sibling;
            node.sibling = reversed;
            node.parent = None;
            reversed = Some(c);
            child = next;
        }

        let merged = self.merge_root_lists(self.head, reversed);
        self.head = self.consolidate(merged);
        self.len -= 1;

        let node = self
            .arena
            .remove(min)
            .expect("minimum root must be live in the arena");
        Some(node.key)
    }

    /// Lowers the first key equal to `old` (pre-order) to `new` and sifts
    /// it up by swapping keys along the parent chain; tree shapes and
    /// degrees are untouched.
    ///
    /// Returns `false` without changing anything when `new >= old` or no
    /// key equals `old`. O(n) for the search, O(log n) for the sift-up.
    fn decrease_key(&mut self, old: &K, new: K) -> bool {
        if new >= *old {
            return false;
        }
        let Some(id) = self.locate(old) else {
            return false;
        };
        self.arena[id].key = new;
        self.sift_up(id);
        true
    }

    /// Moves every key of `other` into `self`, consuming `other`.
    ///
    /// The root lists are merged and consolidated in O(log n1 + log n2).
    /// With one arena per heap the consumed side's nodes must be
    /// relocated; the smaller heap is always the one relocated, so that
    /// cost is O(min(n1, n2)).
    fn merge(&mut self, mut other: Self) {
        if other.head.is_none() {
            return;
        }
        if self.head.is_none() {
            *self = other;
            return;
        }

        if other.len > self.len {
            mem::swap(self, &mut other);
        }
        let other_head = self.adopt(&mut other);
        let merged = self.merge_root_lists(self.head, other_head);
        self.head = self.consolidate(merged);
        self.len += mem::take(&mut other.len);
    }
}

impl<K: Ord> BinomialHeap<K> {
    /// Merges two degree-sorted root lists into one, ties taken from the
    /// first list. Only `sibling` links change; no tree is reshaped.
    fn merge_root_lists(&mut self, h1: Option<NodeId>, h2: Option<NodeId>) -> Option<NodeId> {
        let (mut a, mut b) = (h1, h2);
        let mut head: Option<NodeId> = None;
        let mut tail: Option<NodeId> = None;

        while let (Some(x), Some(y)) = (a, b) {
            let picked = if self.arena[x].degree <= self.arena[y].degree {
                a = self.arena[x].sibling;
                x
            } else {
                b = self.arena[y].sibling;
                y
            };
            match tail {
                None => head = Some(picked),
                Some(t) => self.arena[t].sibling = Some(picked),
            }
            tail = Some(picked);
        }

        // At most one list has a remainder; it is already sorted.
        let rest = a.or(b);
        match tail {
            None => rest,
            Some(t) => {
                self.arena[t].sibling = rest;
                head
            }
        }
    }

    /// Eliminates duplicate degrees from a degree-sorted root list by
    /// linking equal-degree neighbors, the carry-propagation step.
    ///
    /// The walk keeps a trailing pointer so the losing root can be spliced
    /// out in O(1). When three same-degree trees sit in a row (one tree
    /// plus a fresh carry), the first is skipped so that only the latter
    /// two are linked; the sort order guarantees at most three can meet.
    fn consolidate(&mut self, head: Option<NodeId>) -> Option<NodeId> {
        let mut head = head?;
        let mut prev: Option<NodeId> = None;
        let mut curr = head;

        while let Some(next) = self.arena[curr].sibling {
            let degree = self.arena[curr].degree;
            let third_matches = self.arena[next]
                .sibling
                .is_some_and(|after| self.arena[after].degree == degree);

            if self.arena[next].degree != degree || third_matches {
                prev = Some(curr);
                curr = next;
            } else if self.arena[curr].key <= self.arena[next].key {
                // `curr` wins; splice `next` out and demote it.
                self.arena[curr].sibling = self.arena[next].sibling;
                self.link(next, curr);
            } else {
                // `next` wins; splice `curr` out and demote it.
                match prev {
                    None => head = next,
                    Some(p) => self.arena[p].sibling = Some(next),
                }
                self.link(curr, next);
                curr = next;
            }
        }

        Some(head)
    }

    /// Makes `child` the leftmost child of `parent`, turning two Bd trees
    /// into one Bd+1.
    ///
    /// The caller picks the winner, so the heap property across the new
    /// edge is its responsibility; both preconditions are checked in debug
    /// builds. The degree must genuinely increment here: `degree` equals
    /// the child count, and the root-degree bookkeeping of the whole
    /// forest rests on it.
    fn link(&mut self, child: NodeId, parent: NodeId) {
        debug_assert_eq!(
            self.arena[child].degree,
            self.arena[parent].degree,
            "linked trees must have equal degree"
        );
        debug_assert!(
            self.arena[parent].key <= self.arena[child].key,
            "link would violate the heap property"
        );

        let old_child = self.arena[parent].child;
        let c = &mut self.arena[child];
        c.parent = Some(parent);
        c.sibling = old_child;

        let p = &mut self.arena[parent];
        p.child = Some(child);
        p.degree += 1;
    }

    /// First node whose key equals `target`, in pre-order: node, then its
    /// child subtree, then its sibling subtree.
    ///
    /// Iterative with an explicit stack; sibling chains would make the
    /// recursive form as deep as the heap is large. O(n) worst case.
    fn locate(&self, target: &K) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = Vec::new();
        stack.extend(self.head);
        while let Some(id) = stack.pop() {
            let node = &self.arena[id];
            if node.key == *target {
                return Some(id);
            }
            // Sibling below child on the stack, so the child subtree is
            // visited first.
            stack.extend(node.sibling);
            stack.extend(node.child);
        }
        None
    }

    /// Restores the heap property upward from `id` by swapping keys with
    /// the parent while the parent's key is larger. Swaps keys only, never
    /// links, so shapes and degrees are preserved.
    fn sift_up(&mut self, mut id: NodeId) {
        while let Some(parent) = self.arena[id].parent {
            if self.arena[id].key >= self.arena[parent].key {
                break;
            }
            let [node, par] = self
                .arena
                .get_disjoint_mut([id, parent])
                .expect("a node and its parent are distinct live slots");
            mem::swap(&mut node.key, &mut par.key);
            id = parent;
        }
    }

    /// Relocates every node of `other` into this heap's arena, rewriting
    /// all ids, and returns the relocated root-list head.
    fn adopt(&mut self, other: &mut Self) -> Option<NodeId> {
        let mut relocated: SecondaryMap<NodeId, NodeId> = SecondaryMap::new();
        let mut moved = Vec::with_capacity(other.len);
        for (old_id, node) in other.arena.drain() {
            let new_id = self.arena.insert(node);
            relocated.insert(old_id, new_id);
            moved.push(new_id);
        }
        for id in moved {
            let node = &mut self.arena[id];
            node.parent = node.parent.map(|p| relocated[p]);
            node.child = node.child.map(|c| relocated[c]);
            node.sibling = node.sibling.map(|s| relocated[s]);
        }
        other.head.take().map(|h| relocated[h])
    }

    /// Walks the whole forest and panics on any violated structural
    /// invariant. O(n); intended for tests and debugging.
    ///
    /// Checks that root degrees strictly increase with no parent links,
    /// that every tree is a well-formed binomial tree of its stated degree
    /// (which pins each `degree` to the actual child count), that the heap
    /// property holds across every edge, and that `len`, the arena
    /// population and the reachable node count agree. Together with the
    /// degree uniqueness this forces the root degrees to be exactly the
    /// set bits of `len`.
    pub fn assert_invariants(&self) {
        let mut reachable = 0usize;
        let mut prev_degree: Option<usize> = None;
        let mut root = self.head;
        while let Some(r) = root {
            let node = &self.arena[r];
            assert!(node.parent.is_none(), "root must not have a parent link");
            if let Some(prev) = prev_degree {
                assert!(
                    prev < node.degree,
                    "root degrees must strictly increase ({} then {})",
                    prev,
                    node.degree
                );
            }
            prev_degree = Some(node.degree);
            reachable += self.assert_tree(r);
            root = node.sibling;
        }
        assert_eq!(reachable, self.len, "len disagrees with reachable nodes");
        assert_eq!(self.arena.len(), self.len, "arena holds orphaned slots");
    }

    /// Validates the subtree rooted at `id` and returns its node count.
    fn assert_tree(&self, id: NodeId) -> usize {
        let node = &self.arena[id];
        let mut expected_degree = node.degree;
        let mut size = 1usize;
        let mut child = node.child;
        while let Some(c) = child {
            assert!(
                expected_degree > 0,
                "node has more children than its degree"
            );
            expected_degree -= 1;
            let child_node = &self.arena[c];
            assert_eq!(
                child_node.degree, expected_degree,
                "child degrees must run d-1 down to 0"
            );
            assert_eq!(
                child_node.parent,
                Some(id),
                "child must point back at its parent"
            );
            assert!(
                node.key <= child_node.key,
                "heap property violated on a parent-child edge"
            );
            size += self.assert_tree(c);
            child = child_node.sibling;
        }
        assert_eq!(expected_degree, 0, "degree must equal the child count");
        size
    }

    #[cfg(test)]
    fn root_degrees(&self) -> Vec<usize> {
        let mut degrees = Vec::new();
        let mut root = self.head;
        while let Some(r) = root {
            degrees.push(self.arena[r].degree);
            root = self.arena[r].sibling;
        }
        degrees
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heap_of(keys: &[i32]) -> BinomialHeap<i32> {
        let mut heap = BinomialHeap::new();
        for &k in keys {
            heap.insert(k);
        }
        heap
    }

    #[test]
    fn link_increments_degree_once() {
        // Two singletons link into a B1: root degree 1, one child of
        // degree 0. A degree that fails to net-increment would show up
        // here as a degree-0 root with a child.
        let mut heap = heap_of(&[2, 1]);
        assert_eq!(heap.root_degrees(), vec![1]);

        let head = heap.head.unwrap();
        assert_eq!(heap.arena[head].key, 1);
        let child = heap.arena[head].child.unwrap();
        assert_eq!(heap.arena[child].degree, 0);
        assert_eq!(heap.arena[child].parent, Some(head));

        // Two B1 trees link into a B2.
        heap.insert(4);
        heap.insert(3);
        assert_eq!(heap.root_degrees(), vec![2]);
        heap.assert_invariants();
    }

    #[test]
    fn root_degrees_match_binary_representation() {
        // 13 = 0b1101: trees of degree 0, 2 and 3.
        let heap = heap_of(&(0..13).collect::<Vec<_>>());
        assert_eq!(heap.root_degrees(), vec![0, 2, 3]);
        heap.assert_invariants();

        for n in 0..=64 {
            let heap = heap_of(&(0..n).collect::<Vec<_>>());
            let expected: Vec<usize> = (0..usize::BITS)
                .filter(|d| (n as usize) >> d & 1 == 1)
                .map(|d| d as usize)
                .collect();
            assert_eq!(heap.root_degrees(), expected, "n = {}", n);
            heap.assert_invariants();
        }
    }

    #[test]
    fn consolidation_leaves_no_duplicate_degrees() {
        let mut a = heap_of(&[5, 9, 12, 1]);
        let b = heap_of(&[3, 7, 2]);
        a.merge(b);
        // 4 + 3 = 7 = 0b111.
        assert_eq!(a.root_degrees(), vec![0, 1, 2]);
        a.assert_invariants();
    }

    #[test]
    fn equal_keys_link_into_valid_tree() {
        // Both roots hold the same key; linking must still produce a
        // valid B1 with the heap property trivially intact.
        let heap = heap_of(&[6, 6]);
        assert_eq!(heap.root_degrees(), vec![1]);
        heap.assert_invariants();
    }

    #[test]
    fn locate_finds_non_root_keys() {
        let heap = heap_of(&[4, 8, 15, 16, 23, 42]);
        for key in [4, 8, 15, 16, 23, 42] {
            let id = heap.locate(&key).expect("inserted key must be found");
            assert_eq!(heap.arena[id].key, key);
        }
        assert_eq!(heap.locate(&99), None);
    }

    #[test]
    fn noop_decrease_leaves_forest_untouched() {
        let mut heap = heap_of(&[10, 20, 30, 40, 50]);

        let snapshot = |h: &BinomialHeap<i32>| -> Vec<(i32, usize, Option<i32>)> {
            let mut entries = Vec::new();
            let mut stack: Vec<NodeId> = Vec::new();
            stack.extend(h.head);
            while let Some(id) = stack.pop() {
                let node = &h.arena[id];
                let parent_key = node.parent.map(|p| h.arena[p].key);
                entries.push((node.key, node.degree, parent_key));
                stack.extend(node.sibling);
                stack.extend(node.child);
            }
            entries
        };

        let before = snapshot(&heap);
        assert!(!heap.decrease_key(&30, 30), "equal keys must be a no-op");
        assert!(!heap.decrease_key(&30, 35), "raising a key must be a no-op");
        assert!(!heap.decrease_key(&99, 1), "missing key must be a no-op");
        assert_eq!(snapshot(&heap), before);
        heap.assert_invariants();
    }

    #[test]
    fn decrease_key_swaps_keys_without_relinking() {
        let mut heap = heap_of(&[10, 20, 30, 40]);
        let degrees_before = heap.root_degrees();

        assert!(heap.decrease_key(&40, 5));
        assert_eq!(heap.peek(), Some(&5));
        assert_eq!(heap.root_degrees(), degrees_before);
        heap.assert_invariants();
    }

    #[test]
    fn extract_frees_exactly_the_removed_root() {
        let mut heap = heap_of(&[3, 1, 2]);
        assert_eq!(heap.arena.len(), 3);
        assert_eq!(heap.extract_min(), Some(1));
        assert_eq!(heap.arena.len(), 2);
        heap.assert_invariants();
    }

    #[test]
    fn merge_relocates_all_nodes_into_one_arena() {
        let mut a = heap_of(&[2, 9]);
        let b = heap_of(&[4, 1]);
        a.merge(b);
        assert_eq!(a.arena.len(), 4);
        assert_eq!(a.len, 4);
        a.assert_invariants();
    }

    #[test]
    fn merge_relocates_the_smaller_heap() {
        // Merging a large heap into a small one must behave exactly like
        // the reverse direction: the sides are swapped internally so only
        // the smaller arena is drained and relocated.
        let big_keys: Vec<i32> = (0..64).collect();
        let mut small = heap_of(&[70, 65]);
        let big = heap_of(&big_keys);

        small.merge(big);
        small.assert_invariants();
        assert_eq!(small.len, 66);
        assert_eq!(small.arena.len(), 66);

        let mut drained = Vec::with_capacity(small.len);
        while let Some(k) = small.extract_min() {
            drained.push(k);
        }
        let mut expected = big_keys;
        expected.extend([65, 70]);
        assert_eq!(drained, expected);
    }
}
