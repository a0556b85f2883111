//! Arena storage for heap nodes.
//!
//! All nodes of a heap live in one [`NodeArena`], a thin wrapper over
//! `slotmap::SlotMap`. Tree structure is expressed as `Option<NodeId>`
//! links between slots instead of owned pointers, which gives:
//!
//! - Contiguous allocation and better cache locality than per-node boxes
//! - Generational keys: a stale id to a removed slot can never resolve to
//!   a recycled node of a different generation
//! - A single, explicit point of ownership: the arena owns every node,
//!   and removal frees exactly one slot

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Generational key identifying a node slot in a [`NodeArena`].
    pub struct NodeId;
}

/// Arena owning all nodes of one heap.
#[derive(Debug, Clone)]
pub struct NodeArena<N> {
    nodes: SlotMap<NodeId, N>,
}

impl<N> Default for NodeArena<N> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }
}

impl<N> NodeArena<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocates a slot for `node` and returns its id.
    pub fn insert(&mut self, node: N) -> NodeId {
        self.nodes.insert(node)
    }

    /// Frees the slot for `id`, returning the node if it was live.
    pub fn remove(&mut self, id: NodeId) -> Option<N> {
        self.nodes.remove(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&N> {
        self.nodes.get(id)
    }

    /// Mutable access to two distinct slots at once, for swapping data
    /// between a node and its parent.
    pub fn get_disjoint_mut(&mut self, ids: [NodeId; 2]) -> Option<[&mut N; 2]> {
        self.nodes.get_disjoint_mut(ids)
    }

    /// Removes and yields every node. Used when a heap is merged away and
    /// its nodes are relocated into the surviving heap's arena.
    pub fn drain(&mut self) -> impl Iterator<Item = (NodeId, N)> + '_ {
        self.nodes.drain()
    }
}

impl<N> std::ops::Index<NodeId> for NodeArena<N> {
    type Output = N;

    fn index(&self, id: NodeId) -> &N {
        &self.nodes[id]
    }
}

impl<N> std::ops::IndexMut<NodeId> for NodeArena<N> {
    fn index_mut(&mut self, id: NodeId) -> &mut N {
        &mut self.nodes[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_index() {
        let mut arena: NodeArena<i32> = NodeArena::new();
        let id = arena.insert(42);
        assert_eq!(arena[id], 42);

        arena[id] = 100;
        assert_eq!(arena.get(id), Some(&100));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn remove_frees_slot() {
        let mut arena: NodeArena<i32> = NodeArena::new();
        let id = arena.insert(7);
        assert_eq!(arena.remove(id), Some(7));
        assert_eq!(arena.remove(id), None);
        assert!(arena.is_empty());
    }

    #[test]
    fn stale_id_does_not_resolve_after_reuse() {
        let mut arena: NodeArena<i32> = NodeArena::new();
        let old = arena.insert(1);
        arena.remove(old);
        let new = arena.insert(2);
        // Slot may be recycled, but the generation differs.
        assert_ne!(old, new);
        assert_eq!(arena.get(old), None);
        assert_eq!(arena.get(new), Some(&2));
    }

    #[test]
    fn disjoint_mut_allows_pairwise_swap() {
        let mut arena: NodeArena<i32> = NodeArena::new();
        let a = arena.insert(1);
        let b = arena.insert(2);

        let [x, y] = arena.get_disjoint_mut([a, b]).unwrap();
        std::mem::swap(x, y);

        assert_eq!(arena[a], 2);
        assert_eq!(arena[b], 1);
        assert!(arena.get_disjoint_mut([a, a]).is_none());
    }
}
