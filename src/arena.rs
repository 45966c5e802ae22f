use std::{
    fmt::Debug,
    ops::{Index, IndexMut},
};

use crate::node::{Node, NodeId};

enum Slot {
    Occupied(Node),
    Vacant,
}

/// Owns every node of a drop list, including the sentinel head at
/// [`NodeId::HEAD`]. Links between nodes are [`NodeId`] handles into the arena,
/// so unlinking a node can never leave a dangling reference behind: a released
/// slot is simply marked vacant and handed out again by a later `alloc`.
pub(crate) struct Arena {
    slots: Vec<Slot>,
    free: Vec<NodeId>,
}

impl Debug for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Arena({} slots, {} free)", self.slots.len(), self.free.len())
    }
}

impl Arena {
    /// Creates an arena holding only a head with `width` empty links.
    pub(crate) fn with_head(width: usize) -> Self {
        Arena {
            slots: vec![Slot::Occupied(Node::head(width))],
            free: Vec::new(),
        }
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.slots[id.index()] = Slot::Occupied(node);
            id
        } else {
            let id = NodeId::from_index(self.slots.len());
            self.slots.push(Slot::Occupied(node));
            id
        }
    }

    /// Vacates the slot for `id` and returns the node it held.
    pub(crate) fn release(&mut self, id: NodeId) -> Node {
        debug_assert_ne!(id, NodeId::HEAD, "the head is never released");
        match std::mem::replace(&mut self.slots[id.index()], Slot::Vacant) {
            Slot::Occupied(node) => {
                self.free.push(id);
                node
            }
            Slot::Vacant => unreachable!("double release of {id:?}"),
        }
    }

    /// Drops every node except the head, and resizes the head to `width`
    /// empty links.
    pub(crate) fn truncate_to_head(&mut self, width: usize) {
        self.slots.truncate(1);
        self.free.clear();
        let head = &mut self[NodeId::HEAD];
        head.links.clear();
        head.links.resize(width, None);
    }

    /// Number of nodes currently allocated, head included.
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

impl Index<NodeId> for Arena {
    type Output = Node;

    #[inline]
    fn index(&self, id: NodeId) -> &Node {
        match &self.slots[id.index()] {
            Slot::Occupied(node) => node,
            Slot::Vacant => unreachable!("dangling handle {id:?}"),
        }
    }
}

impl IndexMut<NodeId> for Arena {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        match &mut self.slots[id.index()] {
            Slot::Occupied(node) => node,
            Slot::Vacant => unreachable!("dangling handle {id:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_reuses_released_slots() {
        let mut arena = Arena::with_head(4);
        assert_eq!(arena.live(), 1);

        let a = arena.alloc(Node::new("a".into(), 1));
        let b = arena.alloc(Node::new("b".into(), 2));
        assert_ne!(a, b);
        assert_ne!(a, NodeId::HEAD);
        assert_eq!(arena.live(), 3);

        let node = arena.release(a);
        assert_eq!(node.key, "a");
        assert_eq!(arena.live(), 2);

        let c = arena.alloc(Node::new("c".into(), 3));
        assert_eq!(c, a, "vacant slot should be recycled");
        assert_eq!(arena[c].key, "c");
        assert_eq!(arena[b].key, "b");
    }

    #[test]
    #[should_panic(expected = "dangling handle")]
    fn test_index_vacant_slot_panics() {
        let mut arena = Arena::with_head(1);
        let a = arena.alloc(Node::new("a".into(), 1));
        arena.release(a);
        let _ = &arena[a];
    }

    #[test]
    fn test_truncate_to_head() {
        let mut arena = Arena::with_head(2);
        let a = arena.alloc(Node::new("a".into(), 1));
        arena[NodeId::HEAD].links[0] = Some(a);
        arena.alloc(Node::new("b".into(), 1));

        arena.truncate_to_head(5);
        assert_eq!(arena.live(), 1);
        assert_eq!(arena[NodeId::HEAD].height(), 5);
        assert!(arena[NodeId::HEAD].links.iter().all(Option::is_none));
    }
}
