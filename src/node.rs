use std::fmt::Debug;

/// A stable handle to a node slot in the [`crate::arena::Arena`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(u32);

static_assertions::const_assert_eq!(std::mem::size_of::<NodeId>(), 4);

impl NodeId {
    /// The sentinel head always occupies the first slot.
    pub const HEAD: Self = NodeId(0);

    #[inline(always)]
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize, "arena index overflow");
        NodeId(index as u32)
    }

    #[inline(always)]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl Debug for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if *self == Self::HEAD {
            write!(f, "NodeId(head)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// A single drop list cell: one key plus one forward link per level the node
/// participates in.
///
/// A node never owns its successors. The arena owns every node and the level-0
/// chain decides which of them are live.
#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) key: String,
    pub(crate) links: Vec<Option<NodeId>>,
}

impl Node {
    /// Creates a node with `width` empty forward links.
    pub(crate) fn new(key: String, width: usize) -> Self {
        Node { key, links: vec![None; width] }
    }

    /// The sentinel head: an empty key that is never a member of the set.
    pub(crate) fn head(width: usize) -> Self {
        Self::new(String::new(), width)
    }

    #[inline]
    pub(crate) fn height(&self) -> usize {
        self.links.len()
    }

    #[inline]
    pub(crate) fn next(&self, level: usize) -> Option<NodeId> {
        self.links.get(level).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_has_empty_links() {
        let node = Node::new("apple".into(), 3);
        assert_eq!(node.height(), 3);
        assert!(node.links.iter().all(Option::is_none));
        assert_eq!(node.next(0), None);
        // out of range levels read as empty
        assert_eq!(node.next(7), None);
    }

    #[test]
    fn test_head_has_empty_key() {
        let head = Node::head(16);
        assert!(head.key.is_empty());
        assert_eq!(head.height(), 16);
    }

    #[test]
    fn test_node_id_debug() {
        assert_eq!(format!("{:?}", NodeId::HEAD), "NodeId(head)");
        assert_eq!(format!("{:?}", NodeId::from_index(5)), "NodeId(5)");
        assert_eq!(NodeId::from_index(5).index(), 5);
    }
}
