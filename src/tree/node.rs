use super::{Key, KeySum};

/// Index of a node inside the tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

/// Slot 0 of every arena: the shared absent node.
pub(crate) const NIL: NodeId = NodeId(0);

impl NodeId {
    #[inline]
    pub(crate) fn is_nil(self) -> bool {
        self == NIL
    }
}

pub(crate) struct Node<V> {
    pub(crate) key: Key,
    pub(crate) value: Option<V>,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    pub(crate) parent: NodeId,
    pub(crate) height: i32,
    pub(crate) size: usize,
    pub(crate) sum: KeySum,
}

impl<V> Node<V> {
    pub(crate) fn absent() -> Self {
        Node {
            key: 0,
            value: None,
            left: NIL,
            right: NIL,
            parent: NIL,
            height: -1,
            size: 0,
            sum: 0,
        }
    }

    pub(crate) fn leaf(key: Key, value: V, parent: NodeId) -> Self {
        Node {
            key,
            value: Some(value),
            left: NIL,
            right: NIL,
            parent,
            height: 0,
            size: 1,
            sum: key as KeySum,
        }
    }

    #[inline]
    pub(crate) fn is_real(&self) -> bool {
        self.value.is_some()
    }
}

/// Read-only view of one node, absent or real.
///
/// Obtained from [`AvlTree::root_handle`](super::AvlTree::root_handle) and
/// navigated through `left`, `right` and `parent`. An absent view reports
/// key 0, height -1, size 0 and sum 0.
pub struct NodeRef<'a, V> {
    pub(super) tree: &'a super::AvlTree<V>,
    pub(super) id: NodeId,
}

impl<'a, V> Clone for NodeRef<'a, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, V> Copy for NodeRef<'a, V> {}

impl<'a, V> NodeRef<'a, V> {
    fn node(&self) -> &'a Node<V> {
        self.tree.node(self.id)
    }

    fn at(&self, id: NodeId) -> NodeRef<'a, V> {
        NodeRef { tree: self.tree, id }
    }

    pub fn is_real(&self) -> bool {
        self.node().is_real()
    }

    pub fn key(&self) -> Key {
        self.node().key
    }

    pub fn value(&self) -> Option<&'a V> {
        self.node().value.as_ref()
    }

    pub fn height(&self) -> i32 {
        self.node().height
    }

    pub fn subtree_size(&self) -> usize {
        self.node().size
    }

    pub fn subtree_sum(&self) -> KeySum {
        self.node().sum
    }

    pub fn balance_factor(&self) -> i32 {
        self.tree.balance_factor(self.id)
    }

    pub fn left(&self) -> NodeRef<'a, V> {
        self.at(self.node().left)
    }

    pub fn right(&self) -> NodeRef<'a, V> {
        self.at(self.node().right)
    }

    /// `None` for the root and for absent nodes.
    pub fn parent(&self) -> Option<NodeRef<'a, V>> {
        let parent = self.node().parent;
        if parent.is_nil() {
            None
        } else {
            Some(self.at(parent))
        }
    }

    pub fn successor(&self) -> Option<NodeRef<'a, V>> {
        if !self.is_real() {
            return None;
        }
        let next = self.tree.successor(self.id);
        if next.is_nil() {
            None
        } else {
            Some(self.at(next))
        }
    }

    pub fn predecessor(&self) -> Option<NodeRef<'a, V>> {
        if !self.is_real() {
            return None;
        }
        let prev = self.tree.predecessor(self.id);
        if prev.is_nil() {
            None
        } else {
            Some(self.at(prev))
        }
    }
}

impl<'a, V> std::fmt::Debug for NodeRef<'a, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", &self.key())
            .field("height", &self.height())
            .field("subtree_size", &self.subtree_size())
            .field("subtree_sum", &self.subtree_sum())
            .finish()
    }
}
