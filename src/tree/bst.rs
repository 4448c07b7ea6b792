use super::node::{NodeId, NIL};
use super::{AvlTree, Key};

impl<V> AvlTree<V> {
    /// Walks down from `from` towards `key` and returns the last real node
    /// visited: the node holding `key`, or the parent it would be attached to.
    /// Returns `NIL` only when `from` itself is absent.
    pub(crate) fn positional_search(&self, from: NodeId, key: Key) -> NodeId {
        let mut last = NIL;
        let mut current = from;
        while !current.is_nil() {
            last = current;
            let node = self.node(current);
            if key == node.key {
                break;
            }
            current = if key < node.key { node.left } else { node.right };
        }
        last
    }

    pub(crate) fn subtree_min(&self, mut id: NodeId) -> NodeId {
        while !self.node(id).left.is_nil() {
            id = self.node(id).left;
        }
        id
    }

    pub(crate) fn subtree_max(&self, mut id: NodeId) -> NodeId {
        while !self.node(id).right.is_nil() {
            id = self.node(id).right;
        }
        id
    }

    /// In-order successor of a real node, `NIL` for the maximum.
    pub(crate) fn successor(&self, mut id: NodeId) -> NodeId {
        let right = self.node(id).right;
        if !right.is_nil() {
            return self.subtree_min(right);
        }
        let mut parent = self.node(id).parent;
        while !parent.is_nil() && self.node(parent).right == id {
            id = parent;
            parent = self.node(id).parent;
        }
        parent
    }

    /// In-order predecessor of a real node, `NIL` for the minimum.
    pub(crate) fn predecessor(&self, mut id: NodeId) -> NodeId {
        let left = self.node(id).left;
        if !left.is_nil() {
            return self.subtree_max(left);
        }
        let mut parent = self.node(id).parent;
        while !parent.is_nil() && self.node(parent).left == id {
            id = parent;
            parent = self.node(id).parent;
        }
        parent
    }

    /// Points whichever slot referenced `old` (a child slot of `parent`, or
    /// the root when `parent` is absent) at `new`.
    pub(crate) fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        if parent.is_nil() {
            self.root = new;
        } else if self.node(parent).left == old {
            self.node_mut(parent).left = new;
        } else if self.node(parent).right == old {
            self.node_mut(parent).right = new;
        } else {
            panic!(
                "node {} is not a child of its parent {}",
                self.node(old).key,
                self.node(parent).key
            );
        }
        self.set_parent(new, parent);
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        if !child.is_nil() {
            self.node_mut(child).parent = parent;
        }
    }
}
