use tracing::{debug, trace};

use crate::error::{TreeError, TreeResult};

use super::node::{Node, NodeId, NIL};
use super::{AvlTree, Key, KeySum};

impl<V> AvlTree<V> {
    /// Recomputes size and sum of `id` from its children.
    fn refresh_aggregates(&mut self, id: NodeId) {
        let (left, right) = {
            let node = self.node(id);
            (node.left, node.right)
        };
        let size = 1 + self.node(left).size + self.node(right).size;
        let sum = self.node(left).sum + self.node(right).sum;
        let node = self.node_mut(id);
        node.size = size;
        node.sum = sum + node.key as KeySum;
    }

    /// Recomputes the height of `id` and reports whether it changed.
    fn refresh_height(&mut self, id: NodeId) -> bool {
        let (left, right) = {
            let node = self.node(id);
            (node.left, node.right)
        };
        let height = 1 + self.node(left).height.max(self.node(right).height);
        let node = self.node_mut(id);
        let changed = node.height != height;
        node.height = height;
        changed
    }

    fn refresh(&mut self, id: NodeId) -> bool {
        self.refresh_aggregates(id);
        self.refresh_height(id)
    }

    pub(crate) fn rotate_left(&mut self, x: NodeId) {
        let y = self.node(x).right;
        if y.is_nil() {
            panic!("rotate_left on key {} without a right child", self.node(x).key);
        }
        trace!(pivot = self.node(x).key, "rotate left");
        let parent = self.node(x).parent;
        let inner = self.node(y).left;

        self.node_mut(x).right = inner;
        self.set_parent(inner, x);
        self.replace_child(parent, x, y);
        self.node_mut(y).left = x;
        self.node_mut(x).parent = y;

        self.refresh(x);
        self.refresh(y);
    }

    pub(crate) fn rotate_right(&mut self, x: NodeId) {
        let y = self.node(x).left;
        if y.is_nil() {
            panic!("rotate_right on key {} without a left child", self.node(x).key);
        }
        trace!(pivot = self.node(x).key, "rotate right");
        let parent = self.node(x).parent;
        let inner = self.node(y).right;

        self.node_mut(x).left = inner;
        self.set_parent(inner, x);
        self.replace_child(parent, x, y);
        self.node_mut(y).right = x;
        self.node_mut(x).parent = y;

        self.refresh(x);
        self.refresh(y);
    }

    /// Restores balance at a node whose balance factor is +2 or -2 and
    /// returns the number of rotations used. A heavy child with balance 0
    /// takes the single-rotation case, which only arises after a delete.
    fn rebalance_at(&mut self, id: NodeId, balance: i32) -> usize {
        if balance > 1 {
            let left = self.node(id).left;
            if self.balance_factor(left) >= 0 {
                self.rotate_right(id);
                1
            } else {
                self.rotate_left(left);
                self.rotate_right(id);
                2
            }
        } else {
            let right = self.node(id).right;
            if self.balance_factor(right) <= 0 {
                self.rotate_left(id);
                1
            } else {
                self.rotate_right(right);
                self.rotate_left(id);
                2
            }
        }
    }

    /// Refreshes every node from `id` up to the root without rebalancing.
    fn refresh_to_root(&mut self, mut id: NodeId) {
        while !id.is_nil() {
            self.refresh(id);
            id = self.node(id).parent;
        }
    }

    pub(crate) fn insert_node(&mut self, key: Key, value: V) -> TreeResult<usize> {
        if self.is_empty() {
            let id = self.allocate(Node::leaf(key, value, NIL));
            self.root = id;
            self.min = id;
            self.max = id;
            return Ok(0);
        }

        let parent = self.positional_search(self.root, key);
        if self.node(parent).key == key {
            debug!(key, "insert rejected, key already exists");
            return Err(TreeError::DuplicateKey(key));
        }

        let leaf = self.allocate(Node::leaf(key, value, parent));
        if key < self.node(parent).key {
            self.node_mut(parent).left = leaf;
        } else {
            self.node_mut(parent).right = leaf;
        }
        if key < self.node(self.min).key {
            self.min = leaf;
        } else if key > self.node(self.max).key {
            self.max = leaf;
        }

        let rotations = self.fix_after_insert(parent);
        trace!(key, rotations, "insert complete");
        Ok(rotations)
    }

    /// Climbs from the new leaf's parent. A single balancing event is enough
    /// after an insert, so the climb stops rebalancing after the first one
    /// and only refreshes what is left of the path.
    fn fix_after_insert(&mut self, start: NodeId) -> usize {
        let mut current = start;
        let mut rotations = 0;
        while !current.is_nil() {
            let height_changed = self.refresh(current);
            let balance = self.balance_factor(current);
            if balance.abs() < 2 {
                if !height_changed {
                    current = self.node(current).parent;
                    break;
                }
                current = self.node(current).parent;
            } else {
                rotations = self.rebalance_at(current, balance);
                let top = self.node(current).parent;
                current = self.node(top).parent;
                break;
            }
        }
        self.refresh_to_root(current);
        rotations
    }

    pub(crate) fn delete_node(&mut self, key: Key) -> TreeResult<usize> {
        if key < 1 || self.is_empty() {
            debug!(key, "delete rejected, key not found");
            return Err(TreeError::KeyNotFound(key));
        }

        let target = self.positional_search(self.root, key);
        if self.node(target).key != key {
            debug!(key, "delete rejected, key not found");
            return Err(TreeError::KeyNotFound(key));
        }

        if self.size() == 1 {
            self.clear();
            return Ok(0);
        }

        if target == self.min {
            self.min = self.successor(target);
        }
        if target == self.max {
            self.max = self.predecessor(target);
        }

        let start = self.unlink(target);
        self.release(target);

        let rotations = self.fix_after_delete(start);
        trace!(key, rotations, "delete complete");
        Ok(rotations)
    }

    /// Removes `target` from the tree structure and returns the node the
    /// fix-up climb starts from.
    fn unlink(&mut self, target: NodeId) -> NodeId {
        let (left, right, parent) = {
            let node = self.node(target);
            (node.left, node.right, node.parent)
        };

        if left.is_nil() || right.is_nil() {
            let child = if left.is_nil() { right } else { left };
            self.replace_child(parent, target, child);
            return parent;
        }

        // Two children: the successor has no left child and takes over the
        // target's position.
        let successor = self.subtree_min(right);
        let start = if successor == right {
            successor
        } else {
            let successor_parent = self.node(successor).parent;
            let successor_right = self.node(successor).right;
            self.replace_child(successor_parent, successor, successor_right);
            self.node_mut(successor).right = right;
            self.set_parent(right, successor);
            successor_parent
        };

        self.node_mut(successor).left = left;
        self.set_parent(left, successor);
        self.replace_child(parent, target, successor);
        // The successor inherits the old height so the climb measures change
        // against the subtree it replaced.
        let height = self.node(target).height;
        self.node_mut(successor).height = height;
        start
    }

    /// Climbs from `start` to the root. Unlike insertion a delete may need a
    /// rotation at several ancestors, so the climb keeps going after each one.
    fn fix_after_delete(&mut self, start: NodeId) -> usize {
        let mut current = start;
        let mut rotations = 0;
        while !current.is_nil() {
            let height_changed = self.refresh(current);
            let balance = self.balance_factor(current);
            if balance.abs() < 2 {
                current = self.node(current).parent;
                if !height_changed {
                    break;
                }
            } else {
                rotations += self.rebalance_at(current, balance);
                let top = self.node(current).parent;
                current = self.node(top).parent;
            }
        }
        self.refresh_to_root(current);
        rotations
    }
}
