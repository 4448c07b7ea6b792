//! # Augmented AVL Tree
//!
//! A height-balanced binary search tree over distinct positive integer keys.
//! Every node caches the height, size and key sum of its subtree, which keeps
//! order-statistic selection and prefix sums logarithmic. The smallest and
//! largest nodes are cached so `min`/`max` are constant time.
//!
//! Nodes live in an arena and link to each other by index. Slot 0 is the
//! absent node: it is never written, so its height (-1), size (0) and sum (0)
//! can be read through any child link without checking for presence first.

mod bst;
mod node;
mod query;
mod rebalance;
mod inspect;

use tracing::debug;

use crate::config::Config;
use crate::error::TreeResult;

use self::node::{Node, NodeId, NIL};

pub use self::node::NodeRef;
pub use self::query::Iter;
pub use self::inspect::TreeSnapshot;

pub type Key = i64;
pub type KeySum = i128;

/// Upper bound on the arena slots reserved up front from `Config`.
pub const MAX_INITIAL_CAPACITY: usize = 1 << 20;

pub struct AvlTree<V> {
    nodes: Vec<Node<V>>,
    free: Vec<NodeId>,
    root: NodeId,
    min: NodeId,
    max: NodeId,
    check_invariants: bool,
}

impl<V> AvlTree<V> {
    pub fn new() -> Self {
        Self::with_config(&Config::new())
    }

    pub fn with_config(config: &Config) -> Self {
        let mut nodes = Vec::with_capacity(config.initial_capacity.clamp(1, MAX_INITIAL_CAPACITY));
        nodes.push(Node::absent());
        AvlTree {
            nodes,
            free: Vec::new(),
            root: NIL,
            min: NIL,
            max: NIL,
            check_invariants: config.check_invariants,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_nil()
    }

    /// Number of keys stored in the tree.
    pub fn size(&self) -> usize {
        self.node(self.root).size
    }

    /// Height of the root, -1 for an empty tree.
    pub fn height(&self) -> i32 {
        self.node(self.root).height
    }

    pub fn search(&self, key: Key) -> Option<&V> {
        let id = self.find(key)?;
        self.node(id).value.as_ref()
    }

    pub fn contains_key(&self, key: Key) -> bool {
        self.find(key).is_some()
    }

    pub fn min(&self) -> Option<&V> {
        self.node(self.min).value.as_ref()
    }

    pub fn max(&self) -> Option<&V> {
        self.node(self.max).value.as_ref()
    }

    pub fn min_key(&self) -> Option<Key> {
        self.real_key(self.min)
    }

    pub fn max_key(&self) -> Option<Key> {
        self.real_key(self.max)
    }

    pub fn root_handle(&self) -> Option<NodeRef<'_, V>> {
        if self.is_empty() {
            None
        } else {
            Some(NodeRef { tree: self, id: self.root })
        }
    }

    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.free.clear();
        self.root = NIL;
        self.min = NIL;
        self.max = NIL;
    }

    /// Inserts `key` and returns the number of rotations it took (0, 1 or 2).
    ///
    /// Keys below 1 are ignored and report zero rotations. An existing key is
    /// rejected with [`TreeError::DuplicateKey`](crate::error::TreeError) and
    /// the tree is left untouched.
    pub fn insert(&mut self, key: Key, value: V) -> TreeResult<usize> {
        if key < 1 {
            debug!(key, "ignoring insert of non-positive key");
            return Ok(0);
        }
        let rotations = self.insert_node(key, value)?;
        self.check_after_mutation();
        Ok(rotations)
    }

    /// Deletes `key` and returns the number of rotations performed on the
    /// way back to the root.
    pub fn delete(&mut self, key: Key) -> TreeResult<usize> {
        let rotations = self.delete_node(key)?;
        self.check_after_mutation();
        Ok(rotations)
    }

    fn check_after_mutation(&self) {
        if self.check_invariants {
            if let Err(err) = self.validate() {
                panic!("tree corrupted: {}", err);
            }
        }
    }

    #[inline]
    fn node(&self, id: NodeId) -> &Node<V> {
        &self.nodes[id.0]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node<V> {
        debug_assert!(!id.is_nil(), "absent node must never be written");
        &mut self.nodes[id.0]
    }

    fn real_key(&self, id: NodeId) -> Option<Key> {
        if id.is_nil() {
            None
        } else {
            Some(self.node(id).key)
        }
    }

    fn find(&self, key: Key) -> Option<NodeId> {
        if self.is_empty() {
            return None;
        }
        let id = self.positional_search(self.root, key);
        if self.node(id).key == key {
            Some(id)
        } else {
            None
        }
    }

    fn allocate(&mut self, node: Node<V>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.0] = node;
                id
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    fn release(&mut self, id: NodeId) {
        let slot = self.node_mut(id);
        slot.value = None;
        slot.left = NIL;
        slot.right = NIL;
        slot.parent = NIL;
        self.free.push(id);
    }

    fn balance_factor(&self, id: NodeId) -> i32 {
        let node = self.node(id);
        self.node(node.left).height - self.node(node.right).height
    }
}

impl<V> Default for AvlTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for AvlTree<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
