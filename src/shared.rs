//! # Shared Tree Module
//!
//! The tree itself is single-threaded: rotations rewrite parent and child
//! links that cannot be read safely while a write is in flight. `SharedTree`
//! puts the whole tree behind one exclusive lock so every call, reads
//! included, is serialized.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::Config;
use crate::error::TreeResult;
use crate::tree::{AvlTree, Key, KeySum};

pub struct SharedTree<V> {
    inner: Arc<Mutex<AvlTree<V>>>,
}

impl<V> Clone for SharedTree<V> {
    fn clone(&self) -> Self {
        SharedTree {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> SharedTree<V> {
    pub fn new(tree: AvlTree<V>) -> Self {
        SharedTree {
            inner: Arc::new(Mutex::new(tree)),
        }
    }

    pub fn with_config(config: &Config) -> Self {
        Self::new(AvlTree::with_config(config))
    }

    /// Runs `f` while holding the lock.
    pub fn with<R>(&self, f: impl FnOnce(&AvlTree<V>) -> R) -> R {
        let tree = self.inner.lock();
        f(&tree)
    }

    /// Runs `f` with exclusive mutable access to the tree.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut AvlTree<V>) -> R) -> R {
        let mut tree = self.inner.lock();
        f(&mut tree)
    }

    pub fn insert(&self, key: Key, value: V) -> TreeResult<usize> {
        self.inner.lock().insert(key, value)
    }

    pub fn delete(&self, key: Key) -> TreeResult<usize> {
        self.inner.lock().delete(key)
    }

    pub fn size(&self) -> usize {
        self.inner.lock().size()
    }

    pub fn count_at_most(&self, threshold: Key) -> KeySum {
        self.inner.lock().count_at_most(threshold)
    }
}

impl<V: Clone> SharedTree<V> {
    pub fn search(&self, key: Key) -> Option<V> {
        self.inner.lock().search(key).cloned()
    }

    pub fn select(&self, i: usize) -> Option<V> {
        self.inner.lock().select(i).cloned()
    }
}

impl<V> Default for SharedTree<V> {
    fn default() -> Self {
        Self::new(AvlTree::new())
    }
}
