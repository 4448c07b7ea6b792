use serde::Serialize;

use crate::error::{TreeError, TreeResult};

use super::node::{NodeId, NIL};
use super::{AvlTree, Key, KeySum};

/// Nested structural dump of a tree, for debugging and tests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeSnapshot {
    pub key: Key,
    pub height: i32,
    pub size: usize,
    pub sum: KeySum,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Box<TreeSnapshot>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Box<TreeSnapshot>>,
}

impl<V> AvlTree<V> {
    pub fn snapshot(&self) -> Option<TreeSnapshot> {
        self.snapshot_of(self.root)
    }

    pub fn snapshot_json(&self) -> TreeResult<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    fn snapshot_of(&self, id: NodeId) -> Option<TreeSnapshot> {
        if id.is_nil() {
            return None;
        }
        let node = self.node(id);
        Some(TreeSnapshot {
            key: node.key,
            height: node.height,
            size: node.size,
            sum: node.sum,
            left: self.snapshot_of(node.left).map(Box::new),
            right: self.snapshot_of(node.right).map(Box::new),
        })
    }

    /// Checks ordering, balance, cached aggregates, parent links and the
    /// cached min/max against a full walk of the tree.
    pub fn validate(&self) -> TreeResult<()> {
        if self.is_empty() {
            if !self.min.is_nil() || !self.max.is_nil() {
                return Err(violation(0, "empty tree caches a min or max node"));
            }
            return Ok(());
        }
        if !self.node(self.root).parent.is_nil() {
            return Err(violation(self.node(self.root).key, "root has a parent"));
        }
        self.validate_subtree(self.root, NIL, None, None)?;

        let lowest = self.subtree_min(self.root);
        if self.min != lowest {
            return Err(violation(self.node(lowest).key, "cached min is stale"));
        }
        let highest = self.subtree_max(self.root);
        if self.max != highest {
            return Err(violation(self.node(highest).key, "cached max is stale"));
        }
        Ok(())
    }

    /// Returns (height, size, sum) recomputed from scratch.
    fn validate_subtree(
        &self,
        id: NodeId,
        parent: NodeId,
        lower: Option<Key>,
        upper: Option<Key>,
    ) -> TreeResult<(i32, usize, KeySum)> {
        if id.is_nil() {
            return Ok((-1, 0, 0));
        }
        let node = self.node(id);
        let key = node.key;
        if !node.is_real() || key < 1 {
            return Err(violation(key, "reachable node is not a real node"));
        }
        if node.parent != parent {
            return Err(violation(key, "parent link does not match"));
        }
        if lower.map_or(false, |low| key <= low) || upper.map_or(false, |high| key >= high) {
            return Err(violation(key, "key out of order"));
        }

        let (lh, ls, lsum) = self.validate_subtree(node.left, id, lower, Some(key))?;
        let (rh, rs, rsum) = self.validate_subtree(node.right, id, Some(key), upper)?;

        let height = 1 + lh.max(rh);
        let size = 1 + ls + rs;
        let sum = lsum + rsum + key as KeySum;
        if (lh - rh).abs() > 1 {
            return Err(violation(key, format!("balance factor {}", lh - rh)));
        }
        if node.height != height {
            return Err(violation(key, format!("cached height {} != {}", node.height, height)));
        }
        if node.size != size {
            return Err(violation(key, format!("cached size {} != {}", node.size, size)));
        }
        if node.sum != sum {
            return Err(violation(key, format!("cached sum {} != {}", node.sum, sum)));
        }
        Ok((height, size, sum))
    }
}

fn violation(key: Key, reason: impl Into<String>) -> TreeError {
    TreeError::InvariantViolation {
        key,
        reason: reason.into(),
    }
}
