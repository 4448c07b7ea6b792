use super::node::{NodeId, NIL};
use super::{AvlTree, Key, KeySum};

impl<V> AvlTree<V> {
    /// Returns the value of the `i`-th smallest key, counting from 1.
    ///
    /// Starts at the cached minimum and climbs far enough that the subtree
    /// below is guaranteed to hold `i` keys, then descends by subtree size.
    pub fn select(&self, i: usize) -> Option<&V> {
        if i < 1 || i > self.size() {
            return None;
        }
        if i == 1 {
            return self.min();
        }
        if i == self.size() {
            return self.max();
        }

        // An AVL subtree of height h holds at least fib(h + 3) - 1 keys,
        // so ceil(log_phi(i)) steps up from the minimum always suffice.
        let phi = (1.0 + 5f64.sqrt()) / 2.0;
        let steps = ((i as f64).ln() / phi.ln()).ceil() as usize;
        let mut current = self.min;
        for _ in 0..steps {
            if current == self.root {
                break;
            }
            current = self.node(current).parent;
        }
        while self.node(current).size < i && current != self.root {
            current = self.node(current).parent;
        }

        let target = self.select_from(current, i);
        self.node(target).value.as_ref()
    }

    fn select_from(&self, mut current: NodeId, mut i: usize) -> NodeId {
        while !current.is_nil() {
            let node = self.node(current);
            let rank = self.node(node.left).size + 1;
            if i == rank {
                return current;
            }
            if i < rank {
                current = node.left;
            } else {
                i -= rank;
                current = node.right;
            }
        }
        NIL
    }

    /// Sum of every key less than or equal to `threshold`.
    pub fn count_at_most(&self, threshold: Key) -> KeySum {
        if self.is_empty() {
            return 0;
        }
        let min_key = self.node(self.min).key;
        if threshold < min_key {
            return 0;
        }
        if threshold == min_key {
            return min_key as KeySum;
        }
        if threshold >= self.node(self.max).key {
            return self.node(self.root).sum;
        }

        let mut total: KeySum = 0;
        let mut current = self.root;
        while !current.is_nil() {
            let node = self.node(current);
            if node.key > threshold {
                current = node.left;
            } else {
                total += self.node(node.left).sum + node.key as KeySum;
                current = node.right;
            }
        }
        total
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            tree: self,
            next: self.min,
            remaining: self.size(),
        }
    }

    pub fn keys_in_order(&self) -> Vec<Key> {
        self.iter().map(|(key, _)| key).collect()
    }

    pub fn values_in_order(&self) -> Vec<&V> {
        self.iter().map(|(_, value)| value).collect()
    }
}

/// Ascending `(key, value)` iterator that follows successor links from the
/// cached minimum.
pub struct Iter<'a, V> {
    tree: &'a AvlTree<V>,
    next: NodeId,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (Key, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next.is_nil() {
            return None;
        }
        let tree = self.tree;
        let node = tree.node(self.next);
        self.next = tree.successor(self.next);
        self.remaining = self.remaining.saturating_sub(1);
        node.value.as_ref().map(|value| (node.key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, V> ExactSizeIterator for Iter<'a, V> {}

impl<'a, V> IntoIterator for &'a AvlTree<V> {
    type Item = (Key, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
