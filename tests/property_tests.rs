use augmented_avl::{AvlTree, Config, NodeRef};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

#[cfg(test)]
mod tests {
    use super::*;

    /// Walks the tree through the public node view and checks ordering,
    /// balance and cached aggregates. Returns the subtree height.
    fn check_node(node: NodeRef<'_, u32>, lower: i64, upper: i64) -> i32 {
        if !node.is_real() {
            assert_eq!(node.height(), -1);
            assert_eq!(node.subtree_size(), 0);
            assert_eq!(node.subtree_sum(), 0);
            return -1;
        }
        assert!(node.key() > lower && node.key() < upper, "key {} out of order", node.key());
        let left = node.left();
        let right = node.right();
        let lh = check_node(left, lower, node.key());
        let rh = check_node(right, node.key(), upper);
        assert!((lh - rh).abs() <= 1, "unbalanced at {}", node.key());
        assert_eq!(node.height(), 1 + lh.max(rh));
        assert_eq!(node.subtree_size(), 1 + left.subtree_size() + right.subtree_size());
        assert_eq!(
            node.subtree_sum(),
            node.key() as i128 + left.subtree_sum() + right.subtree_sum()
        );
        node.height()
    }

    fn check_against_model(tree: &AvlTree<u32>, model: &BTreeMap<i64, u32>) {
        if let Some(root) = tree.root_handle() {
            check_node(root, i64::MIN, i64::MAX);
        }
        tree.validate().unwrap();
        assert_eq!(tree.size(), model.len());
        let keys: Vec<i64> = model.keys().copied().collect();
        assert_eq!(tree.keys_in_order(), keys);
        assert_eq!(tree.min(), model.values().next());
        assert_eq!(tree.max(), model.values().next_back());
    }

    #[test]
    fn test_random_operations_match_model() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut tree = AvlTree::new();
        let mut model = BTreeMap::new();

        for step in 0..4_000u32 {
            let key = rng.gen_range(1..500i64);
            if rng.gen_bool(0.6) {
                let result = tree.insert(key, step);
                if model.contains_key(&key) {
                    assert!(result.is_err());
                } else {
                    assert!(result.unwrap() <= 2);
                    model.insert(key, step);
                }
            } else {
                let result = tree.delete(key);
                assert_eq!(result.is_ok(), model.remove(&key).is_some());
            }
            if step % 50 == 0 {
                check_against_model(&tree, &model);
            }
        }
        check_against_model(&tree, &model);
    }

    #[test]
    fn test_every_operation_keeps_invariants() {
        let mut config = Config::new();
        config.check_invariants = true;
        let mut rng = StdRng::seed_from_u64(7);
        let mut tree = AvlTree::with_config(&config);
        let mut model = BTreeMap::new();

        for step in 0..1_500u32 {
            let key = rng.gen_range(1..200i64);
            if model.contains_key(&key) {
                tree.delete(key).unwrap();
                model.remove(&key);
            } else {
                tree.insert(key, step).unwrap();
                model.insert(key, step);
            }
            check_against_model(&tree, &model);
        }
    }

    #[test]
    fn test_queries_match_model() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut tree = AvlTree::new();
        let mut model = BTreeMap::new();
        while model.len() < 300 {
            let key = rng.gen_range(1..10_000i64);
            if tree.insert(key, key as u32).is_ok() {
                model.insert(key, key as u32);
            }
        }
        for _ in 0..100 {
            let key = *model.keys().nth(rng.gen_range(0..model.len())).unwrap();
            tree.delete(key).unwrap();
            model.remove(&key);
        }

        let values: Vec<u32> = model.values().copied().collect();
        for i in 1..=tree.size() {
            assert_eq!(tree.select(i), Some(&values[i - 1]));
        }
        assert_eq!(tree.select(tree.size() + 1), None);

        for _ in 0..200 {
            let threshold = rng.gen_range(-10..10_010i64);
            let expected: i128 = model.keys().filter(|&&k| k <= threshold).map(|&k| k as i128).sum();
            assert_eq!(tree.count_at_most(threshold), expected);
        }

        let min_key = *model.keys().next().unwrap();
        let max_key = *model.keys().next_back().unwrap();
        assert_eq!(tree.count_at_most(min_key - 1), 0);
        assert_eq!(
            tree.count_at_most(max_key),
            model.keys().map(|&k| k as i128).sum::<i128>()
        );
    }

    #[test]
    fn test_drain_in_random_order() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut tree = AvlTree::new();
        let mut keys: Vec<i64> = (1..=1_000).collect();
        for &key in &keys {
            tree.insert(key, key as u32).unwrap();
        }
        keys.shuffle(&mut rng);
        for (removed, key) in keys.iter().enumerate() {
            tree.delete(*key).unwrap();
            assert_eq!(tree.size(), 1_000 - removed - 1);
            if removed % 97 == 0 {
                tree.validate().unwrap();
            }
        }
        assert!(tree.is_empty());
        tree.validate().unwrap();
    }
}
