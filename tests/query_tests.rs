use augmented_avl::AvlTree;

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(keys: &[i64]) -> AvlTree<String> {
        let mut tree = AvlTree::new();
        for &key in keys {
            tree.insert(key, format!("v{}", key)).unwrap();
        }
        tree
    }

    #[test]
    fn test_ascending_scenario() {
        let tree = tree_of(&[10, 20, 30, 40, 50]);
        assert_eq!(tree.root_handle().unwrap().key(), 20);
        assert_eq!(tree.min(), Some(&"v10".to_string()));
        assert_eq!(tree.max(), Some(&"v50".to_string()));
        assert_eq!(tree.select(3), Some(&"v30".to_string()));
        assert_eq!(tree.count_at_most(35), 60);
    }

    #[test]
    fn test_select_matches_in_order_values() {
        let tree = tree_of(&[50, 17, 72, 12, 23, 54, 76, 9, 14, 19, 67]);
        let values = tree.values_in_order();
        for i in 1..=tree.size() {
            assert_eq!(tree.select(i), Some(values[i - 1]), "select({})", i);
        }
    }

    #[test]
    fn test_select_out_of_range() {
        let tree = tree_of(&[3, 1, 2]);
        assert_eq!(tree.select(0), None);
        assert_eq!(tree.select(4), None);

        let empty: AvlTree<String> = AvlTree::new();
        assert_eq!(empty.select(1), None);
    }

    #[test]
    fn test_select_on_large_tree() {
        let mut tree = AvlTree::new();
        for key in (1..=2_000).rev() {
            tree.insert(key * 3, key * 3).unwrap();
        }
        for i in [1usize, 2, 3, 500, 1_024, 1_999, 2_000] {
            assert_eq!(tree.select(i), Some(&(i as i64 * 3)));
        }
    }

    #[test]
    fn test_count_at_most_fast_paths() {
        let tree = tree_of(&[5, 10, 15, 20]);
        assert_eq!(tree.count_at_most(4), 0);
        assert_eq!(tree.count_at_most(-100), 0);
        assert_eq!(tree.count_at_most(5), 5);
        assert_eq!(tree.count_at_most(20), 50);
        assert_eq!(tree.count_at_most(1_000), 50);

        let empty: AvlTree<String> = AvlTree::new();
        assert_eq!(empty.count_at_most(10), 0);
    }

    #[test]
    fn test_count_at_most_between_keys() {
        let tree = tree_of(&[5, 10, 15, 20, 25, 30, 35]);
        assert_eq!(tree.count_at_most(6), 5);
        assert_eq!(tree.count_at_most(10), 15);
        assert_eq!(tree.count_at_most(24), 50);
        assert_eq!(tree.count_at_most(34), 105);
    }

    #[test]
    fn test_count_at_most_against_keys() {
        let tree = tree_of(&[8, 3, 11, 1, 6, 9, 14, 4, 7, 13]);
        let keys = tree.keys_in_order();
        let total: i64 = keys.iter().sum();
        assert_eq!(tree.count_at_most(*keys.last().unwrap()), total as i128);
        assert_eq!(tree.count_at_most(keys[0] - 1), 0);
        for threshold in 0..16 {
            let expected: i64 = keys.iter().filter(|&&k| k <= threshold).sum();
            assert_eq!(tree.count_at_most(threshold), expected as i128, "threshold {}", threshold);
        }
    }

    #[test]
    fn test_iter_is_ascending() {
        let tree = tree_of(&[9, 4, 17, 1, 6, 12, 20]);
        let pairs: Vec<(i64, String)> = tree.iter().map(|(k, v)| (k, v.clone())).collect();
        assert_eq!(pairs.len(), 7);
        assert_eq!(tree.iter().len(), 7);
        assert_eq!(pairs[0], (1, "v1".to_string()));
        assert_eq!(pairs[6], (20, "v20".to_string()));
        assert!(pairs.windows(2).all(|w| w[0].0 < w[1].0));

        let mut seen = Vec::new();
        for (key, _) in &tree {
            seen.push(key);
        }
        assert_eq!(seen, tree.keys_in_order());
    }
}
