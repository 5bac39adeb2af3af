use std::hash::{Hash, Hasher};

use xxhash_rust::xxh64::Xxh64;

use crate::{
    iterator::{PreOrderIter, Traversal as _},
    NodeRef, Tree,
};

/// Feed the pre-order walk of a subtree into `state`, one (depth, value)
/// pair per node, matching the rule used for tree equality.
pub(crate) fn hash_subtree<T, H>(node: Option<&NodeRef<T>>, state: &mut H)
where
    T: Hash,
    H: Hasher,
{
    let mut iter = node.map(PreOrderIter::new).unwrap_or_default();
    let mut count = 0usize;

    while let Some(node) = iter.next_node() {
        iter.current_depth().hash(state);
        node.node().data().hash(state);
        count += 1;
    }

    count.hash(state);
}

impl<T> Hash for Tree<T>
where
    T: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_subtree(self.root_ref(), state);
    }
}

impl<T> Tree<T>
where
    T: Hash,
{
    /// Stable 64 bit hash of the tree
    pub fn xxhash(&self) -> u64 {
        let mut hasher = Xxh64::new(0);
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl<T> NodeRef<T>
where
    T: Hash,
{
    /// Hash the node per its [`Hash`] impl
    pub fn xxhash(&self) -> u64 {
        let mut hasher = Xxh64::new(0);
        self.hash(&mut hasher);
        hasher.finish()
    }

    /// Hash the whole subtree below and including this node, ignoring where
    /// the node sits in its tree
    pub fn xxhash_subtree(&self) -> u64 {
        let mut hasher = Xxh64::new(0);
        hash_subtree(Some(self), &mut hasher);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::test::scenario_tree;
    use crate::{IterationStrategy, Tree};

    #[test]
    fn equal_trees_hash_equal() {
        let left = scenario_tree();
        let right = scenario_tree();

        assert_eq!(left.xxhash(), right.xxhash());

        let mut set = HashSet::new();
        set.insert(left);
        assert!(set.contains(&right));
    }

    #[test]
    fn hash_ignores_default_strategy() {
        let tree = scenario_tree();
        let other = Tree::from_node(
            tree.root().unwrap().deep_copy(),
            IterationStrategy::DepthFirstPost,
        )
        .unwrap();

        assert_eq!(tree.xxhash(), other.xxhash());
    }

    #[test]
    fn sibling_order_changes_hash() {
        let mut left = Tree::with_root('r');
        let root = left.root().unwrap();
        left.add('a', &root).unwrap();
        left.add('b', &root).unwrap();

        let mut right = Tree::with_root('r');
        let root = right.root().unwrap();
        right.add('b', &root).unwrap();
        right.add('a', &root).unwrap();

        assert_ne!(left.xxhash(), right.xxhash());
    }

    #[test]
    fn subtree_hash_matches_copy() {
        let tree = scenario_tree();
        let d = tree.find_child(&'d', &tree.root().unwrap()).unwrap();

        assert_eq!(d.xxhash_subtree(), tree.sub_tree(&d).xxhash());
        assert_eq!(d.deep_copy().xxhash(), d.deep_copy().xxhash());
        assert_ne!(d.xxhash(), d.deep_copy().xxhash());
    }

    #[test]
    fn empty_tree_hash_is_stable() {
        assert_eq!(Tree::<u8>::new().xxhash(), Tree::<u8>::new().xxhash());
        assert_ne!(Tree::<u8>::new().xxhash(), Tree::with_root(0u8).xxhash());
    }
}
