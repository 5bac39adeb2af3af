//! Lazy traversal of a subtree in one of three orders.
//!
//! Every iterator is anchored at a start node and reads the live child lists
//! of the nodes it visits as it goes, so each pull reflects the structure at
//! that moment. Mutating a subtree while iterating it is allowed but the
//! resulting order is unspecified.

use std::{ops::Deref, str::FromStr};

use crate::{error::TreeError, NodeDepth, NodeRef};

mod breadth;
mod postorder;
mod preorder;

pub use breadth::BreadthFirstIter;
pub use postorder::PostOrderIter;
pub use preorder::PreOrderIter;

/// Order in which a traversal visits nodes
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IterationStrategy {
    /// Node first, then each child subtree left to right
    #[default]
    DepthFirstPre,
    /// Each child subtree left to right, then the node
    DepthFirstPost,
    /// Level by level, left to right within a level
    BreadthFirst,
}

impl IterationStrategy {
    pub const ALL: [IterationStrategy; 3] = [
        IterationStrategy::DepthFirstPre,
        IterationStrategy::DepthFirstPost,
        IterationStrategy::BreadthFirst,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IterationStrategy::DepthFirstPre => "depth-first-pre",
            IterationStrategy::DepthFirstPost => "depth-first-post",
            IterationStrategy::BreadthFirst => "breadth-first",
        }
    }
}

impl std::fmt::Display for IterationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IterationStrategy {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase().replace('_', "-");
        match tag.as_str() {
            "depth-first-pre" | "pre-order" => Ok(Self::DepthFirstPre),
            "depth-first-post" | "post-order" => Ok(Self::DepthFirstPost),
            "breadth-first" | "breath-first" | "level-order" => Ok(Self::BreadthFirst),
            _ => Err(TreeError::UnknownStrategy(s.to_string())),
        }
    }
}

/// A node paired with its depth relative to the traversal anchor
pub struct IterNode<T> {
    depth: NodeDepth,
    node: NodeRef<T>,
}

impl<T> IterNode<T> {
    pub(crate) fn new(depth: NodeDepth, node: NodeRef<T>) -> Self {
        Self { depth, node }
    }

    pub fn depth(&self) -> NodeDepth {
        self.depth
    }

    pub fn node_ref(&self) -> &NodeRef<T> {
        &self.node
    }

    /// Entries for the children of this node, one level deeper, in order
    pub(crate) fn children(&self) -> Vec<IterNode<T>> {
        self.node
            .node()
            .children()
            .iter()
            .map(|child| IterNode::new(self.depth + 1, child.clone()))
            .collect()
    }
}

impl<T> Clone for IterNode<T> {
    fn clone(&self) -> Self {
        Self {
            depth: self.depth,
            node: self.node.clone(),
        }
    }
}

impl<T> Deref for IterNode<T> {
    type Target = NodeRef<T>;

    fn deref(&self) -> &Self::Target {
        &self.node
    }
}

/// Node-level access shared by every traversal.
///
/// The value iterators built on top of this yield `Option<T>` per node, while
/// `next_node` hands out the node handle itself for callers that need
/// identity.
pub trait Traversal {
    type Value;

    /// Advance to the next node
    fn next_node(&mut self) -> Option<NodeRef<Self::Value>>;

    /// The node produced by the last pull
    fn current(&self) -> Option<&NodeRef<Self::Value>>;

    /// Depth of [`Traversal::current`] below the anchor node
    fn current_depth(&self) -> Option<NodeDepth>;

    /// Adapt into an iterator over node handles
    fn nodes(self) -> Nodes<Self>
    where
        Self: Sized,
    {
        Nodes(self)
    }
}

/// Iterator over the node handles of a [`Traversal`]
pub struct Nodes<I>(I);

impl<I> Iterator for Nodes<I>
where
    I: Traversal,
{
    type Item = NodeRef<I::Value>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next_node()
    }
}

/// Traversal in any [`IterationStrategy`], dispatched on the variant
pub enum TreeIter<T> {
    PreOrder(PreOrderIter<T>),
    PostOrder(PostOrderIter<T>),
    BreadthFirst(BreadthFirstIter<T>),
}

impl<T> TreeIter<T> {
    pub fn new(strategy: IterationStrategy, node: &NodeRef<T>) -> Self {
        match strategy {
            IterationStrategy::DepthFirstPre => TreeIter::PreOrder(PreOrderIter::new(node)),
            IterationStrategy::DepthFirstPost => TreeIter::PostOrder(PostOrderIter::new(node)),
            IterationStrategy::BreadthFirst => TreeIter::BreadthFirst(BreadthFirstIter::new(node)),
        }
    }

    /// A traversal that yields nothing, for trees without a root
    pub fn empty(strategy: IterationStrategy) -> Self {
        match strategy {
            IterationStrategy::DepthFirstPre => TreeIter::PreOrder(PreOrderIter::default()),
            IterationStrategy::DepthFirstPost => TreeIter::PostOrder(PostOrderIter::default()),
            IterationStrategy::BreadthFirst => TreeIter::BreadthFirst(BreadthFirstIter::default()),
        }
    }

    pub(crate) fn anchored(strategy: IterationStrategy, node: Option<&NodeRef<T>>) -> Self {
        match node {
            Some(node) => Self::new(strategy, node),
            None => Self::empty(strategy),
        }
    }

    pub fn strategy(&self) -> IterationStrategy {
        match self {
            TreeIter::PreOrder(_) => IterationStrategy::DepthFirstPre,
            TreeIter::PostOrder(_) => IterationStrategy::DepthFirstPost,
            TreeIter::BreadthFirst(_) => IterationStrategy::BreadthFirst,
        }
    }
}

impl<T> Traversal for TreeIter<T> {
    type Value = T;

    fn next_node(&mut self) -> Option<NodeRef<T>> {
        match self {
            TreeIter::PreOrder(iter) => iter.next_node(),
            TreeIter::PostOrder(iter) => iter.next_node(),
            TreeIter::BreadthFirst(iter) => iter.next_node(),
        }
    }

    fn current(&self) -> Option<&NodeRef<T>> {
        match self {
            TreeIter::PreOrder(iter) => iter.current(),
            TreeIter::PostOrder(iter) => iter.current(),
            TreeIter::BreadthFirst(iter) => iter.current(),
        }
    }

    fn current_depth(&self) -> Option<NodeDepth> {
        match self {
            TreeIter::PreOrder(iter) => iter.current_depth(),
            TreeIter::PostOrder(iter) => iter.current_depth(),
            TreeIter::BreadthFirst(iter) => iter.current_depth(),
        }
    }
}

impl<T> Iterator for TreeIter<T>
where
    T: Clone,
{
    type Item = Option<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_node().map(|node| node.value())
    }
}

impl<T> std::iter::FusedIterator for TreeIter<T> where T: Clone {}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;
    use crate::test::scenario_tree;

    fn values(iter: TreeIter<char>) -> Vec<char> {
        iter.map(|v| v.unwrap()).collect()
    }

    #[traced_test]
    #[test]
    fn scenario_orders() {
        let tree = scenario_tree();
        let root = tree.root().unwrap();

        assert_eq!(
            values(TreeIter::new(IterationStrategy::DepthFirstPre, &root)),
            vec!['h', 'd', 'a', 'b', 'c', 'e', 'g', 'f']
        );
        assert_eq!(
            values(TreeIter::new(IterationStrategy::BreadthFirst, &root)),
            vec!['h', 'd', 'e', 'g', 'a', 'b', 'c', 'f']
        );
        assert_eq!(
            values(TreeIter::new(IterationStrategy::DepthFirstPost, &root)),
            vec!['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h']
        );
    }

    #[test]
    fn every_strategy_visits_each_node_once() {
        let tree = scenario_tree();
        let root = tree.root().unwrap();

        for strategy in IterationStrategy::ALL {
            let nodes: Vec<_> = TreeIter::new(strategy, &root).nodes().collect();
            assert_eq!(nodes.len(), tree.size());

            for (i, a) in nodes.iter().enumerate() {
                for b in &nodes[i + 1..] {
                    assert!(!a.ptr_eq(b), "{strategy} visited a node twice");
                }
            }
        }
    }

    #[test]
    fn root_position_per_strategy() {
        let tree = scenario_tree();
        let root = tree.root().unwrap();

        let first = TreeIter::new(IterationStrategy::DepthFirstPre, &root)
            .nodes()
            .next()
            .unwrap();
        assert!(first.ptr_eq(&root));

        let last = TreeIter::new(IterationStrategy::DepthFirstPost, &root)
            .nodes()
            .last()
            .unwrap();
        assert!(last.ptr_eq(&root));
    }

    #[test]
    fn breadth_first_is_level_ordered() {
        let tree = scenario_tree();
        let root = tree.root().unwrap();
        let mut iter = TreeIter::new(IterationStrategy::BreadthFirst, &root);

        let mut last_depth = 0;
        while let Some(node) = iter.next_node() {
            let depth = iter.current_depth().unwrap();
            assert_eq!(depth, node.depth());
            assert!(depth >= last_depth);
            last_depth = depth;
        }
    }

    #[test]
    fn current_tracks_last_pull() {
        let tree = scenario_tree();
        let root = tree.root().unwrap();

        for strategy in IterationStrategy::ALL {
            let mut iter = TreeIter::new(strategy, &root);
            assert!(iter.current().is_none());
            assert!(iter.current_depth().is_none());

            while let Some(value) = iter.next() {
                assert_eq!(iter.current().unwrap().value(), value);
            }
            assert_eq!(iter.strategy(), strategy);
        }
    }

    #[test]
    fn iteration_from_inner_node() {
        let tree = scenario_tree();
        let g = tree.root().unwrap().find_child(&'g').unwrap();

        for strategy in IterationStrategy::ALL {
            let mut iter = TreeIter::new(strategy, &g);
            let collected: Vec<_> = iter.by_ref().collect();
            assert_eq!(collected.len(), 2);
            assert!(iter.next().is_none());
        }
    }

    #[test]
    fn empty_iterator_yields_nothing() {
        for strategy in IterationStrategy::ALL {
            let mut iter = TreeIter::<u8>::empty(strategy);
            assert!(iter.next().is_none());
            assert!(iter.current().is_none());
        }
    }

    #[test]
    fn unset_values_are_yielded_as_none() {
        let root = NodeRef::new(1);
        root.attach(NodeRef::empty());
        root.add_value(3);

        let collected: Vec<_> = TreeIter::new(IterationStrategy::DepthFirstPre, &root).collect();
        assert_eq!(collected, vec![Some(1), None, Some(3)]);
    }

    #[test]
    fn pulls_see_live_structure() {
        let root = NodeRef::new(0);
        let a = root.add_value(1);
        let mut iter = TreeIter::new(IterationStrategy::BreadthFirst, &root);

        assert_eq!(iter.next(), Some(Some(0)));
        // `a` is queued but its children are read when it is pulled
        a.add_value(2);
        assert_eq!(iter.next(), Some(Some(1)));
        assert_eq!(iter.next(), Some(Some(2)));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn strategy_from_str() {
        assert_eq!(
            "pre-order".parse::<IterationStrategy>().unwrap(),
            IterationStrategy::DepthFirstPre
        );
        assert_eq!(
            "DEPTH_FIRST_POST".parse::<IterationStrategy>().unwrap(),
            IterationStrategy::DepthFirstPost
        );
        assert_eq!(
            "breath-first".parse::<IterationStrategy>().unwrap(),
            IterationStrategy::BreadthFirst
        );

        for strategy in IterationStrategy::ALL {
            assert_eq!(strategy.to_string().parse::<IterationStrategy>(), Ok(strategy));
        }
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        assert_eq!(
            "in-order".parse::<IterationStrategy>(),
            Err(TreeError::UnknownStrategy("in-order".to_string()))
        );
        assert!("".parse::<IterationStrategy>().is_err());
        for tag in ["pre", "post", "bfs", "preorder"] {
            assert!(tag.parse::<IterationStrategy>().is_err(), "{tag} parsed");
        }
    }
}
