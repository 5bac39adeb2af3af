use tracing::trace;

use crate::{NodeDepth, NodeRef};

use super::{IterNode, Traversal};

/// Depth-first traversal yielding each node after all of its children.
///
/// Uses two stacks. A pull first drains `expand` into `output`, pushing each
/// node's children onto `expand` in order as it goes, then pops `output`. The
/// reversed expansion order is exactly children-before-parent.
pub struct PostOrderIter<T> {
    expand: Vec<IterNode<T>>,
    output: Vec<IterNode<T>>,
    current: Option<IterNode<T>>,
}

impl<T> PostOrderIter<T> {
    pub fn new(node: &NodeRef<T>) -> Self {
        Self {
            expand: Vec::from([IterNode::new(0, node.clone())]),
            output: Vec::new(),
            current: None,
        }
    }
}

impl<T> Default for PostOrderIter<T> {
    fn default() -> Self {
        Self {
            expand: Vec::new(),
            output: Vec::new(),
            current: None,
        }
    }
}

impl<T> Traversal for PostOrderIter<T> {
    type Value = T;

    fn next_node(&mut self) -> Option<NodeRef<T>> {
        while let Some(entry) = self.expand.pop() {
            self.expand.extend(entry.children());
            self.output.push(entry);
        }

        let entry = self.output.pop()?;

        trace!(id = entry.id(), depth = entry.depth(), "post-order visit");
        let node = entry.node_ref().clone();
        self.current = Some(entry);
        Some(node)
    }

    fn current(&self) -> Option<&NodeRef<T>> {
        self.current.as_ref().map(IterNode::node_ref)
    }

    fn current_depth(&self) -> Option<NodeDepth> {
        self.current.as_ref().map(IterNode::depth)
    }
}

impl<T> Iterator for PostOrderIter<T>
where
    T: Clone,
{
    type Item = Option<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_node().map(|node| node.value())
    }
}

impl<T> std::iter::FusedIterator for PostOrderIter<T> where T: Clone {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::scenario_tree;

    #[test]
    fn children_before_parent() {
        let tree = scenario_tree();
        let root = tree.root().unwrap();
        let order: Vec<_> = PostOrderIter::new(&root).nodes().collect();

        for (index, node) in order.iter().enumerate() {
            if let Some(parent) = node.parent() {
                let parent_index = order.iter().position(|n| n.ptr_eq(&parent)).unwrap();
                assert!(parent_index > index);
            }
        }
    }

    #[test]
    fn deep_chain() {
        let root = NodeRef::new(0);
        let mut tail = root.clone();
        for i in 1..100 {
            tail = tail.add_value(i);
        }

        let values: Vec<_> = PostOrderIter::new(&root).map(Option::unwrap).collect();
        let expected: Vec<_> = (0..100).rev().collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn depth_of_each_visit() {
        let tree = scenario_tree();
        let root = tree.root().unwrap();
        let mut iter = PostOrderIter::new(&root);

        let mut depths = Vec::new();
        while iter.next_node().is_some() {
            depths.push(iter.current_depth().unwrap());
        }
        // a b c d e f g h
        assert_eq!(depths, vec![2, 2, 2, 1, 1, 2, 1, 0]);
    }
}
