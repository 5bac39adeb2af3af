use tracing::trace;

use crate::{NodeDepth, NodeRef};

use super::{IterNode, Traversal};

/// Depth-first traversal yielding each node before its children.
///
/// Driven by an explicit stack. Children are pushed in reverse so the
/// leftmost child is popped next.
pub struct PreOrderIter<T> {
    stack: Vec<IterNode<T>>,
    current: Option<IterNode<T>>,
}

impl<T> PreOrderIter<T> {
    pub fn new(node: &NodeRef<T>) -> Self {
        Self {
            stack: Vec::from([IterNode::new(0, node.clone())]),
            current: None,
        }
    }
}

impl<T> Default for PreOrderIter<T> {
    fn default() -> Self {
        Self {
            stack: Vec::new(),
            current: None,
        }
    }
}

impl<T> Traversal for PreOrderIter<T> {
    type Value = T;

    fn next_node(&mut self) -> Option<NodeRef<T>> {
        let entry = self.stack.pop()?;

        self.stack.extend(entry.children().into_iter().rev());

        trace!(id = entry.id(), depth = entry.depth(), "pre-order visit");
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

impl<T> Iterator for PreOrderIter<T>
where
    T: Clone,
{
    type Item = Option<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_node().map(|node| node.value())
    }
}

impl<T> std::iter::FusedIterator for PreOrderIter<T> where T: Clone {}
