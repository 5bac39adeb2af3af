use std::collections::VecDeque;

use tracing::trace;

use crate::{NodeDepth, NodeRef};

use super::{IterNode, Traversal};

/// Level order traversal over a FIFO queue
pub struct BreadthFirstIter<T> {
    queue: VecDeque<IterNode<T>>,
    current: Option<IterNode<T>>,
}

impl<T> BreadthFirstIter<T> {
    pub fn new(node: &NodeRef<T>) -> Self {
        Self {
            queue: VecDeque::from([IterNode::new(0, node.clone())]),
            current: None,
        }
    }
}

impl<T> Default for BreadthFirstIter<T> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
            current: None,
        }
    }
}

impl<T> Traversal for BreadthFirstIter<T> {
    type Value = T;

    fn next_node(&mut self) -> Option<NodeRef<T>> {
        let entry = self.queue.pop_front()?;

        self.queue.extend(entry.children());

        trace!(id = entry.id(), depth = entry.depth(), "breadth-first visit");
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

impl<T> Iterator for BreadthFirstIter<T>
where
    T: Clone,
{
    type Item = Option<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_node().map(|node| node.value())
    }
}

impl<T> std::iter::FusedIterator for BreadthFirstIter<T> where T: Clone {}
