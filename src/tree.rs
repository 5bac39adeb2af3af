use colored::Colorize;
use tracing::debug;

use crate::{
    error::{TreeError, TreeResult},
    iterator::{IterationStrategy, Traversal as _, TreeIter},
    NodeRef,
};

/// A multi-way tree owning its root node.
///
/// The node count is taken from the live structure on every call, so edits
/// made directly on a [`NodeRef`] handed out by the tree are always
/// reflected in [`Tree::size`].
pub struct Tree<T> {
    root: Option<NodeRef<T>>,
    strategy: IterationStrategy,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    /// An empty tree iterating in pre-order by default
    pub fn new() -> Self {
        Self::with_strategy(IterationStrategy::default())
    }

    /// An empty tree with a default iteration strategy
    pub fn with_strategy(strategy: IterationStrategy) -> Self {
        Self {
            root: None,
            strategy,
        }
    }

    /// A tree holding a single root value
    pub fn with_root(data: T) -> Self {
        Self::from_parts(Some(NodeRef::new(data)), IterationStrategy::default())
    }

    /// Build a tree around an existing root node.
    ///
    /// Fails with [`TreeError::ForeignNode`] if the node still has a parent.
    pub fn from_node(root: NodeRef<T>, strategy: IterationStrategy) -> TreeResult<Self> {
        if !root.is_root() {
            return Err(TreeError::ForeignNode);
        }
        Ok(Self::from_parts(Some(root), strategy))
    }

    pub(crate) fn from_parts(root: Option<NodeRef<T>>, strategy: IterationStrategy) -> Self {
        Self { root, strategy }
    }

    /// Install a new root holding `data`, discarding any previous nodes
    pub fn set_root(&mut self, data: T) -> NodeRef<T> {
        let root = NodeRef::new(data);
        debug!("{} node {}", "Set root".bright_purple(), root.id());
        self.root = Some(root.clone());
        root
    }

    pub fn root(&self) -> Option<NodeRef<T>> {
        self.root.clone()
    }

    pub fn root_ref(&self) -> Option<&NodeRef<T>> {
        self.root.as_ref()
    }

    /// Number of nodes reachable from the root, counted by a pre-order walk
    pub fn size(&self) -> usize {
        self.root.as_ref().map_or(0, NodeRef::size)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Strategy used whenever none is given explicitly
    pub fn strategy(&self) -> IterationStrategy {
        self.strategy
    }

    /// True when `node` is reachable from this tree's root
    pub fn owns(&self, node: &NodeRef<T>) -> bool {
        self.root
            .as_ref()
            .is_some_and(|root| node.root().ptr_eq(root))
    }

    fn ensure_owned(&self, node: &NodeRef<T>) -> TreeResult<()> {
        if self.root.is_none() {
            return Err(TreeError::EmptyTree);
        }
        if !self.owns(node) {
            return Err(TreeError::ForeignNode);
        }
        Ok(())
    }

    /// Append `data` as the last child of `parent`
    pub fn add(&mut self, data: T, parent: &NodeRef<T>) -> TreeResult<NodeRef<T>> {
        self.ensure_owned(parent)?;

        let added = parent.add_value(data);

        debug!(
            "{} node {} under {}",
            "Add".green(),
            added.id(),
            parent.id()
        );
        Ok(added)
    }

    /// Remove the first descendant of `parent` holding `data`, together with
    /// its subtree. Returns `Ok(None)` if no descendant matches.
    pub fn remove(&mut self, data: &T, parent: &NodeRef<T>) -> TreeResult<Option<NodeRef<T>>>
    where
        T: PartialEq,
    {
        self.ensure_owned(parent)?;

        let removed = parent.remove_value(data);
        if let Some(node) = &removed {
            debug!(
                "{} node {} with {} nodes",
                "Remove".red(),
                node.id(),
                node.size()
            );
        }
        Ok(removed)
    }

    /// Clear `node`, dropping its subtree from the tree. Clearing the root
    /// empties the tree. Returns the number of nodes removed.
    pub fn clear(&mut self, node: &NodeRef<T>) -> TreeResult<usize> {
        self.ensure_owned(node)?;

        let count = node.size();
        node.clear();

        if self.root.as_ref().is_some_and(|root| root.ptr_eq(node)) {
            self.root = None;
        }

        debug!(
            "{} node {} with {} nodes",
            "Clear".yellow(),
            node.id(),
            count
        );
        Ok(count)
    }

    pub fn contains(&self, data: &T, node: &NodeRef<T>) -> bool
    where
        T: PartialEq,
    {
        node.contains_with(data, self.strategy)
    }

    /// First node below and including `node` holding `data`, in the default
    /// strategy order
    pub fn find_child(&self, data: &T, node: &NodeRef<T>) -> Option<NodeRef<T>>
    where
        T: PartialEq,
    {
        node.find_child_with(data, self.strategy)
    }

    pub fn to_vec(&self, node: &NodeRef<T>, strategy: IterationStrategy) -> Vec<Option<T>>
    where
        T: Clone,
    {
        node.to_vec(strategy)
    }

    pub fn children(&self, node: &NodeRef<T>) -> Vec<NodeRef<T>> {
        node.children()
    }

    pub fn get(&self, node: &NodeRef<T>) -> Option<T>
    where
        T: Clone,
    {
        node.value()
    }

    /// Replace the value of `node`, returning the previous one
    pub fn set(&self, data: T, node: &NodeRef<T>) -> Option<T> {
        node.set_value(data)
    }

    pub fn has_children(&self, node: &NodeRef<T>) -> bool {
        node.has_children()
    }

    pub fn is_root(&self, node: &NodeRef<T>) -> bool {
        node.is_root()
    }

    pub fn parent(&self, node: &NodeRef<T>) -> Option<NodeRef<T>> {
        node.parent()
    }

    /// See [`NodeRef::set_parent`]. Only the back-reference changes: the
    /// node stays in its old parent's children, so traversals still reach
    /// it there, while [`Tree::remove`] and [`NodeRef::remove_value`] detach
    /// through the new back-reference and fail to unlink it, returning
    /// `None`. Use [`NodeRef::add_child`] to move a node between parents.
    pub fn set_parent(&self, node: &NodeRef<T>, parent: Option<&NodeRef<T>>) {
        node.set_parent(parent)
    }

    pub fn is_parent_of(&self, first: &NodeRef<T>, second: &NodeRef<T>) -> bool {
        first.is_parent_of(second)
    }

    pub fn is_child_of(&self, first: &NodeRef<T>, second: &NodeRef<T>) -> bool {
        first.is_child_of(second)
    }

    /// Independent copy of the subtree at `node`
    pub fn sub_tree(&self, node: &NodeRef<T>) -> Tree<T>
    where
        T: Clone,
    {
        let root = node.deep_copy();
        debug!("Copied subtree of node {} into {}", node.id(), root.id());
        Tree::from_parts(Some(root), self.strategy)
    }

    /// Values of the whole tree matching `predicate`, in default strategy order
    pub fn filter<P>(&self, predicate: P) -> Vec<T>
    where
        T: Clone,
        P: FnMut(&T) -> bool,
    {
        match &self.root {
            Some(root) => self.filter_from(root, predicate),
            None => Vec::new(),
        }
    }

    /// Values of the subtree at `node` matching `predicate`, in default
    /// strategy order
    pub fn filter_from<P>(&self, node: &NodeRef<T>, mut predicate: P) -> Vec<T>
    where
        T: Clone,
        P: FnMut(&T) -> bool,
    {
        TreeIter::new(self.strategy, node)
            .nodes()
            .filter_map(|node| node.with_data(|data| data.filter(|v| predicate(*v)).cloned()))
            .collect()
    }

    /// Iterate from the root in the default strategy
    pub fn iter(&self) -> TreeIter<T> {
        TreeIter::anchored(self.strategy, self.root.as_ref())
    }

    /// Iterate from `node` in the default strategy
    pub fn iter_from(&self, node: &NodeRef<T>) -> TreeIter<T> {
        TreeIter::new(self.strategy, node)
    }

    /// Iterate from the root in `strategy`
    pub fn iter_with(&self, strategy: IterationStrategy) -> TreeIter<T> {
        TreeIter::anchored(strategy, self.root.as_ref())
    }

    /// Iterate from `node` in `strategy`
    pub fn iter_with_from(&self, strategy: IterationStrategy, node: &NodeRef<T>) -> TreeIter<T> {
        TreeIter::new(strategy, node)
    }
}

impl<'a, T> IntoIterator for &'a Tree<T>
where
    T: Clone,
{
    type Item = Option<T>;
    type IntoIter = TreeIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> std::fmt::Debug for Tree<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tree")
            .field("size", &self.size())
            .field("strategy", &self.strategy)
            .field("root", &self.root)
            .finish()
    }
}
