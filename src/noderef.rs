use std::{
    cell::{BorrowError, Ref, RefCell, RefMut},
    rc::Rc,
};

use tracing::debug;

use crate::{
    error::{TreeError, TreeResult},
    iterator::{IterationStrategy, PreOrderIter, Traversal as _, TreeIter},
    node::Node,
    NodeId,
};

/// Shared handle to a [`Node`].
///
/// Cloning a `NodeRef` clones the handle, not the node. Identity comparisons
/// go through [`NodeRef::ptr_eq`], while `==` compares node values the way
/// [`PartialEq`] is documented below.
pub struct NodeRef<T> {
    node_ref: Rc<RefCell<Node<T>>>,
}

impl<T> Clone for NodeRef<T> {
    fn clone(&self) -> Self {
        Self {
            node_ref: self.node_ref.clone(),
        }
    }
}

impl<T> NodeRef<T> {
    /// Create a detached node holding `data`
    pub fn new(data: T) -> Self {
        Self::from_node(Node::new(Some(data)))
    }

    /// Create a detached node without a value
    pub fn empty() -> Self {
        Self::from_node(Node::new(None))
    }

    pub fn from_node(node: Node<T>) -> Self {
        Self {
            node_ref: Rc::new(RefCell::new(node)),
        }
    }

    pub(crate) fn from_rc(node_ref: Rc<RefCell<Node<T>>>) -> Self {
        Self { node_ref }
    }

    /// Get a reference to the inner node
    pub fn node(&self) -> Ref<'_, Node<T>> {
        self.node_ref.borrow()
    }

    pub fn try_node(&self) -> Result<Ref<'_, Node<T>>, BorrowError> {
        self.node_ref.try_borrow()
    }

    /// Get a mutable reference to the inner node
    pub fn node_mut(&self) -> RefMut<'_, Node<T>> {
        self.node_ref.borrow_mut()
    }

    pub fn id(&self) -> NodeId {
        self.node().id()
    }

    /// True when both handles point at the same node
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.node_ref, &other.node_ref)
    }

    /// Calls the provided closure with a reference to the node's data
    pub fn with_data<R, F>(&self, f: F) -> R
    where
        F: FnOnce(Option<&T>) -> R,
    {
        f(self.node().data())
    }

    /// Calls the provided closure with a mutable reference to the node's data
    pub fn with_data_mut<R, F>(&self, f: F) -> R
    where
        F: FnOnce(Option<&mut T>) -> R,
    {
        f(self.node_mut().data_mut())
    }

    pub fn value(&self) -> Option<T>
    where
        T: Clone,
    {
        self.node().data().cloned()
    }

    /// Set the value, returning the previous one
    pub fn set_value(&self, data: T) -> Option<T> {
        self.node_mut().set_data(Some(data))
    }

    pub fn has_children(&self) -> bool {
        self.node().has_children()
    }

    pub fn num_children(&self) -> usize {
        self.node().num_children()
    }

    /// Snapshot of the child handles in order
    pub fn children(&self) -> Vec<NodeRef<T>> {
        self.node().children().to_vec()
    }

    pub fn is_root(&self) -> bool {
        self.node().is_root()
    }

    pub fn parent(&self) -> Option<NodeRef<T>> {
        self.node().parent()
    }

    /// Replace the parent back-reference only.
    ///
    /// The new parent's children are left untouched. Use [`NodeRef::add_child`]
    /// and [`NodeRef::remove_child`] to move a node between parents.
    pub fn set_parent(&self, parent: Option<&NodeRef<T>>) {
        self.node_mut()
            .set_parent_ref(parent.map(|p| Rc::downgrade(&p.node_ref)));
    }

    /// Topmost ancestor of this node, which is the node itself for a root
    pub fn root(&self) -> NodeRef<T> {
        let mut current = self.clone();
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    /// Number of edges between this node and its root
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.parent();
        while let Some(parent) = current {
            depth += 1;
            current = parent.parent();
        }
        depth
    }

    /// Append without any checks
    pub(crate) fn attach(&self, child: NodeRef<T>) {
        child
            .node_mut()
            .set_parent_ref(Some(Rc::downgrade(&self.node_ref)));
        self.node_mut().children_mut().push(child);
    }

    /// Append `child` as the last child of this node.
    ///
    /// A child that still belongs to another parent is detached from it first.
    /// Fails with [`TreeError::Cycle`] when `child` is this node or one of its
    /// ancestors.
    pub fn add_child(&self, child: NodeRef<T>) -> TreeResult<NodeRef<T>> {
        if child.ptr_eq(self) || child.is_ancestor_of(self) {
            return Err(TreeError::Cycle);
        }

        child.detach();
        self.attach(child.clone());
        Ok(child)
    }

    /// Wrap `data` in a fresh node and append it as the last child
    pub fn add_value(&self, data: T) -> NodeRef<T> {
        let child = NodeRef::new(data);
        self.attach(child.clone());
        child
    }

    /// Remove `child` by identity from this node's children.
    ///
    /// Returns the removed node with its parent cleared, or `None` if `child`
    /// is not a direct child of this node.
    pub fn remove_child(&self, child: &NodeRef<T>) -> Option<NodeRef<T>> {
        let index = self
            .node()
            .children()
            .iter()
            .position(|c| c.ptr_eq(child))?;

        let removed = self.node_mut().children_mut().remove(index);
        removed.node_mut().set_parent_ref(None);
        Some(removed)
    }

    /// Remove the first descendant holding `data`, searched in pre-order.
    ///
    /// The match is detached from whichever node owns it, so it need not be a
    /// direct child. This node itself is never removed.
    pub fn remove_value(&self, data: &T) -> Option<NodeRef<T>>
    where
        T: PartialEq,
    {
        let found = PreOrderIter::new(self)
            .nodes()
            .skip(1)
            .find(|node| node.holds(data))?;

        let parent = found.parent()?;
        parent.remove_child(&found)
    }

    /// Detach this node from its parent, returning the former parent
    pub fn detach(&self) -> Option<NodeRef<T>> {
        let parent = self.parent();
        if let Some(parent) = &parent {
            parent.remove_child(self);
        }
        self.node_mut().set_parent_ref(None);
        parent
    }

    pub(crate) fn holds(&self, data: &T) -> bool
    where
        T: PartialEq,
    {
        self.node().data() == Some(data)
    }

    /// First node of this subtree holding `data`, in pre-order
    pub fn find_child(&self, data: &T) -> Option<NodeRef<T>>
    where
        T: PartialEq,
    {
        self.find_child_with(data, IterationStrategy::default())
    }

    /// First node of this subtree holding `data`, in `strategy` order
    pub fn find_child_with(&self, data: &T, strategy: IterationStrategy) -> Option<NodeRef<T>>
    where
        T: PartialEq,
    {
        let mut iter = TreeIter::new(strategy, self);
        while iter.next_node().is_some() {
            if iter.current().is_some_and(|node| node.holds(data)) {
                return iter.current().cloned();
            }
        }
        None
    }

    pub fn contains(&self, data: &T) -> bool
    where
        T: PartialEq,
    {
        self.contains_with(data, IterationStrategy::default())
    }

    pub fn contains_with(&self, data: &T, strategy: IterationStrategy) -> bool
    where
        T: PartialEq,
    {
        TreeIter::new(strategy, self)
            .nodes()
            .any(|node| node.holds(data))
    }

    /// Number of nodes in this subtree, including this node
    pub fn size(&self) -> usize {
        PreOrderIter::new(self).nodes().count()
    }

    /// Collect the values of this subtree in `strategy` order.
    ///
    /// The vector holds exactly one slot per node of the subtree.
    pub fn to_vec(&self, strategy: IterationStrategy) -> Vec<Option<T>>
    where
        T: Clone,
    {
        TreeIter::new(strategy, self).collect()
    }

    /// Turn this node into an isolated, empty placeholder.
    ///
    /// Children are dropped, the value is unset and the node is detached from
    /// its parent.
    pub fn clear(&self) {
        debug!("Clearing node {}", self.id());
        self.detach();

        let children = std::mem::take(self.node_mut().children_mut());
        for child in children {
            child.node_mut().set_parent_ref(None);
        }
        self.node_mut().set_data(None);
    }

    /// True when `other`'s parent is this node
    pub fn is_parent_of(&self, other: &NodeRef<T>) -> bool {
        other.parent().is_some_and(|parent| parent.ptr_eq(self))
    }

    /// True when this node's parent is `other`
    pub fn is_child_of(&self, other: &NodeRef<T>) -> bool {
        other.is_parent_of(self)
    }

    /// True when this node appears on `other`'s parent chain
    pub fn is_ancestor_of(&self, other: &NodeRef<T>) -> bool {
        let mut current = other.parent();
        while let Some(parent) = current {
            if parent.ptr_eq(self) {
                return true;
            }
            current = parent.parent();
        }
        false
    }

    pub(crate) fn is_last_child(&self) -> bool {
        let Some(parent) = self.parent() else {
            return true;
        };
        let node = parent.node();
        node.children().last().is_some_and(|last| last.ptr_eq(self))
    }

    /// Copy this subtree into fresh nodes. The copy has no parent.
    pub fn deep_copy(&self) -> NodeRef<T>
    where
        T: Clone,
    {
        let copy = NodeRef::from_node(Node::new(self.value()));

        // Pairs of (source, destination) still waiting for their children
        let mut stack = vec![(self.clone(), copy.clone())];

        while let Some((source, dest)) = stack.pop() {
            for child in source.node().children() {
                let child_copy = NodeRef::from_node(Node::new(child.value()));
                dest.attach(child_copy.clone());
                stack.push((child.clone(), child_copy));
            }
        }

        copy
    }

    /// Iterate this subtree in `strategy` order
    pub fn iter(&self, strategy: IterationStrategy) -> TreeIter<T> {
        TreeIter::new(strategy, self)
    }
}

/// Two nodes are equal when their values are equal, their immediate children
/// hold equal values in the same order, and their parents are equal by the
/// same rule, all the way up to the root.
impl<T> PartialEq for NodeRef<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }

        let (a, b) = (self.node(), other.node());

        a.data() == b.data()
            && a.num_children() == b.num_children()
            && a.children()
                .iter()
                .zip(b.children())
                .all(|(x, y)| x.ptr_eq(y) || x.node().data() == y.node().data())
            && a.parent() == b.parent()
    }
}

impl<T> Eq for NodeRef<T> where T: Eq {}

impl<T> std::hash::Hash for NodeRef<T>
where
    T: std::hash::Hash,
{
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        let node = self.node();
        node.data().hash(state);
        node.num_children().hash(state);
        for child in node.children() {
            child.node().data().hash(state);
        }
        node.parent().hash(state);
    }
}

impl<T> std::fmt::Debug for NodeRef<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("node", &self.try_node())
            .finish()
    }
}
