//! A module providing builders for constructing trees and nodes.
//!
//! The `NodeBuilder` and `TreeBuilder` types enable building tree structures in a composable way.
//!

use std::marker::PhantomData;

use tracing::{debug, debug_span, warn};

use crate::{IterationStrategy, NodeRef, Tree};

/// A builder for constructing children from a parent node.
///
/// The `NodeBuilder` type provides methods for adding child nodes to the current parent node.
/// It is designed to be used with the `TreeBuilder` type.
pub struct NodeBuilder<'a, T, E> {
    // NodeRef of this node
    node_ref: &'a NodeRef<T>,

    // Running count of nodes created by the whole build
    count: &'a mut usize,

    _phantom: PhantomData<E>,
}

impl<'a, T, E> NodeBuilder<'a, T, E> {
    fn new(node_ref: &'a NodeRef<T>, count: &'a mut usize) -> Self {
        Self {
            node_ref,
            count,
            _phantom: PhantomData,
        }
    }

    /// Adds a child to the current node.
    ///
    /// # Arguments
    ///
    /// * `data`: The data to associate with the child node.
    /// * `f`: A closure that takes the child builder and adds its own children.
    pub fn child<F>(&mut self, data: T, f: F) -> Result<NodeRef<T>, E>
    where
        F: FnOnce(&mut NodeBuilder<'_, T, E>) -> Result<(), E>,
    {
        let child = self.node_ref.add_value(data);
        *self.count += 1;

        let mut node_builder = NodeBuilder::<T, E>::new(&child, &mut *self.count);

        // Call the supplied closure with the NodeBuilder to add this node's children
        f(&mut node_builder)?;

        Ok(child)
    }

    /// Adds a child without children of its own
    pub fn leaf(&mut self, data: T) -> NodeRef<T> {
        *self.count += 1;
        self.node_ref.add_value(data)
    }

    pub fn node(&self) -> &NodeRef<T> {
        self.node_ref
    }
}

/// A builder for constructing trees.
///
/// There is a `root` method on the builder to add an initial root node, which calls
/// the provided closure with a NodeBuilder that can be used to recursively build children of
/// the node. The closures expect a Result<(), E> to be returned, where E is your defined error
/// type. This allows errors within your closures to propagate.
///
/// # Examples
///
/// ```
/// use bramble::{IterationStrategy, TreeBuilder};
///
/// let tree = TreeBuilder::<char, ()>::new()
///     .strategy(IterationStrategy::BreadthFirst)
///     .root('h', |h| {
///         h.child('d', |d| {
///             d.leaf('a');
///             Ok(())
///         })?;
///         h.leaf('e');
///         Ok(())
///     })
///     .unwrap()
///     .done();
///
/// assert_eq!(tree.size(), 4);
/// assert_eq!(tree.to_string(), "[h, d, e, a]");
/// ```
pub struct TreeBuilder<T, E> {
    root: Option<NodeRef<T>>,
    strategy: IterationStrategy,
    debug_span: tracing::Span,
    _phantom: PhantomData<E>,
}

impl<T, E> Default for TreeBuilder<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> TreeBuilder<T, E> {
    /// Creates a new `TreeBuilder` instance.
    pub fn new() -> Self {
        let debug_span = debug_span!("TreeBuilder");
        debug_span.in_scope(|| debug!("Created new TreeBuilder"));

        Self {
            root: None,
            strategy: IterationStrategy::default(),
            debug_span,
            _phantom: PhantomData,
        }
    }

    /// Default iteration strategy of the built tree
    pub fn strategy(mut self, strategy: IterationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Adds a root node to the tree and returns the updated builder.
    ///
    /// Calling `root` again replaces the previous root and everything built
    /// below it.
    ///
    /// # Arguments
    ///
    /// * `data`: The data to associate with the root node.
    /// * `f`: A closure that takes the root builder and adds its own children.
    pub fn root<F>(mut self, data: T, f: F) -> Result<Self, E>
    where
        F: FnOnce(&mut NodeBuilder<'_, T, E>) -> Result<(), E>,
    {
        let span = self.debug_span.clone();
        let _enter = span.enter();

        if self.root.is_some() {
            warn!("Replacing existing root");
        }

        let node_ref = NodeRef::new(data);
        let mut count = 1;

        let mut node_builder = NodeBuilder::<T, E>::new(&node_ref, &mut count);

        // Call the supplied closure with the NodeBuilder to add this node's children
        f(&mut node_builder)?;

        debug!("Added root with {} nodes", count);
        self.root = Some(node_ref);

        Ok(self)
    }

    /// Returns the constructed tree when finished building it.
    pub fn done(self) -> Tree<T> {
        self.debug_span.in_scope(|| {
            debug!("Finished building tree");
            Tree::from_parts(self.root, self.strategy)
        })
    }
}
