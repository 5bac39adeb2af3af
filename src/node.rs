use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use tracing::trace;

use crate::{id::next_node_id, noderef::NodeRef, NodeId};

/// Weak back-reference from a child to the node owning it
pub(crate) type ParentRef<T> = Weak<RefCell<Node<T>>>;

/// Storage record for a single tree element.
///
/// A node owns its children through [`NodeRef`] handles and refers back to its
/// parent through a weak reference, so dropping a parent releases the whole
/// subtree unless the caller still holds handles into it.
pub struct Node<T> {
    id: NodeId,
    data: Option<T>,
    parent: Option<ParentRef<T>>,
    children: Vec<NodeRef<T>>,
}

impl<T> Node<T> {
    pub fn new(data: Option<T>) -> Self {
        let id = next_node_id();
        trace!("Created Node ID {}", id);

        Self {
            id,
            data,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        self.data.as_mut()
    }

    /// Replace the value, returning the previous one
    pub fn set_data(&mut self, data: Option<T>) -> Option<T> {
        std::mem::replace(&mut self.data, data)
    }

    /// Upgrade the parent back-reference. Returns `None` for a root, or when
    /// the parent has already been dropped.
    pub fn parent(&self) -> Option<NodeRef<T>> {
        self.parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(NodeRef::from_rc)
    }

    pub fn children(&self) -> &[NodeRef<T>] {
        &self.children
    }

    /// Return the number of child nodes for this node
    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.parent().is_none()
    }

    pub(crate) fn set_parent_ref(&mut self, parent: Option<ParentRef<T>>) {
        self.parent = parent;
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<NodeRef<T>> {
        &mut self.children
    }
}

impl<T> std::fmt::Debug for Node<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("data", &self.data)
            .field(
                "parent_id",
                &format_args!("{:?}", self.parent().map(|p| p.id())),
            )
            .field(
                "child_ids",
                &format_args!(
                    "{:?}",
                    self.children.iter().map(|c| c.id()).collect::<Vec<_>>()
                ),
            )
            .finish()
    }
}
