use crate::{
    iterator::{PreOrderIter, Traversal as _},
    NodeRef, Tree,
};

/// Walk two subtrees in lockstep pre-order, comparing depth and value of
/// every visited pair.
pub(crate) fn subtree_eq<T>(left: Option<&NodeRef<T>>, right: Option<&NodeRef<T>>) -> bool
where
    T: PartialEq,
{
    let mut left = left.map(PreOrderIter::new).unwrap_or_default();
    let mut right = right.map(PreOrderIter::new).unwrap_or_default();

    loop {
        match (left.next_node(), right.next_node()) {
            (Some(a), Some(b)) => {
                if left.current_depth() != right.current_depth() {
                    return false;
                }
                if !a.ptr_eq(&b) && a.node().data() != b.node().data() {
                    return false;
                }
            }
            (None, None) => return true,
            _ => return false,
        }
    }
}

/// Tree Comparison
///
/// Trees are equal when their pre-order walks visit equal values at equal
/// depths. The default iteration strategy of either tree plays no part.
impl<T> PartialEq for Tree<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        subtree_eq(self.root_ref(), other.root_ref())
    }
}

impl<T> Eq for Tree<T> where T: Eq {}
