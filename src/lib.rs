//! # Bramble
//!
//! A multi-way tree container for Rust.
//!
//! ## Overview
//!
//! Nodes hold an optional value, an ordered list of children they own and a
//! weak reference back to their parent. A [`Tree`] owns the root node, counts
//! its nodes on demand, and hands out lazy iterators in pre-order, post-order
//! or breadth-first order.
//!
//! ```
//! use bramble::{IterationStrategy, Tree};
//!
//! let mut tree = Tree::with_root('h');
//! let root = tree.root().unwrap();
//! let d = tree.add('d', &root).unwrap();
//! tree.add('a', &d).unwrap();
//! tree.add('e', &root).unwrap();
//!
//! let post: Vec<_> = tree
//!     .iter_with(IterationStrategy::DepthFirstPost)
//!     .flatten()
//!     .collect();
//! assert_eq!(post, vec!['a', 'd', 'e', 'h']);
//! assert_eq!(tree.filter(|v| *v > 'd'), vec!['h', 'e']);
//! ```

mod builder;
mod compare;
mod display;
mod error;
mod hash;
mod id;
mod iterator;
mod node;
mod noderef;
mod tree;


pub use builder::*;
pub use display::{ListDisplay, TreeDisplay};
pub use error::{TreeError, TreeResult};
pub use id::*;
pub use iterator::{
    BreadthFirstIter, IterNode, IterationStrategy, Nodes, PostOrderIter, PreOrderIter, Traversal,
    TreeIter,
};
pub use node::Node;
pub use noderef::NodeRef;
pub use tree::Tree;

pub type NodeDepth = usize;

pub type IdGenerator = id::AtomicU64Generator;
pub type NodeId = <IdGenerator as UniqueGenerator>::Output;
