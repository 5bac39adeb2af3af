use std::sync::atomic::{AtomicU64, Ordering};

pub trait UniqueGenerator: std::fmt::Debug {
    type Output: std::fmt::Debug;
    /// Generate a unique value
    fn generate(&self) -> Self::Output;
}

#[derive(Default, Debug)]
pub struct AtomicU64Generator {
    next_id: AtomicU64,
}

impl AtomicU64Generator {
    pub const fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
        }
    }
}

impl UniqueGenerator for AtomicU64Generator {
    type Output = u64;

    fn generate(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

// Shared by every node constructed in this process
static NODE_IDS: AtomicU64Generator = AtomicU64Generator::new();

/// Allocate the next node id
pub(crate) fn next_node_id() -> crate::NodeId {
    NODE_IDS.generate()
}
