use thiserror::Error;

/// Errors raised by tree operations.
///
/// Lookups that simply find nothing are not errors, they return `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("unknown iteration strategy `{0}`")]
    UnknownStrategy(String),

    #[error("node is not part of this tree")]
    ForeignNode,

    #[error("node cannot become a descendant of itself")]
    Cycle,

    #[error("tree has no root")]
    EmptyTree,
}

pub type TreeResult<T> = Result<T, TreeError>;
