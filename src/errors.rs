use thiserror::Error;

use crate::tree::NodeId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("parent node not registered: {0:?}")]
    ParentNotFound(NodeId),

    #[error("node not registered: {0:?}")]
    NodeNotFound(NodeId),

    #[error("root node cannot be deleted")]
    CannotDeleteRoot,

    #[error("cannot move {node:?} into its own subtree at {target:?}")]
    CycleNotAllowed { node: NodeId, target: NodeId },

    #[error("cannot shift between levels {node_level} and {shifted_level}")]
    LevelMismatch {
        node_level: i64,
        shifted_level: i64,
    },

    #[error("node {0:?} is not a sibling under the same parent")]
    OutOfParentBounds(NodeId),
}

pub type TreeResult<T> = Result<T, TreeError>;
