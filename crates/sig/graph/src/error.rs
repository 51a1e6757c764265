use sig_types::{InterId, Shape, SystemId, TypesError};

use crate::relation::RelationType;

/// Structural violations rejected at the point of graph mutation.
///
/// When an operation returns one of these, the graph is left exactly as it
/// was before the call.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("unknown inter: {0}")]
    UnknownInter(InterId),
    #[error("{inter} does not belong to {expected}")]
    ForeignSystem { expected: SystemId, inter: InterId },
    #[error("relation endpoints must be distinct: {0}")]
    SelfRelation(InterId),
    #[error("inter {0} is removed")]
    InterRemoved(InterId),
    #[error("inter {0} is already active")]
    AlreadyActive(InterId),
    #[error("{relation} cannot link {source_shape} to {target_shape}")]
    InvalidEndpoints {
        relation: RelationType,
        source_shape: Shape,
        target_shape: Shape,
    },
    #[error("duplicate {relation} relation between {from} and {to}")]
    DuplicateRelation {
        relation: RelationType,
        from: InterId,
        to: InterId,
    },
    #[error("no {relation} relation between {from} and {to}")]
    RelationNotFound {
        relation: RelationType,
        from: InterId,
        to: InterId,
    },
    #[error("{child} already belongs to ensemble {parent}")]
    SecondParent { child: InterId, parent: InterId },
    #[error("containment of {child} in {parent} would create a cycle")]
    ContainmentCycle { parent: InterId, child: InterId },
    #[error("ensemble {ensemble} is full ({max} members)")]
    ArityExceeded { ensemble: InterId, max: usize },
    #[error("invalid support weight: {0}")]
    InvalidWeight(f64),
    #[error("snapshot of {actual} cannot be restored into {expected}")]
    SnapshotMismatch { expected: SystemId, actual: SystemId },
    #[error(transparent)]
    Types(#[from] TypesError),
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
