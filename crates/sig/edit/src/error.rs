use sig_graph::GraphError;
use sig_reducer::ReduceError;

/// Errors raised while applying an edit.
///
/// A failed edit leaves the session graph as it was before the command.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
    #[error("reduction error: {0}")]
    Reduce(#[from] ReduceError),
}

/// Result type for edit operations.
pub type EditResult<T> = Result<T, EditError>;
