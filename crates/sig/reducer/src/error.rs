use sig_graph::GraphError;
use sig_types::SystemId;

/// Reasons a reduction pass aborts.
///
/// On every variant the SIG is restored to its state before the pass.
#[derive(Debug, thiserror::Error)]
pub enum ReduceError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
    #[error("reduction of {system} did not converge within {rounds} rounds")]
    NonConvergence { system: SystemId, rounds: usize },
    #[error("reduction of {0} was cancelled")]
    Cancelled(SystemId),
}

/// Result type for reduction operations.
pub type ReduceResult<T> = Result<T, ReduceError>;
