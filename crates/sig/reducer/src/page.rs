//! Parallel reduction of the systems of a page.

use rayon::prelude::*;
use sig_graph::SIGraph;
use tracing::info;

use crate::error::ReduceResult;
use crate::reducer::{Reducer, ReductionReport};

/// Reduces independent systems on the rayon pool, one system per task.
#[derive(Clone, Debug, Default)]
pub struct PageReducer {
    reducer: Reducer,
}

impl PageReducer {
    pub fn new(reducer: Reducer) -> Self {
        Self { reducer }
    }

    /// One result per system, in input order. A failed system is restored and
    /// does not affect the others.
    pub fn reduce_all(&self, systems: &mut [SIGraph]) -> Vec<ReduceResult<ReductionReport>> {
        let results: Vec<_> = systems
            .par_iter_mut()
            .map(|sig| self.reducer.reduce(sig))
            .collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        info!(systems = results.len(), failed, "Page reduction complete");
        results
    }
}
