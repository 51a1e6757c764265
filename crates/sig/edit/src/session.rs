//! Editing session over one system.

use sig_graph::SIGraph;
use sig_reducer::{Reducer, ReductionReport};
use sig_types::InterId;
use tracing::{debug, info};

use crate::command::SigCommand;
use crate::error::EditResult;

/// Result of an applied edit.
///
/// `before` and `after` are full snapshots; handing `before` back to
/// [`SigSession::restore`] undoes the edit.
#[derive(Clone, Debug)]
pub struct EditOutcome {
    pub before: SIGraph,
    pub after: SIGraph,
    /// Inter created by an `AddInter` command.
    pub created: Option<InterId>,
    /// Seeds of the partial reduction that followed the edit.
    pub affected: Vec<InterId>,
    /// `None` when the command changed nothing.
    pub report: Option<ReductionReport>,
}

impl EditOutcome {
    pub fn is_noop(&self) -> bool {
        self.report.is_none()
    }
}

/// Owns a SIG and applies edits to it, re-reducing the touched neighborhood
/// after each one.
#[derive(Debug)]
pub struct SigSession {
    sig: SIGraph,
    reducer: Reducer,
}

impl SigSession {
    pub fn new(sig: SIGraph) -> Self {
        Self {
            sig,
            reducer: Reducer::new(),
        }
    }

    pub fn with_reducer(sig: SIGraph, reducer: Reducer) -> Self {
        Self { sig, reducer }
    }

    pub fn sig(&self) -> &SIGraph {
        &self.sig
    }

    pub fn into_inner(self) -> SIGraph {
        self.sig
    }

    /// Full reduction of the session graph.
    pub fn reduce(&mut self) -> EditResult<ReductionReport> {
        Ok(self.reducer.reduce(&mut self.sig)?)
    }

    /// Apply one command and re-reduce around it.
    ///
    /// On error the graph is left as it was before the call.
    pub fn apply(&mut self, command: SigCommand) -> EditResult<EditOutcome> {
        let before = self.sig.snapshot();
        let name = command.name();

        let (created, affected) = match self.execute(command) {
            Ok(Some(change)) => change,
            Ok(None) => {
                debug!(command = name, "Edit had no effect");
                return Ok(EditOutcome {
                    after: before.clone(),
                    before,
                    created: None,
                    affected: Vec::new(),
                    report: None,
                });
            }
            Err(e) => {
                self.sig.restore(before)?;
                return Err(e);
            }
        };

        let report = match self.reducer.reduce_partial(&mut self.sig, &affected) {
            Ok(report) => report,
            Err(e) => {
                self.sig.restore(before)?;
                return Err(e.into());
            }
        };

        info!(
            command = name,
            affected = affected.len(),
            removed = report.removed.len(),
            "Edit applied"
        );
        Ok(EditOutcome {
            before,
            after: self.sig.snapshot(),
            created,
            affected,
            report: Some(report),
        })
    }

    /// Replace the session graph with a snapshot taken earlier.
    pub fn restore(&mut self, snapshot: SIGraph) -> EditResult<()> {
        self.sig.restore(snapshot)?;
        debug!(system = %self.sig.system(), "Session restored");
        Ok(())
    }

    /// Perform the mutation. Returns the created Inter and the reduction
    /// seeds, or `None` when nothing changed.
    fn execute(
        &mut self,
        command: SigCommand,
    ) -> EditResult<Option<(Option<InterId>, Vec<InterId>)>> {
        let sig = &mut self.sig;
        let change = match command {
            SigCommand::AddInter { descriptor } => {
                let id = sig.add_inter(descriptor)?;
                (Some(id), vec![id])
            }
            SigCommand::RemoveInter { id } => {
                let mut neighbors = Vec::new();
                for doomed in sig.removal_set(id)? {
                    neighbors.extend(sig.relations_of(doomed).iter().map(|r| r.other(doomed)));
                }
                let removed = sig.remove_inter(id)?;
                let seeds = neighbors
                    .into_iter()
                    .filter(|n| !removed.contains(n))
                    .collect();
                (None, dedup(seeds))
            }
            SigCommand::ReinstateInter { id } => {
                sig.reinstate_inter(id)?;
                (None, vec![id])
            }
            SigCommand::MoveInter { id, dx, dy } => {
                let inter = sig.inter(id)?;
                let dy = if inter.kind().horizontal_only() { 0.0 } else { dy };
                if dx == 0.0 && dy == 0.0 {
                    return Ok(None);
                }
                let bounds = inter.bounds().translated(dx, dy);
                sig.set_bounds(id, bounds)?;
                (None, vec![id])
            }
            SigCommand::SetBounds { id, bounds } => {
                sig.set_bounds(id, bounds)?;
                (None, vec![id])
            }
            SigCommand::SetGrade { id, grade } => {
                sig.set_grade(id, grade)?;
                (None, vec![id])
            }
            SigCommand::Link {
                source,
                target,
                relation,
            } => {
                sig.add_relation(source, target, relation)?;
                (None, dedup(vec![source, target]))
            }
            SigCommand::Unlink {
                source,
                target,
                relation,
            } => {
                sig.remove_relation(source, target, relation)?;
                (None, dedup(vec![source, target]))
            }
        };
        Ok(Some(change))
    }
}

fn dedup(mut ids: Vec<InterId>) -> Vec<InterId> {
    ids.sort();
    ids.dedup();
    ids
}
