//! Fixpoint reduction of a SIG.
//!
//! A pass first discovers exclusions, then runs rounds until no ACTIVE Inter
//! is excluded by another ACTIVE Inter. Each round recomputes the contextual
//! grade of every disputed Inter, picks the strongest one (see
//! [`crate::priority`]) and removes all its exclusion partners. Removal
//! severs relations, so the next round sees the updated support picture.
//! Each round removes at least one Inter, which bounds the number of rounds
//! by the number of Inters.
//!
//! After the loop every remaining ACTIVE Inter gets its final contextual grade
//! and its abnormal flag re-evaluated.

use serde::{Deserialize, Serialize};
use sig_graph::SIGraph;
use sig_types::{InterId, SystemId};
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::cancel::CancelToken;
use crate::error::{ReduceError, ReduceResult};
use crate::exclusion;
use crate::priority::Rank;

/// What a reduction pass did.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReductionReport {
    pub system: SystemId,
    /// Fixpoint rounds executed.
    pub rounds: usize,
    /// Exclusions created by discovery.
    pub exclusions_added: usize,
    /// Inters transitioned to REMOVED, in id order.
    pub removed: Vec<InterId>,
    /// Conflicts decided by shape, geometry or identity rather than grade.
    pub ties_broken: usize,
    /// ACTIVE Inters flagged abnormal at the end of the pass, in id order.
    pub abnormal: Vec<InterId>,
}

impl ReductionReport {
    fn new(system: SystemId) -> Self {
        Self {
            system,
            rounds: 0,
            exclusions_added: 0,
            removed: Vec::new(),
            ties_broken: 0,
            abnormal: Vec::new(),
        }
    }
}

/// Drives reduction passes over SIGs.
///
/// The reducer holds no per-graph state; one instance can reduce many
/// systems, including concurrently through [`crate::PageReducer`].
#[derive(Clone, Debug, Default)]
pub struct Reducer {
    cancel: Option<CancelToken>,
}

impl Reducer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reducer that aborts when `token` is cancelled.
    pub fn with_cancel(token: CancelToken) -> Self {
        Self {
            cancel: Some(token),
        }
    }

    /// Reduce the whole graph.
    ///
    /// On error the graph is restored to its state before the call.
    pub fn reduce(&self, sig: &mut SIGraph) -> ReduceResult<ReductionReport> {
        let snapshot = sig.snapshot();
        let started = Instant::now();

        let result = self.run(sig, None);
        match result {
            Ok(report) => {
                info!(
                    system = %report.system,
                    rounds = report.rounds,
                    exclusions = report.exclusions_added,
                    removed = report.removed.len(),
                    abnormal = report.abnormal.len(),
                    elapsed_us = started.elapsed().as_micros() as u64,
                    "Reduction complete"
                );
                Ok(report)
            }
            Err(e) => {
                warn!(system = %sig.system(), error = %e, "Reduction aborted, graph restored");
                sig.restore(snapshot)?;
                Err(e)
            }
        }
    }

    /// Re-reduce only the neighborhood of the given Inters.
    ///
    /// Exclusions are discovered around the seeds, then the fixpoint runs on
    /// the connected component of the seeds over all relation types, with the
    /// same ordering rules as a full pass.
    pub fn reduce_partial(
        &self,
        sig: &mut SIGraph,
        seeds: &[InterId],
    ) -> ReduceResult<ReductionReport> {
        for &id in seeds {
            sig.inter(id)?;
        }
        let snapshot = sig.snapshot();

        let result = self.run(sig, Some(seeds));
        match result {
            Ok(report) => {
                debug!(
                    system = %report.system,
                    seeds = seeds.len(),
                    rounds = report.rounds,
                    removed = report.removed.len(),
                    "Partial reduction complete"
                );
                Ok(report)
            }
            Err(e) => {
                warn!(system = %sig.system(), error = %e, "Partial reduction aborted, graph restored");
                sig.restore(snapshot)?;
                Err(e)
            }
        }
    }

    fn run(&self, sig: &mut SIGraph, seeds: Option<&[InterId]>) -> ReduceResult<ReductionReport> {
        let system = sig.system();
        let mut report = ReductionReport::new(system);

        report.exclusions_added = match seeds {
            Some(seeds) => exclusion::discover(sig, seeds)?,
            None => exclusion::discover_all(sig)?,
        };

        let scope: Vec<InterId> = match seeds {
            Some(seeds) => component(sig, seeds),
            None => sig.active_ids(),
        };

        let max_rounds = sig.config().max_reduction_rounds;
        loop {
            if self.cancel.as_ref().is_some_and(|t| t.is_cancelled()) {
                return Err(ReduceError::Cancelled(system));
            }

            let disputed: Vec<InterId> = scope
                .iter()
                .copied()
                .filter(|id| !sig.exclusion_partners(*id).is_empty())
                .collect();
            if disputed.is_empty() {
                break;
            }
            if report.rounds >= max_rounds {
                return Err(ReduceError::NonConvergence {
                    system,
                    rounds: report.rounds,
                });
            }
            report.rounds += 1;

            let mut ranks = HashMap::with_capacity(disputed.len());
            for &id in &disputed {
                let grade = sig.refresh_contextual_grade(id)?;
                ranks.insert(id, Rank::new(sig.inter(id)?, grade));
            }

            let Some(winner) = ranks
                .values()
                .copied()
                .max_by(|a, b| a.strength_cmp(b))
            else {
                break;
            };

            for loser in sig.exclusion_partners(winner.id) {
                if let Some(rank) = ranks.get(&loser) {
                    if winner.ties_with(rank) {
                        report.ties_broken += 1;
                        debug!(
                            winner = %winner.id,
                            loser = %loser,
                            grade = %winner.grade,
                            "Exclusion tie broken"
                        );
                    }
                }
                let removed = sig.remove_inter(loser)?;
                debug!(
                    %loser,
                    by = %winner.id,
                    cascade = removed.len() - 1,
                    "Inter removed by exclusion"
                );
                report.removed.extend(removed);
            }
        }

        for &id in &scope {
            if sig.inter(id)?.is_active() {
                sig.refresh_contextual_grade(id)?;
                if sig.evaluate_abnormal(id)? {
                    report.abnormal.push(id);
                }
            }
        }

        report.removed.sort();
        report.abnormal.sort();
        Ok(report)
    }
}

/// ACTIVE Inters reachable from the seeds through relations of any type.
fn component(sig: &SIGraph, seeds: &[InterId]) -> Vec<InterId> {
    let mut seen: BTreeSet<InterId> = BTreeSet::new();
    let mut queue: VecDeque<InterId> = VecDeque::new();
    for &seed in seeds {
        if sig.get(seed).is_some_and(|i| i.is_active()) && seen.insert(seed) {
            queue.push_back(seed);
        }
    }
    while let Some(id) = queue.pop_front() {
        for rel in sig.relations_of(id) {
            let other = rel.other(id);
            if seen.insert(other) {
                queue.push_back(other);
            }
        }
    }
    seen.into_iter().collect()
}
