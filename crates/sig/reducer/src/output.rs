//! Hand-off of a reduced SIG to its consumers.

use serde::{Deserialize, Serialize};
use sig_graph::{grade, RelationRef, SIGraph};
use sig_types::{Grade, InterId, Rect, Shape, SystemId};

use crate::error::ReduceResult;

/// One surviving interpretation with its final grades.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActiveInter {
    pub id: InterId,
    pub shape: Shape,
    pub bounds: Rect,
    pub grade: Grade,
    pub contextual_grade: Grade,
    pub abnormal: bool,
}

/// Reduced content of one system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReductionOutput {
    pub system: SystemId,
    pub active: Vec<ActiveInter>,
    /// Subset of `active` needing review.
    pub abnormal: Vec<InterId>,
    pub relations: Vec<RelationRef>,
}

impl ReductionOutput {
    /// Snapshot the ACTIVE content of `sig`. Contextual grades are computed
    /// from the current supports, not read from the cache.
    pub fn from_graph(sig: &SIGraph) -> ReduceResult<Self> {
        let active = sig
            .active_inters()
            .into_iter()
            .map(|inter| {
                Ok(ActiveInter {
                    id: inter.id(),
                    shape: inter.shape(),
                    bounds: inter.bounds(),
                    grade: inter.grade(),
                    contextual_grade: grade::contextual_grade(sig, inter.id())?,
                    abnormal: inter.is_abnormal(),
                })
            })
            .collect::<ReduceResult<Vec<ActiveInter>>>()?;
        let abnormal = active.iter().filter(|i| i.abnormal).map(|i| i.id).collect();

        Ok(Self {
            system: sig.system(),
            active,
            abnormal,
            relations: sig.relations(),
        })
    }
}
