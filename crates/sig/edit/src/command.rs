//! Edit commands accepted by a [`crate::SigSession`].

use serde::{Deserialize, Serialize};
use sig_graph::{InterDescriptor, Relation, RelationType};
use sig_types::{Grade, InterId, Rect};

/// A single user edit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SigCommand {
    AddInter {
        descriptor: InterDescriptor,
    },
    RemoveInter {
        id: InterId,
    },
    ReinstateInter {
        id: InterId,
    },
    /// Translate an Inter. Key alterations only move horizontally.
    MoveInter {
        id: InterId,
        dx: f64,
        dy: f64,
    },
    SetBounds {
        id: InterId,
        bounds: Rect,
    },
    SetGrade {
        id: InterId,
        grade: Grade,
    },
    Link {
        source: InterId,
        target: InterId,
        relation: Relation,
    },
    Unlink {
        source: InterId,
        target: InterId,
        relation: RelationType,
    },
}

impl SigCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddInter { .. } => "add_inter",
            Self::RemoveInter { .. } => "remove_inter",
            Self::ReinstateInter { .. } => "reinstate_inter",
            Self::MoveInter { .. } => "move_inter",
            Self::SetBounds { .. } => "set_bounds",
            Self::SetGrade { .. } => "set_grade",
            Self::Link { .. } => "link",
            Self::Unlink { .. } => "unlink",
        }
    }
}
