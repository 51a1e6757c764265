//! Structural completeness rules.
//!
//! An ACTIVE Inter is abnormal when it lacks a partner its shape requires.
//! Abnormal Inters are kept; the flag is a diagnostic for later stages.

use sig_types::InterId;

use crate::error::GraphResult;
use crate::graph::SIGraph;
use crate::inter::InterKind;
use crate::relation::{RelationType, SupportKind};

/// Whether the Inter currently violates the completeness rule of its kind.
///
/// REMOVED Inters are never abnormal.
pub fn check_abnormal(sig: &SIGraph, id: InterId) -> GraphResult<bool> {
    let inter = sig.inter(id)?;
    if inter.is_removed() {
        return Ok(false);
    }

    let has_support = |kind: SupportKind| {
        sig.relations_of_type(id, RelationType::Support)
            .iter()
            .any(|r| r.relation.as_support().is_some_and(|s| s.kind == kind))
    };

    let abnormal = match inter.kind() {
        InterKind::Head { .. } => {
            inter.shape().requires_stem() && !has_support(SupportKind::HeadStem)
        }
        InterKind::Stem => !has_support(SupportKind::HeadStem),
        InterKind::Alter(info) => info.staff.is_none() || !has_support(SupportKind::AlterHead),
        InterKind::KeyAlter(info) => info.staff.is_none() || sig.ensemble_of(id).is_none(),
        InterKind::Dot => !has_support(SupportKind::DotHead),
        InterKind::Ornament | InterKind::Mark => false,
        InterKind::Ensemble(kind) => sig.members_of(id).len() < kind.min_members(),
    };
    Ok(abnormal)
}
