//! Exclusion discovery.
//!
//! Two ACTIVE non-ensemble Inters are in conflict when their core bounds
//! strictly overlap, or when their shapes cannot coexist regardless of
//! geometry. Pairs already linked by any relation are left alone: support and
//! containment mark them as compatible, an existing exclusion needs no copy.

use sig_graph::{Inter, InterKind, Relation, SIGraph};
use sig_types::{AlterFamily, InterId};
use std::collections::BTreeSet;
use tracing::trace;

use crate::error::ReduceResult;

/// Shapes that exclude each other wherever they are.
///
/// Key alterations of opposite families on the same staff: a key signature
/// holds either sharps or flats.
pub fn incompatible(a: &Inter, b: &Inter) -> bool {
    match (a.kind(), b.kind()) {
        (InterKind::KeyAlter(ia), InterKind::KeyAlter(ib)) => {
            let same_staff = ia.staff.is_some() && ia.staff == ib.staff;
            let opposite = matches!(
                (a.shape().alter_family(), b.shape().alter_family()),
                (Some(AlterFamily::Sharp), Some(AlterFamily::Flat))
                    | (Some(AlterFamily::Flat), Some(AlterFamily::Sharp))
            );
            same_staff && opposite
        }
        _ => false,
    }
}

/// Candidate conflicting pairs for the given Inters, each as `(low, high)`.
pub fn find_conflicts(sig: &SIGraph, around: &[InterId]) -> BTreeSet<(InterId, InterId)> {
    let ratios = sig.config().shrink;
    let mut pairs = BTreeSet::new();
    let mut key_alters: Option<Vec<&Inter>> = None;

    for &id in around {
        let Some(inter) = sig.get(id) else { continue };
        if !eligible(inter) {
            continue;
        }

        let core = inter.core_bounds(&ratios);
        for other in sig.intersecting_core(&core) {
            if other != id {
                pairs.insert(ordered(id, other));
            }
        }

        if matches!(inter.kind(), InterKind::KeyAlter(_)) {
            let all = key_alters.get_or_insert_with(|| {
                sig.inters()
                    .filter(|i| i.is_active() && matches!(i.kind(), InterKind::KeyAlter(_)))
                    .collect()
            });
            for other in all.iter() {
                if incompatible(inter, other) {
                    pairs.insert(ordered(id, other.id()));
                }
            }
        }
    }

    pairs.retain(|&(a, b)| {
        sig.get(a).is_some_and(eligible)
            && sig.get(b).is_some_and(eligible)
            && !sig.are_related(a, b)
    });
    pairs
}

/// Ensure an exclusion exists for every conflict around the given Inters.
/// Returns the number of exclusions added.
pub fn discover(sig: &mut SIGraph, around: &[InterId]) -> ReduceResult<usize> {
    let pairs = find_conflicts(sig, around);
    for &(a, b) in &pairs {
        sig.add_relation(a, b, Relation::Exclusion)?;
        trace!(%a, %b, "Exclusion discovered");
    }
    Ok(pairs.len())
}

/// Discovery over every ACTIVE Inter of the graph.
pub fn discover_all(sig: &mut SIGraph) -> ReduceResult<usize> {
    let ids = sig.active_ids();
    discover(sig, &ids)
}

fn eligible(inter: &Inter) -> bool {
    inter.is_active() && inter.kind().ensemble().is_none()
}

fn ordered(a: InterId, b: InterId) -> (InterId, InterId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
