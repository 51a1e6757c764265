//! Shared fixtures and structural checks for the SIG test suites.

use sig_graph::{InterDescriptor, RelationType, SIGraph};
use sig_types::{Grade, InterId, Rect, Shape};

pub fn grade(value: f64) -> Grade {
    Grade::clamped(value)
}

pub fn descriptor(shape: Shape, x: f64, y: f64, width: f64, height: f64, g: f64) -> InterDescriptor {
    InterDescriptor::new(shape, Rect::new(x, y, width, height), grade(g))
}

pub fn add(sig: &mut SIGraph, shape: Shape, x: f64, y: f64, width: f64, height: f64, g: f64) -> InterId {
    sig.add_inter(descriptor(shape, x, y, width, height, g))
        .unwrap_or_else(|e| panic!("fixture inter rejected: {e}"))
}

/// Order-independent description of a descriptor, for comparing graphs built
/// in different insertion orders.
pub type Signature = (Shape, [u64; 4], u64);

pub fn signature(shape: Shape, bounds: Rect, g: Grade) -> Signature {
    (
        shape,
        [
            bounds.x.to_bits(),
            bounds.y.to_bits(),
            bounds.width.to_bits(),
            bounds.height.to_bits(),
        ],
        g.value().to_bits(),
    )
}

/// Signatures of the ACTIVE Inters, sorted.
pub fn active_signatures(sig: &SIGraph) -> Vec<Signature> {
    let mut out: Vec<Signature> = sig
        .active_inters()
        .into_iter()
        .map(|i| signature(i.shape(), i.bounds(), i.grade()))
        .collect();
    out.sort();
    out
}

/// No two ACTIVE Inters are still in conflict: no exclusion survives, and
/// every pair of overlapping cores is linked by another relation.
pub fn assert_no_conflict(sig: &SIGraph) {
    let exclusions = sig.relations_by_type(RelationType::Exclusion);
    assert!(exclusions.is_empty(), "exclusions survived: {exclusions:?}");

    let ratios = sig.config().shrink;
    for inter in sig.active_inters() {
        if inter.kind().ensemble().is_some() {
            continue;
        }
        for other in sig.intersecting_core(&inter.core_bounds(&ratios)) {
            let Some(other_inter) = sig.get(other) else { continue };
            if other == inter.id() || other_inter.kind().ensemble().is_some() {
                continue;
            }
            assert!(
                sig.are_related(inter.id(), other),
                "{} and {} overlap without relation",
                inter.id(),
                other
            );
        }
    }
}

/// REMOVED Inters have no relation and no spatial presence; every relation
/// joins two ACTIVE Inters.
pub fn assert_cascade_integrity(sig: &SIGraph) {
    for inter in sig.inters().filter(|i| i.is_removed()) {
        assert!(
            sig.relations_of(inter.id()).is_empty(),
            "removed {} keeps relations",
            inter.id()
        );
        assert!(!sig.intersecting(&inter.bounds()).contains(&inter.id()));
        assert!(!inter.is_abnormal());
    }
    for rel in sig.relations() {
        for end in [rel.source, rel.target] {
            let active = sig.get(end).is_some_and(|i| i.is_active());
            assert!(active, "relation touches inactive {end}");
        }
    }
}
