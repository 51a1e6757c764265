//! Property tests: reduction always reaches a conflict-free, stable and
//! order-independent fixpoint.

use proptest::prelude::*;
use sig_graph::{InterDescriptor, Relation, SIGraph, SupportKind};
use sig_reducer::Reducer;
use sig_tests::{
    active_signatures, assert_cascade_integrity, assert_no_conflict, signature, Signature,
};
use sig_types::{Grade, Rect, Shape, SystemId};
use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

const SHAPES: [Shape; 10] = [
    Shape::NoteheadBlack,
    Shape::NoteheadVoid,
    Shape::Stem,
    Shape::Sharp,
    Shape::Flat,
    Shape::AugmentationDot,
    Shape::Trill,
    Shape::Mordent,
    Shape::Accent,
    Shape::Staccato,
];

fn arb_descriptor() -> impl Strategy<Value = InterDescriptor> {
    (
        prop::sample::select(SHAPES.to_vec()),
        0u16..150,
        0u16..150,
        4u16..30,
        4u16..30,
        0u16..=1000,
    )
        .prop_map(|(shape, x, y, w, h, g)| {
            InterDescriptor::new(
                shape,
                Rect::new(x as f64, y as f64, w as f64, h as f64),
                Grade::clamped(g as f64 / 1000.0),
            )
        })
}

/// Distinct descriptors plus candidate support links by position.
fn arb_page() -> impl Strategy<Value = (Vec<InterDescriptor>, Vec<(usize, usize)>)> {
    (
        prop::collection::vec(arb_descriptor(), 0..40),
        prop::collection::vec((0usize..40, 0usize..40), 0..20),
    )
        .prop_map(|(descriptors, links)| {
            let mut seen = BTreeSet::new();
            let descriptors: Vec<InterDescriptor> = descriptors
                .into_iter()
                .filter(|d| seen.insert(key(d)))
                .collect();
            (descriptors, links)
        })
}

fn key(d: &InterDescriptor) -> Signature {
    signature(d.shape, d.bounds, d.grade)
}

/// Build a graph, adding descriptors in the given order. Links refer to
/// positions in `descriptors`, whatever the insertion order.
fn build(descriptors: &[InterDescriptor], links: &[(usize, usize)], order: &[usize]) -> SIGraph {
    let mut sig = SIGraph::with_defaults(SystemId(0));
    let mut ids = vec![None; descriptors.len()];
    for &i in order {
        ids[i] = Some(sig.add_inter(descriptors[i].clone()).unwrap());
    }

    let weights = sig.config().weights;
    for &(a, b) in links {
        let (Some(Some(a)), Some(Some(b))) = (ids.get(a), ids.get(b)) else {
            continue;
        };
        let (a, b) = (*a, *b);
        if sig
            .add_relation(a, b, Relation::support(SupportKind::HeadStem, &weights))
            .is_err()
        {
            let _ = sig.add_relation(a, b, Relation::support(SupportKind::Generic, &weights));
        }
    }
    sig
}

fn identity(n: usize) -> Vec<usize> {
    (0..n).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn no_surviving_conflict((descriptors, links) in arb_page()) {
        let mut sig = build(&descriptors, &links, &identity(descriptors.len()));
        Reducer::new().reduce(&mut sig).unwrap();
        assert_no_conflict(&sig);
    }

    #[test]
    fn removal_cascades((descriptors, links) in arb_page()) {
        let mut sig = build(&descriptors, &links, &identity(descriptors.len()));
        let report = Reducer::new().reduce(&mut sig).unwrap();
        assert_cascade_integrity(&sig);
        prop_assert_eq!(sig.active_count() + report.removed.len(), sig.len());
    }

    #[test]
    fn reduction_is_idempotent((descriptors, links) in arb_page()) {
        let mut sig = build(&descriptors, &links, &identity(descriptors.len()));
        Reducer::new().reduce(&mut sig).unwrap();
        let survivors = sig.active_ids();

        let again = Reducer::new().reduce(&mut sig).unwrap();
        prop_assert!(again.removed.is_empty());
        prop_assert_eq!(again.exclusions_added, 0);
        prop_assert_eq!(again.rounds, 0);
        prop_assert_eq!(sig.active_ids(), survivors);
    }

    #[test]
    fn survivors_independent_of_insertion_order(
        (descriptors, links, order) in arb_page().prop_flat_map(|(d, l)| {
            let n = d.len();
            (Just(d), Just(l), Just(identity(n)).prop_shuffle())
        })
    ) {
        let mut forward = build(&descriptors, &links, &identity(descriptors.len()));
        let mut shuffled = build(&descriptors, &links, &order);
        Reducer::new().reduce(&mut forward).unwrap();
        Reducer::new().reduce(&mut shuffled).unwrap();
        prop_assert_eq!(active_signatures(&forward), active_signatures(&shuffled));
    }

    #[test]
    fn abnormal_inters_stay_active((descriptors, links) in arb_page()) {
        let mut sig = build(&descriptors, &links, &identity(descriptors.len()));
        let report = Reducer::new().reduce(&mut sig).unwrap();
        for id in report.abnormal {
            let inter = sig.inter(id).unwrap();
            prop_assert!(inter.is_active() && inter.is_abnormal());
        }
    }
}
