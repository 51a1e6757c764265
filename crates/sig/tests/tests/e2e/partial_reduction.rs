//! End-to-end: partial reduction reaches the same fixpoint as a full pass.

use sig_graph::SIGraph;
use sig_reducer::Reducer;
use sig_tests::{add, assert_no_conflict, descriptor};
use sig_types::{Shape, SystemId};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn reduced_row() -> SIGraph {
    let mut sig = SIGraph::with_defaults(SystemId(0));
    for i in 0..10 {
        let x = i as f64 * 40.0;
        add(&mut sig, Shape::NoteheadBlack, x, 0.0, 12.0, 10.0, 0.6 + i as f64 * 0.02);
        add(&mut sig, Shape::Trill, x + 2.0, 1.0, 12.0, 10.0, 0.7);
    }
    Reducer::new().reduce(&mut sig).unwrap();
    sig
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn partial_matches_full_after_insert() {
    let base = reduced_row();
    let new = descriptor(Shape::Mordent, 82.0, 0.0, 12.0, 10.0, 0.99);

    let mut partial = base.clone();
    let id = partial.add_inter(new.clone()).unwrap();
    Reducer::new().reduce_partial(&mut partial, &[id]).unwrap();

    let mut full = base;
    full.add_inter(new).unwrap();
    Reducer::new().reduce(&mut full).unwrap();

    assert_eq!(partial.active_ids(), full.active_ids());
    assert_no_conflict(&partial);
}

#[test]
fn partial_leaves_other_regions_untouched() {
    let mut sig = reduced_row();
    // An unresolved pair far from the seed.
    let far_a = add(&mut sig, Shape::Accent, 2000.0, 0.0, 10.0, 10.0, 0.5);
    let far_b = add(&mut sig, Shape::Staccato, 2001.0, 0.0, 10.0, 10.0, 0.6);
    let seed = add(&mut sig, Shape::Stem, 1000.0, 0.0, 2.0, 30.0, 0.8);

    let report = Reducer::new().reduce_partial(&mut sig, &[seed]).unwrap();
    assert!(report.removed.is_empty());
    assert_eq!(report.abnormal, vec![seed]);
    assert!(sig.inter(far_a).unwrap().is_active());
    assert!(sig.inter(far_b).unwrap().is_active());

    Reducer::new().reduce(&mut sig).unwrap();
    assert!(sig.inter(far_a).unwrap().is_removed());
}
