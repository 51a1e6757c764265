//! End-to-end scenarios on small hand-built systems.

use sig_graph::{InterAttributes, InterDescriptor, Relation, SIGraph, SupportKind};
use sig_reducer::{Reducer, ReductionOutput};
use sig_tests::{add, grade};
use sig_types::{Rect, Shape, ShrinkRatios, StaffId, SystemId};

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn unsupported_head_loses_to_ornament() {
    let mut sig = SIGraph::with_defaults(SystemId(0));
    let head = add(&mut sig, Shape::NoteheadBlack, 0.0, 0.0, 12.0, 10.0, 0.9);
    let trill = add(&mut sig, Shape::Trill, 2.0, 1.0, 12.0, 10.0, 0.95);

    let report = Reducer::new().reduce(&mut sig).unwrap();
    assert_eq!(report.removed, vec![head]);
    assert!(sig.inter(trill).unwrap().is_active());
}

#[test]
fn stem_support_saves_head() {
    let mut sig = SIGraph::with_defaults(SystemId(0));
    let head = add(&mut sig, Shape::NoteheadBlack, 0.0, 0.0, 12.0, 10.0, 0.9);
    let trill = add(&mut sig, Shape::Trill, 2.0, 1.0, 12.0, 10.0, 0.95);
    // Stem rises from the head's right side, clear of the trill's core.
    let stem = add(&mut sig, Shape::Stem, 11.0, -40.0, 2.0, 44.0, 0.8);
    let rel = Relation::support(SupportKind::HeadStem, &sig.config().weights);
    sig.add_relation(head, stem, rel).unwrap();

    let report = Reducer::new().reduce(&mut sig).unwrap();
    assert_eq!(report.removed, vec![trill]);

    let head = sig.inter(head).unwrap();
    assert!(head.is_active() && !head.is_abnormal());
    assert!(head.contextual_grade().unwrap().value() > 0.95);
}

#[test]
fn isolated_alteration_kept_but_abnormal() {
    let mut sig = SIGraph::with_defaults(SystemId(0));
    let sharp = add(&mut sig, Shape::Sharp, 40.0, 40.0, 8.0, 24.0, 0.7);

    let report = Reducer::new().reduce(&mut sig).unwrap();
    assert!(report.removed.is_empty());
    assert_eq!(report.abnormal, vec![sharp]);

    let output = ReductionOutput::from_graph(&sig).unwrap();
    assert_eq!(output.active.len(), 1);
    assert_eq!(output.abnormal, vec![sharp]);
}

#[test]
fn core_bounds_shrink_about_center() {
    let mut sig = SIGraph::with_defaults(SystemId(0));
    let id = add(&mut sig, Shape::NoteheadVoid, 0.0, 0.0, 10.0, 20.0, 0.5);
    let core = sig.inter(id).unwrap().core_bounds(&ShrinkRatios::default());
    assert_eq!(core, Rect::new(2.5, 5.0, 5.0, 10.0));
}

#[test]
fn touching_bounds_do_not_conflict() {
    // Bounds overlap by 4px; with 0.5 shrink the cores are 1px apart.
    let mut sig = SIGraph::with_defaults(SystemId(0));
    add(&mut sig, Shape::NoteheadBlack, 0.0, 0.0, 10.0, 10.0, 0.6);
    add(&mut sig, Shape::Accent, 6.0, 0.0, 10.0, 10.0, 0.9);

    let report = Reducer::new().reduce(&mut sig).unwrap();
    assert_eq!(report.exclusions_added, 0);
    assert_eq!(sig.active_count(), 2);
}

#[test]
fn key_signature_keeps_one_family() {
    let mut sig = SIGraph::with_defaults(SystemId(0));
    let in_key = InterAttributes {
        staff: Some(StaffId(0)),
        in_key: true,
        ..Default::default()
    };
    let key = add(&mut sig, Shape::KeySignature, 0.0, 0.0, 60.0, 40.0, 0.9);
    let mut sharps = Vec::new();
    for (i, g) in [0.9, 0.85].into_iter().enumerate() {
        let id = sig
            .add_inter(
                InterDescriptor::new(
                    Shape::Sharp,
                    Rect::new(i as f64 * 14.0, 0.0, 10.0, 30.0),
                    grade(g),
                )
                .with_attributes(in_key.clone()),
            )
            .unwrap();
        sig.add_relation(key, id, Relation::Containment).unwrap();
        sharps.push(id);
    }
    let flat = sig
        .add_inter(
            InterDescriptor::new(Shape::Flat, Rect::new(200.0, 0.0, 10.0, 30.0), grade(0.6))
                .with_attributes(in_key),
        )
        .unwrap();

    let report = Reducer::new().reduce(&mut sig).unwrap();
    assert_eq!(report.exclusions_added, 2);
    assert_eq!(report.removed, vec![flat]);
    assert!(sharps.iter().all(|id| sig.inter(*id).unwrap().is_active()));
    assert!(report.abnormal.is_empty());
}

#[test]
fn removed_chord_takes_its_heads() {
    let mut sig = SIGraph::with_defaults(SystemId(0));
    let chord = add(&mut sig, Shape::Chord, 0.0, 0.0, 12.0, 30.0, 0.8);
    let low = add(&mut sig, Shape::WholeNote, 0.0, 20.0, 12.0, 10.0, 0.8);
    let high = add(&mut sig, Shape::WholeNote, 0.0, 0.0, 12.0, 10.0, 0.8);
    sig.add_relation(chord, low, Relation::Containment).unwrap();
    sig.add_relation(chord, high, Relation::Containment).unwrap();

    let removed = sig.remove_inter(chord).unwrap();
    assert_eq!(removed, vec![chord, low, high]);

    let report = Reducer::new().reduce(&mut sig).unwrap();
    assert_eq!(report.rounds, 0);
    assert_eq!(sig.active_count(), 0);
}
