//! End-to-end: edit sessions and undo.

use sig_edit::{SigCommand, SigSession};
use sig_graph::{Relation, RelationType, SIGraph, SupportKind};
use sig_reducer::Reducer;
use sig_tests::{add, assert_cascade_integrity, assert_no_conflict, descriptor};
use sig_types::{Shape, SystemId};

#[test]
fn edit_sequence_then_undo_all() {
    let mut sig = SIGraph::with_defaults(SystemId(7));
    let head = add(&mut sig, Shape::NoteheadVoid, 0.0, 0.0, 12.0, 10.0, 0.7);
    let mut session = SigSession::new(sig);
    session.reduce().unwrap();
    let pristine = session.sig().snapshot();

    let mut undo = Vec::new();

    let outcome = session
        .apply(SigCommand::AddInter {
            descriptor: descriptor(Shape::Stem, 11.0, -40.0, 2.0, 44.0, 0.8),
        })
        .unwrap();
    let stem = outcome.created.unwrap();
    undo.push(outcome.before);

    let weights = session.sig().config().weights;
    let outcome = session
        .apply(SigCommand::Link {
            source: stem,
            target: head,
            relation: Relation::support(SupportKind::HeadStem, &weights),
        })
        .unwrap();
    undo.push(outcome.before);
    assert!(!session.sig().inter(head).unwrap().is_abnormal());

    let outcome = session
        .apply(SigCommand::AddInter {
            descriptor: descriptor(Shape::Trill, 2.0, 1.0, 12.0, 10.0, 0.8),
        })
        .unwrap();
    let trill = outcome.created.unwrap();
    undo.push(outcome.before);
    // Head with stem outweighs the trill.
    assert!(session.sig().inter(trill).unwrap().is_removed());

    let outcome = session
        .apply(SigCommand::Unlink {
            source: head,
            target: stem,
            relation: RelationType::Support,
        })
        .unwrap();
    undo.push(outcome.before);
    assert!(session.sig().inter(head).unwrap().is_abnormal());

    assert_no_conflict(session.sig());
    assert_cascade_integrity(session.sig());

    while let Some(snapshot) = undo.pop() {
        session.restore(snapshot).unwrap();
    }
    assert_eq!(session.sig().len(), pristine.len());
    assert_eq!(session.sig().active_ids(), pristine.active_ids());
    assert_eq!(session.sig().relation_count(), 0);
}

#[test]
fn snapshot_from_other_system_rejected() {
    let mut session = SigSession::new(SIGraph::with_defaults(SystemId(1)));
    assert!(session
        .restore(SIGraph::with_defaults(SystemId(2)))
        .is_err());
}

fn abnormal_ids(sig: &SIGraph) -> Vec<sig_types::InterId> {
    sig.abnormal_inters().into_iter().map(|i| i.id()).collect()
}

#[test]
fn cascading_removal_matches_full_reduction() {
    let mut sig = SIGraph::with_defaults(SystemId(4));
    let chord = add(&mut sig, Shape::Chord, 0.0, 0.0, 12.0, 40.0, 0.8);
    let head = add(&mut sig, Shape::NoteheadBlack, 0.0, 0.0, 12.0, 10.0, 0.8);
    let stem = add(&mut sig, Shape::Stem, 11.0, -30.0, 2.0, 34.0, 0.8);
    let weights = sig.config().weights;
    sig.add_relation(chord, head, Relation::Containment).unwrap();
    sig.add_relation(head, stem, Relation::support(SupportKind::HeadStem, &weights))
        .unwrap();

    let mut session = SigSession::new(sig);
    session.reduce().unwrap();
    assert!(!session.sig().inter(stem).unwrap().is_abnormal());

    let outcome = session.apply(SigCommand::RemoveInter { id: chord }).unwrap();
    assert!(session.sig().inter(head).unwrap().is_removed());
    assert_eq!(outcome.affected, vec![stem]);
    assert!(session.sig().inter(stem).unwrap().is_abnormal());

    let mut full = session.sig().snapshot();
    Reducer::new().reduce(&mut full).unwrap();
    assert_eq!(abnormal_ids(session.sig()), abnormal_ids(&full));
    assert_eq!(session.sig().active_ids(), full.active_ids());
}
