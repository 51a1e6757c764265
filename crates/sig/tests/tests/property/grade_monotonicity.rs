//! Property tests: support never lowers a contextual grade.

use proptest::prelude::*;
use sig_graph::{Relation, SIGraph, Support, SupportKind};
use sig_tests::add;
use sig_types::{Shape, SystemId};

proptest! {
    #[test]
    fn adding_support_never_decreases(
        head_grade in 0.0f64..=1.0,
        supports in prop::collection::vec((0.0f64..=1.0, 0.0f64..5.0), 1..8),
    ) {
        let mut sig = SIGraph::with_defaults(SystemId(0));
        let head = add(&mut sig, Shape::WholeNote, 0.0, 0.0, 10.0, 8.0, head_grade);
        let mut last = sig.contextual_grade(head).unwrap();
        prop_assert_eq!(last, sig.inter(head).unwrap().grade());

        for (i, (partner_grade, weight)) in supports.iter().enumerate() {
            let x = 100.0 + i as f64 * 20.0;
            let mark = add(&mut sig, Shape::Fermata, x, 0.0, 8.0, 8.0, *partner_grade);
            let support = Relation::Support(Support::with_weight(SupportKind::Generic, *weight));
            sig.add_relation(mark, head, support).unwrap();

            let next = sig.contextual_grade(head).unwrap();
            prop_assert!(next >= last, "{:?} < {:?}", next, last);
            prop_assert!(next.value() <= 1.0);
            last = next;
        }
    }

    #[test]
    fn removing_supporter_never_increases(
        head_grade in 0.0f64..=1.0,
        stem_grade in 0.0f64..=1.0,
    ) {
        let mut sig = SIGraph::with_defaults(SystemId(0));
        let head = add(&mut sig, Shape::NoteheadBlack, 0.0, 0.0, 10.0, 8.0, head_grade);
        let stem = add(&mut sig, Shape::Stem, 9.0, -30.0, 2.0, 34.0, stem_grade);
        let rel = Relation::support(SupportKind::HeadStem, &sig.config().weights);
        sig.add_relation(head, stem, rel).unwrap();

        let supported = sig.contextual_grade(head).unwrap();
        sig.remove_inter(stem).unwrap();
        let alone = sig.contextual_grade(head).unwrap();
        prop_assert!(alone <= supported);
    }
}
