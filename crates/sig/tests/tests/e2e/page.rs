//! End-to-end: parallel page reduction matches sequential reduction.

use sig_graph::SIGraph;
use sig_reducer::{PageReducer, Reducer};
use sig_tests::{active_signatures, add};
use sig_types::{Shape, SystemId};

fn system(index: u32) -> SIGraph {
    let mut sig = SIGraph::with_defaults(SystemId(index));
    let shapes = [Shape::NoteheadBlack, Shape::Trill, Shape::Accent, Shape::Stem];
    for i in 0..30u32 {
        let x = ((i * 7 + index * 3) % 50) as f64 * 3.0;
        let y = ((i * 11 + index) % 20) as f64 * 3.0;
        let g = ((i * 37 + index * 13) % 100) as f64 / 100.0;
        add(&mut sig, shapes[(i % 4) as usize], x, y, 10.0, 10.0, g);
    }
    sig
}

#[test]
fn parallel_equals_sequential() {
    let mut parallel: Vec<SIGraph> = (0..12).map(system).collect();
    let mut sequential: Vec<SIGraph> = (0..12).map(system).collect();

    let results = PageReducer::default().reduce_all(&mut parallel);
    for (sig, result) in sequential.iter_mut().zip(&results) {
        let expected = Reducer::new().reduce(sig).unwrap();
        assert_eq!(result.as_ref().unwrap(), &expected);
    }
    for (a, b) in parallel.iter().zip(&sequential) {
        assert_eq!(a.system(), b.system());
        assert_eq!(active_signatures(a), active_signatures(b));
    }
}
