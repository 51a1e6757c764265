//! Uniform-grid spatial index over Inter bounds.
//!
//! Each entry is registered in every bucket its rectangle touches; a query
//! only visits the buckets covered by the query region, so the cost depends on
//! local density rather than on the total number of Inters. Rectangles
//! spanning more than [`MAX_CELL_SPAN`] cells are kept aside and checked on
//! every query instead of being bucketed.

use sig_types::{InterId, Rect};
use std::collections::{BTreeSet, HashMap};

type Cell = (i64, i64);

/// Largest number of grid cells one entry or query may enumerate.
pub const MAX_CELL_SPAN: u64 = 4096;

#[derive(Clone, Debug)]
pub struct GridIndex {
    cell_size: f64,
    buckets: HashMap<Cell, Vec<InterId>>,
    oversized: BTreeSet<InterId>,
    entries: HashMap<InterId, Rect>,
}

impl GridIndex {
    pub fn new(cell_size: f64) -> Self {
        Self {
            cell_size,
            buckets: HashMap::new(),
            oversized: BTreeSet::new(),
            entries: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: InterId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn insert(&mut self, id: InterId, rect: Rect) {
        if self.entries.contains_key(&id) {
            self.remove(id);
        }
        let span = CellSpan::new(self.cell_size, &rect);
        if span.is_oversized() {
            self.oversized.insert(id);
        } else {
            for cell in span.cells() {
                self.buckets.entry(cell).or_default().push(id);
            }
        }
        self.entries.insert(id, rect);
    }

    pub fn remove(&mut self, id: InterId) -> Option<Rect> {
        let rect = self.entries.remove(&id)?;
        if self.oversized.remove(&id) {
            return Some(rect);
        }
        for cell in CellSpan::new(self.cell_size, &rect).cells() {
            if let Some(bucket) = self.buckets.get_mut(&cell) {
                bucket.retain(|other| *other != id);
                if bucket.is_empty() {
                    self.buckets.remove(&cell);
                }
            }
        }
        Some(rect)
    }

    /// Ids whose indexed rectangle touches `region` (edges included), sorted.
    ///
    /// Callers apply their own strict overlap predicate on the candidates.
    pub fn candidates(&self, region: &Rect) -> Vec<InterId> {
        let span = CellSpan::new(self.cell_size, region);
        if span.is_oversized() {
            let mut found: Vec<InterId> = self
                .entries
                .iter()
                .filter(|(_, rect)| touches(rect, region))
                .map(|(id, _)| *id)
                .collect();
            found.sort();
            return found;
        }

        let mut found = BTreeSet::new();
        let bucketed = span
            .cells()
            .filter_map(|cell| self.buckets.get(&cell))
            .flatten();
        for id in bucketed.chain(self.oversized.iter()) {
            if let Some(rect) = self.entries.get(id) {
                if touches(rect, region) {
                    found.insert(*id);
                }
            }
        }
        found.into_iter().collect()
    }
}

/// Inclusive range of grid cells covered by a rectangle.
#[derive(Clone, Copy, Debug)]
struct CellSpan {
    x0: i64,
    x1: i64,
    y0: i64,
    y1: i64,
}

impl CellSpan {
    fn new(size: f64, rect: &Rect) -> Self {
        Self {
            x0: (rect.x / size).floor() as i64,
            x1: (rect.right() / size).floor() as i64,
            y0: (rect.y / size).floor() as i64,
            y1: (rect.bottom() / size).floor() as i64,
        }
    }

    fn count(&self) -> u128 {
        let w = (self.x1 as i128 - self.x0 as i128 + 1).max(0) as u128;
        let h = (self.y1 as i128 - self.y0 as i128 + 1).max(0) as u128;
        w * h
    }

    fn is_oversized(&self) -> bool {
        self.count() > MAX_CELL_SPAN as u128
    }

    fn cells(self) -> impl Iterator<Item = Cell> {
        let Self { x0, x1, y0, y1 } = self;
        (x0..=x1).flat_map(move |cx| (y0..=y1).map(move |cy| (cx, cy)))
    }
}

fn touches(a: &Rect, b: &Rect) -> bool {
    a.x <= b.right() && b.x <= a.right() && a.y <= b.bottom() && b.y <= a.bottom()
}
