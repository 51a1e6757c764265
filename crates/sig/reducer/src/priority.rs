//! Strength order used to resolve exclusions.
//!
//! Two Inters are compared by, in order:
//!
//! 1. contextual grade, higher wins
//! 2. shape priority: Primary > Ornamental > Stylistic, then declaration
//!    order of [`Shape`] within a category
//! 3. bounds, lexicographically smaller `(x, y, width, height)` wins
//! 4. identity, lower wins
//!
//! The order is total, so every exclusion has exactly one survivor.

use sig_graph::Inter;
use sig_types::{Grade, InterId, Rect, Shape};
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rank {
    pub id: InterId,
    pub grade: Grade,
    pub shape: Shape,
    pub bounds: Rect,
}

impl Rank {
    pub fn new(inter: &Inter, grade: Grade) -> Self {
        Self {
            id: inter.id(),
            grade,
            shape: inter.shape(),
            bounds: inter.bounds(),
        }
    }

    /// `Greater` when `self` survives a conflict with `other`.
    pub fn strength_cmp(&self, other: &Rank) -> Ordering {
        self.grade
            .total_cmp(&other.grade)
            .then_with(|| other.shape.priority_cmp(&self.shape))
            .then_with(|| other.bounds.total_cmp(&self.bounds))
            .then_with(|| other.id.cmp(&self.id))
    }

    pub fn beats(&self, other: &Rank) -> bool {
        self.strength_cmp(other) == Ordering::Greater
    }

    /// Whether the grades alone do not decide between the two.
    pub fn ties_with(&self, other: &Rank) -> bool {
        self.grade.total_cmp(&other.grade) == Ordering::Equal
    }
}
