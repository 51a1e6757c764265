use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::error::{TypesError, TypesResult};

/// Confidence of an interpretation, always within `[0, 1]`.
///
/// Deserialization goes through [`Grade::new`], so an out-of-range value in an
/// input document is rejected instead of silently clamped.
#[derive(Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Grade(f64);

impl Grade {
    pub const ZERO: Grade = Grade(0.0);
    pub const ONE: Grade = Grade(1.0);

    /// Validate a raw value.
    pub fn new(value: f64) -> TypesResult<Self> {
        if value.is_nan() || !(0.0..=1.0).contains(&value) {
            return Err(TypesError::InvalidGrade(value));
        }
        Ok(Self(positive_zero(value)))
    }

    /// Clamp a computed value into range. NaN maps to zero.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(positive_zero(value.clamp(0.0, 1.0)))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Total order, usable for deterministic sorting.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// `-0.0` compares below `0.0` under `total_cmp`; fold it onto `0.0`.
fn positive_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

impl TryFrom<f64> for Grade {
    type Error = TypesError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Grade::new(value)
    }
}

impl From<Grade> for f64 {
    fn from(grade: Grade) -> Self {
        grade.0
    }
}

impl fmt::Debug for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grade({:.4})", self.0)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}
