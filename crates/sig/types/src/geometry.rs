//! Bounding geometry.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::config::ShrinkRatios;
use crate::error::{TypesError, TypesResult};

/// Axis-aligned rectangle in sheet pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle, rejecting negative or non-finite extents.
    pub fn checked(x: f64, y: f64, width: f64, height: f64) -> TypesResult<Self> {
        let rect = Self::new(x, y, width, height);
        rect.validate()?;
        Ok(rect)
    }

    pub fn validate(&self) -> TypesResult<()> {
        let finite = [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(TypesError::InvalidRect(format!("non-finite value in {:?}", self)));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(TypesError::InvalidRect(format!(
                "negative extent {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Strict overlap: rectangles that merely share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Scale width and height by the given ratios about the center.
    ///
    /// This is the "core" box used for overlap tests between candidates.
    pub fn shrink(&self, ratios: &ShrinkRatios) -> Rect {
        let width = ratios.horizontal * self.width;
        let height = ratios.vertical * self.height;
        Rect::new(
            self.center_x() - width / 2.0,
            self.center_y() - height / 2.0,
            width,
            height,
        )
    }

    /// Lexicographic total order on (x, y, width, height).
    pub fn total_cmp(&self, other: &Rect) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then(self.y.total_cmp(&other.y))
            .then(self.width.total_cmp(&other.width))
            .then(self.height.total_cmp(&other.height))
    }
}
