#![deny(unsafe_code)]
//! # sig-types
//!
//! Foundation types shared by every crate of the Symbol Interpretation Graph.
//!
//! ## Key Types
//!
//! - [`InterId`] / [`SystemId`] - stable identities of candidate interpretations
//!   and of the independent page regions ("systems") that own them
//! - [`Grade`] - a confidence value guaranteed to lie in `[0, 1]`
//! - [`Rect`] - bounding geometry, with [`Rect::shrink`] producing core bounds
//! - [`Shape`] / [`ShapeCategory`] - the closed catalog of recognized shapes and
//!   the documented tie-break priority between them
//! - [`SigConfig`] - shrink ratios, support weights and reduction limits,
//!   always passed explicitly

pub mod config;
pub mod error;
pub mod geometry;
pub mod grade;
pub mod ids;
pub mod shape;

pub use config::{EnsemblePolicy, ShrinkRatios, SigConfig, SupportWeights};
pub use error::{TypesError, TypesResult};
pub use geometry::Rect;
pub use grade::Grade;
pub use ids::{InterId, StaffId, SystemId};
pub use shape::{AlterFamily, Shape, ShapeCategory};
