#![deny(unsafe_code)]
//! # sig-graph
//!
//! The Symbol Interpretation Graph of one system: candidate interpretations
//! ("Inters") as vertices, typed relations as edges.
//!
//! ## Key Types
//!
//! - [`SIGraph`] - owner of Inters and relations, with a spatial index over
//!   ACTIVE bounds and cached contextual grades
//! - [`Inter`] / [`InterKind`] - a candidate and its closed set of shape
//!   variants
//! - [`Relation`] - support, exclusion or containment
//! - [`GridIndex`] - uniform-grid spatial index
//!
//! All structural violations are rejected with a [`GraphError`] and leave the
//! graph unchanged.

pub mod abnormal;
pub mod error;
pub mod grade;
pub mod graph;
pub mod inter;
pub mod relation;
pub mod spatial;

pub use abnormal::check_abnormal;
pub use error::{GraphError, GraphResult};
pub use graph::SIGraph;
pub use inter::{
    AlterInfo, EnsembleKind, Inter, InterAttributes, InterDescriptor, InterKind, InterStatus,
};
pub use relation::{Relation, RelationRef, RelationType, Support, SupportKind};
pub use spatial::GridIndex;
