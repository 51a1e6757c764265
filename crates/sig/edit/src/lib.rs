#![deny(unsafe_code)]
//! # sig-edit
//!
//! Command-style editing of a SIG. Each command mutates the graph, then a
//! partial reduction runs around the touched Inters so the graph stays
//! conflict-free.
//!
//! ## Key Types
//!
//! - [`SigSession`] - owns the graph and applies [`SigCommand`]s
//! - [`EditOutcome`] - before/after snapshots and the reduction report

pub mod command;
pub mod error;
pub mod session;

pub use command::SigCommand;
pub use error::{EditError, EditResult};
pub use session::{EditOutcome, SigSession};
