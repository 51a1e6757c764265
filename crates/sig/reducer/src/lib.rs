#![deny(unsafe_code)]
//! # sig-reducer
//!
//! Resolves a SIG to a conflict-free set of ACTIVE Inters.
//!
//! ## Key Types
//!
//! - [`Reducer`] - full and partial fixpoint passes over one system
//! - [`PageReducer`] - parallel passes over independent systems
//! - [`CancelToken`] - aborts an in-flight pass and restores the graph
//! - [`ReductionReport`] / [`ReductionOutput`] - what a pass did, and what
//!   survived it
//!
//! ## Example
//!
//! ```
//! use sig_graph::{InterDescriptor, SIGraph};
//! use sig_reducer::Reducer;
//! use sig_types::{Grade, Rect, Shape, SystemId};
//!
//! let mut sig = SIGraph::with_defaults(SystemId(0));
//! let head = sig
//!     .add_inter(InterDescriptor::new(
//!         Shape::NoteheadBlack,
//!         Rect::new(0.0, 0.0, 10.0, 10.0),
//!         Grade::new(0.9).unwrap(),
//!     ))
//!     .unwrap();
//! sig.add_inter(InterDescriptor::new(
//!     Shape::Trill,
//!     Rect::new(1.0, 1.0, 10.0, 10.0),
//!     Grade::new(0.95).unwrap(),
//! ))
//! .unwrap();
//!
//! let report = Reducer::new().reduce(&mut sig).unwrap();
//! assert_eq!(report.removed, vec![head]);
//! ```

pub mod cancel;
pub mod error;
pub mod exclusion;
pub mod output;
pub mod page;
pub mod priority;
pub mod reducer;

pub use cancel::CancelToken;
pub use error::{ReduceError, ReduceResult};
pub use output::{ActiveInter, ReductionOutput};
pub use page::PageReducer;
pub use priority::Rank;
pub use reducer::{Reducer, ReductionReport};
