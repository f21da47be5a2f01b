//! Core types for the Eddy lattice simulation engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental vocabulary shared by the geometry and engine crates:
//! the D2Q8 velocity set, cell coordinates, tick IDs, the state-kind tag
//! and the query error type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod direction;
pub mod error;
pub mod id;
pub mod model;

pub use direction::{Direction, DirectionSet, VELOCITY_COUNT};
pub use error::QueryError;
pub use id::{Coord, TickId};
pub use model::ModelKind;
