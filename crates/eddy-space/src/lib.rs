//! Lattice geometry and boundary policy for Eddy simulations.
//!
//! This crate owns everything static about a simulation grid: its
//! dimensions and row-major indexing ([`Lattice`]), the behaviour at the
//! outer edge ([`BoundaryMode`]), the optional solid wall with an open
//! aperture ([`WallMap`]), and the classifier that combines them to decide
//! where a value leaving a cell ends up ([`BoundaryPolicy`]).
//!
//! Both the streaming step and the particle-collision resolver consult
//! [`BoundaryPolicy`]; renderers only need [`BoundaryPolicy::is_wall`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod error;
pub mod lattice;
pub mod policy;
pub mod wall;

#[cfg(test)]
pub(crate) mod compliance;

pub use boundary::BoundaryMode;
pub use error::SpaceError;
pub use lattice::Lattice;
pub use policy::{BoundaryPolicy, Move};
pub use wall::WallMap;
