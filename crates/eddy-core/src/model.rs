//! The cell-state representation tag.

use std::fmt;

/// Which cell representation an engine carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModelKind {
    /// Eight real-valued distribution weights per cell, relaxed by BGK
    /// collision (lattice Boltzmann).
    Field,
    /// Eight occupation bits per cell, moved by streaming and the
    /// particle-collision resolver (lattice gas).
    Particle,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field => write!(f, "field"),
            Self::Particle => write!(f, "particle"),
        }
    }
}
