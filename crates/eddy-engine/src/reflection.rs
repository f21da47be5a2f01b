//! Wall reflection rules for the particle model.
//!
//! Two reflection arithmetics are supported and kept distinct:
//!
//! - [`ReflectionRule::BounceBack`] reverses the velocity,
//!   `(i + 4) mod 8`. Symmetric for all eight directions.
//! - [`ReflectionRule::LatticeGas`] is the table used by the classic
//!   lattice-gas automaton. Axis directions reverse, but diagonals turn
//!   by a quarter: NW goes SW, NE goes SE, SW goes W and SE goes N. It
//!   is not an involution and can map two directions onto one, which the
//!   collision resolver treats as a conflict.
//!
//! Field weights always bounce back; only particles consult the rule.

use std::fmt;

use eddy_core::{Direction, VELOCITY_COUNT};

/// Canonical-index image of each direction under the lattice-gas table.
const LATTICE_GAS: [u8; VELOCITY_COUNT] = [4, 6, 6, 4, 0, 3, 2, 1];

/// How a particle blocked by a solid wall cell is redirected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReflectionRule {
    /// Reverse the direction: `(i + 4) mod 8`.
    #[default]
    BounceBack,
    /// Lattice-gas table: axis directions reverse, diagonals turn.
    LatticeGas,
}

impl ReflectionRule {
    /// The direction a particle leaves with after hitting a wall along `dir`.
    pub fn reflect(self, dir: Direction) -> Direction {
        match self {
            Self::BounceBack => dir.opposite(),
            Self::LatticeGas => Direction::ALL[LATTICE_GAS[dir.index()] as usize],
        }
    }
}

impl fmt::Display for ReflectionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BounceBack => write!(f, "bounce-back"),
            Self::LatticeGas => write!(f, "lattice-gas"),
        }
    }
}
