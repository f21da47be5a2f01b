//! The boundary classifier shared by streaming and collision resolution.
//!
//! Precedence for a value leaving `from` along `dir`:
//!
//! 1. If the destination column is the wall column and the raw destination
//!    row is outside the aperture, the value bounces back. Rows beyond the
//!    grid are never part of the aperture. On a periodic lattice the column
//!    is taken after wrapping, so a wall on column 0 also blocks values
//!    arriving from the last column.
//! 2. An open wall cell whose move leaves the grid rows bounces back too.
//!    This is the mirror of rule 1: every channel between two cells stays
//!    usable in both directions or in neither.
//! 3. Resolve the raw destination against the outer edge. Periodic
//!    lattices wrap; reflective lattices report which axes were violated.

use eddy_core::{Coord, Direction};

use crate::boundary::BoundaryMode;
use crate::error::SpaceError;
use crate::lattice::Lattice;
use crate::wall::WallMap;

/// Outcome of moving one step from a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    /// The value lands on this in-grid, non-wall cell.
    Stream(Coord),
    /// The destination is a solid wall cell: the value stays at the source.
    Bounce,
    /// The destination lies beyond a reflective edge.
    Exit {
        /// The x component left `[0, width)`.
        flip_x: bool,
        /// The y component left `[0, height)`.
        flip_y: bool,
    },
}

/// Static boundary configuration: lattice edges plus an optional wall.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundaryPolicy {
    lattice: Lattice,
    wall: Option<WallMap>,
}

impl BoundaryPolicy {
    /// Combine a lattice with an optional wall map.
    ///
    /// The wall must have been validated against the same lattice.
    pub fn new(lattice: Lattice, wall: Option<WallMap>) -> Self {
        Self { lattice, wall }
    }

    /// Convenience constructor validating the wall in one go.
    pub fn build(
        width: u32,
        height: u32,
        boundary: BoundaryMode,
        wall: Option<(u32, std::ops::Range<u32>)>,
    ) -> Result<Self, SpaceError> {
        let lattice = Lattice::new(width, height, boundary)?;
        let wall = match wall {
            Some((column, aperture)) => Some(WallMap::new(column, aperture, &lattice)?),
            None => None,
        };
        Ok(Self::new(lattice, wall))
    }

    /// The underlying lattice.
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// The wall map, if one is configured.
    pub fn wall(&self) -> Option<&WallMap> {
        self.wall.as_ref()
    }

    /// Whether `(x, y)` is a solid wall cell. `false` outside the grid.
    #[inline]
    pub fn is_wall(&self, x: u32, y: u32) -> bool {
        if x >= self.lattice.width() || y >= self.lattice.height() {
            return false;
        }
        self.wall.as_ref().is_some_and(|w| w.is_solid(x, y))
    }

    /// Classify the move from `from` along `dir`.
    pub fn classify(&self, from: Coord, dir: Direction) -> Move {
        let (rx, ry) = self.lattice.offset(from, dir);
        let x = self.lattice.resolve_axis(rx, self.lattice.width());
        let y = self.lattice.resolve_axis(ry, self.lattice.height());
        if let Some(wall) = &self.wall {
            let leaves_rows = !(0..i64::from(self.lattice.height())).contains(&ry);
            if wall.blocks(x.map_or(rx, i64::from), ry)
                || (leaves_rows && from.x == wall.column() && wall.is_open(from.y))
            {
                return Move::Bounce;
            }
        }
        match (x, y) {
            (Some(x), Some(y)) => Move::Stream(Coord::new(x, y)),
            _ => Move::Exit {
                flip_x: x.is_none(),
                flip_y: y.is_none(),
            },
        }
    }

    /// Where a particle that hit a reflective edge re-enters.
    ///
    /// The violated velocity components are negated and the raw position
    /// is clamped back into the grid. Returns `None` when the clamped cell
    /// is a wall cell, in which case the caller bounces the particle in
    /// place instead.
    pub fn reenter(
        &self,
        from: Coord,
        dir: Direction,
        flip_x: bool,
        flip_y: bool,
    ) -> Option<(Coord, Direction)> {
        let (rx, ry) = self.lattice.offset(from, dir);
        let at = self.lattice.clamp(rx, ry);
        if self.is_wall(at.x, at.y) {
            return None;
        }
        Some((at, dir.flip_axes(flip_x, flip_y)))
    }
}
