//! Dense 2D lattice dimensions and row-major indexing.

use crate::boundary::BoundaryMode;
use crate::error::SpaceError;
use eddy_core::{Coord, Direction};

/// A `width x height` rectangular lattice with an outer-edge mode.
///
/// Cells are addressed by [`Coord`] (`x` column, `y` row) and stored in
/// row-major order: `index = y * width + x`. The lattice holds no cell
/// data; the engine sizes its buffers from [`cell_count`](Lattice::cell_count).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lattice {
    width: u32,
    height: u32,
    boundary: BoundaryMode,
}

impl Lattice {
    /// Maximum dimension size. Each axis must fit in an `i32`.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Create a lattice with `width * height` cells.
    ///
    /// Returns `Err(SpaceError::EmptySpace)` if either dimension is 0, or
    /// `Err(SpaceError::DimensionTooLarge)` if either exceeds [`MAX_DIM`](Self::MAX_DIM).
    pub fn new(width: u32, height: u32, boundary: BoundaryMode) -> Result<Self, SpaceError> {
        if width == 0 || height == 0 {
            return Err(SpaceError::EmptySpace);
        }
        if width > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "width",
                value: width,
                max: Self::MAX_DIM,
            });
        }
        if height > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "height",
                value: height,
                max: Self::MAX_DIM,
            });
        }
        Ok(Self {
            width,
            height,
            boundary,
        })
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Outer-edge mode.
    pub fn boundary(&self) -> BoundaryMode {
        self.boundary
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Whether `(x, y)` lies inside the grid.
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    /// Row-major flat index of an in-bounds coordinate.
    #[inline]
    pub fn index(&self, coord: Coord) -> usize {
        debug_assert!(coord.x < self.width && coord.y < self.height);
        (coord.y as usize) * (self.width as usize) + coord.x as usize
    }

    /// Flat index of `coord`, or `None` if it is outside the grid.
    pub fn checked_index(&self, coord: Coord) -> Option<usize> {
        if coord.x < self.width && coord.y < self.height {
            Some(self.index(coord))
        } else {
            None
        }
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn coord(&self, index: usize) -> Coord {
        let w = self.width as usize;
        Coord::new((index % w) as u32, (index / w) as u32)
    }

    /// Resolve one axis value under the lattice's edge mode.
    ///
    /// Returns `Some(value)` when it is in range or wraps (periodic), and
    /// `None` when it falls outside a reflective edge.
    pub fn resolve_axis(&self, val: i64, len: u32) -> Option<u32> {
        let n = len as i64;
        if (0..n).contains(&val) {
            return Some(val as u32);
        }
        match self.boundary {
            BoundaryMode::Periodic => Some(val.rem_euclid(n) as u32),
            BoundaryMode::Reflective => None,
        }
    }

    /// The raw (unresolved) neighbour of `from` along `dir`.
    #[inline]
    pub fn offset(&self, from: Coord, dir: Direction) -> (i64, i64) {
        let (dx, dy) = dir.offset();
        (from.x as i64 + dx as i64, from.y as i64 + dy as i64)
    }

    /// Clamp a raw position back inside the grid.
    pub fn clamp(&self, x: i64, y: i64) -> Coord {
        Coord::new(
            x.clamp(0, self.width as i64 - 1) as u32,
            y.clamp(0, self.height as i64 - 1) as u32,
        )
    }

    /// Iterate every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Coord::new(x, y)))
    }
}
