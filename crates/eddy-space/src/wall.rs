//! Static solid wall with an open aperture.

use std::ops::Range;

use crate::error::SpaceError;
use crate::lattice::Lattice;

/// A vertical wall occupying one column, open over a half-open row range.
///
/// Cells on `column` whose row lies outside `aperture` are solid; values
/// heading into them bounce back. An empty aperture (`start == end`) is a
/// fully closed wall.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WallMap {
    column: u32,
    aperture: Range<u32>,
}

impl WallMap {
    /// Build a wall map checked against `lattice`.
    ///
    /// # Errors
    ///
    /// - [`SpaceError::WallOutOfRange`] if `column >= width`.
    /// - [`SpaceError::InvalidAperture`] if `aperture.start > aperture.end`
    ///   or `aperture.end > height`.
    pub fn new(column: u32, aperture: Range<u32>, lattice: &Lattice) -> Result<Self, SpaceError> {
        if column >= lattice.width() {
            return Err(SpaceError::WallOutOfRange {
                column,
                width: lattice.width(),
            });
        }
        if aperture.start > aperture.end || aperture.end > lattice.height() {
            return Err(SpaceError::InvalidAperture {
                start: aperture.start,
                end: aperture.end,
                height: lattice.height(),
            });
        }
        Ok(Self { column, aperture })
    }

    /// The wall column.
    pub fn column(&self) -> u32 {
        self.column
    }

    /// The open row range.
    pub fn aperture(&self) -> Range<u32> {
        self.aperture.clone()
    }

    /// Whether row `y` of the wall column is open.
    #[inline]
    pub fn is_open(&self, y: u32) -> bool {
        self.aperture.contains(&y)
    }

    /// Whether `(x, y)` is a solid wall cell.
    #[inline]
    pub fn is_solid(&self, x: u32, y: u32) -> bool {
        x == self.column && !self.is_open(y)
    }

    /// Whether a destination in column `x` at raw row `y` hits the closed
    /// part of the wall. Rows beyond the grid are never part of the aperture.
    #[inline]
    pub fn blocks(&self, x: i64, y: i64) -> bool {
        x == i64::from(self.column)
            && !(i64::from(self.aperture.start)..i64::from(self.aperture.end)).contains(&y)
    }

    /// Number of solid cells on a lattice of the given height.
    pub fn solid_count(&self, height: u32) -> usize {
        (height - self.aperture.len() as u32) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryMode;

    fn lattice() -> Lattice {
        Lattice::new(10, 10, BoundaryMode::Periodic).unwrap()
    }

    #[test]
    fn solid_outside_aperture_only() {
        let w = WallMap::new(2, 3..6, &lattice()).unwrap();
        assert!(w.is_solid(2, 0));
        assert!(w.is_solid(2, 2));
        assert!(!w.is_solid(2, 3));
        assert!(!w.is_solid(2, 5));
        assert!(w.is_solid(2, 6));
        assert!(!w.is_solid(1, 0));
        assert!(!w.is_solid(3, 9));
        assert_eq!(w.solid_count(10), 7);
    }

    #[test]
    fn rows_beyond_the_grid_are_closed() {
        let w = WallMap::new(2, 0..10, &lattice()).unwrap();
        assert!(!w.blocks(2, 0));
        assert!(!w.blocks(2, 9));
        assert!(w.blocks(2, -1));
        assert!(w.blocks(2, 10));
        assert!(!w.blocks(1, -1));
        assert!(!w.blocks(-1, 4));
    }

    #[test]
    fn empty_aperture_is_closed_wall() {
        let w = WallMap::new(4, 5..5, &lattice()).unwrap();
        assert!((0..10).all(|y| w.is_solid(4, y)));
        assert_eq!(w.solid_count(10), 10);
    }

    #[test]
    fn full_aperture_is_open_column() {
        let w = WallMap::new(4, 0..10, &lattice()).unwrap();
        assert!((0..10).all(|y| !w.is_solid(4, y)));
    }

    #[test]
    fn rejects_column_outside_grid() {
        assert_eq!(
            WallMap::new(10, 0..1, &lattice()),
            Err(SpaceError::WallOutOfRange {
                column: 10,
                width: 10
            })
        );
    }

    #[test]
    fn rejects_aperture_outside_grid() {
        assert!(matches!(
            WallMap::new(2, 8..11, &lattice()),
            Err(SpaceError::InvalidAperture { end: 11, .. })
        ));
        #[allow(clippy::reversed_empty_ranges)]
        let reversed = 6..3;
        assert!(matches!(
            WallMap::new(2, reversed, &lattice()),
            Err(SpaceError::InvalidAperture { start: 6, .. })
        ));
    }
}
