//! Error types for lattice construction.

use std::fmt;

/// Errors arising from lattice or wall-map construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceError {
    /// Attempted to construct a lattice with zero cells.
    EmptySpace,
    /// A dimension exceeds the supported maximum.
    DimensionTooLarge {
        /// Which dimension (`"width"` or `"height"`).
        name: &'static str,
        /// The configured value.
        value: u32,
        /// The largest accepted value.
        max: u32,
    },
    /// The wall column does not lie inside the grid.
    WallOutOfRange {
        /// The configured column.
        column: u32,
        /// Grid width.
        width: u32,
    },
    /// The wall aperture is reversed or extends past the grid.
    InvalidAperture {
        /// First open row (inclusive).
        start: u32,
        /// End of the open rows (exclusive).
        end: u32,
        /// Grid height.
        height: u32,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySpace => write!(f, "lattice must have at least one cell"),
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} {value} exceeds maximum {max}")
            }
            Self::WallOutOfRange { column, width } => {
                write!(f, "wall column {column} outside [0, {width})")
            }
            Self::InvalidAperture { start, end, height } => {
                write!(f, "wall aperture [{start}, {end}) not within [0, {height})")
            }
        }
    }
}

impl std::error::Error for SpaceError {}
