//! Error types shared across the Eddy crates.
//!
//! Construction errors live next to the configuration they validate
//! (`eddy_space::SpaceError`, `eddy_engine::ConfigError`). This module
//! holds the read-side error returned by per-cell queries.

use std::error::Error;
use std::fmt;

use crate::id::Coord;
use crate::model::ModelKind;

/// Errors from per-cell read queries on a running engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryError {
    /// The coordinate lies outside the grid.
    CoordOutOfBounds {
        /// The offending coordinate.
        coord: Coord,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },
    /// The query needs a different cell representation than the engine has.
    ModelMismatch {
        /// Representation the query reads.
        expected: ModelKind,
        /// Representation the engine was built with.
        actual: ModelKind,
    },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CoordOutOfBounds {
                coord,
                width,
                height,
            } => write!(
                f,
                "coordinate {coord} out of bounds: [0, {width}) x [0, {height})"
            ),
            Self::ModelMismatch { expected, actual } => {
                write!(f, "query needs a {expected} model, engine has a {actual} model")
            }
        }
    }
}

impl Error for QueryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_out_of_bounds() {
        let e = QueryError::CoordOutOfBounds {
            coord: Coord::new(10, 2),
            width: 10,
            height: 10,
        };
        assert_eq!(
            e.to_string(),
            "coordinate (10, 2) out of bounds: [0, 10) x [0, 10)"
        );
    }

    #[test]
    fn display_model_mismatch() {
        let e = QueryError::ModelMismatch {
            expected: ModelKind::Field,
            actual: ModelKind::Particle,
        };
        assert_eq!(
            e.to_string(),
            "query needs a field model, engine has a particle model"
        );
    }
}
