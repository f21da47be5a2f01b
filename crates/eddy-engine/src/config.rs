//! Engine configuration, validation, and error types.
//!
//! [`LatticeConfig`] is the input for constructing a [`LatticeEngine`].
//! [`validate()`](LatticeConfig::validate) checks every structural
//! invariant up front so that stepping never fails afterwards.
//!
//! [`LatticeEngine`]: crate::engine::LatticeEngine

use std::collections::HashSet;
use std::error::Error;
use std::fmt;
use std::ops::Range;

use eddy_core::{Coord, ModelKind};
use eddy_space::{BoundaryMode, BoundaryPolicy, SpaceError};

use crate::reflection::ReflectionRule;
use crate::resolver::CollisionRule;
use crate::state::Particle;

// ── WallConfig ────────────────────────────────────────────────────

/// A solid wall on one column, open over `aperture`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WallConfig {
    /// Wall column.
    pub column: u32,
    /// Open rows, half-open. Empty means a fully closed wall.
    pub aperture: Range<u32>,
}

impl WallConfig {
    /// Wall at `column` with the given open rows.
    pub fn new(column: u32, aperture: Range<u32>) -> Self {
        Self { column, aperture }
    }
}

// ── InitialState ──────────────────────────────────────────────────

/// The grid contents at tick 0.
#[derive(Clone, Debug, PartialEq)]
pub enum InitialState {
    /// Field model. Each cell starts at rest equilibrium for its density.
    /// A non-empty `overlay` adds tracer particles streamed alongside the
    /// field.
    Field {
        /// One density per cell, row-major.
        densities: Vec<f64>,
        /// Tracer particles; may be empty.
        overlay: Vec<Particle>,
    },
    /// Particle model.
    Particles(Vec<Particle>),
}

impl InitialState {
    /// The cell representation this state builds.
    pub fn model(&self) -> ModelKind {
        match self {
            Self::Field { .. } => ModelKind::Field,
            Self::Particles(_) => ModelKind::Particle,
        }
    }

    /// The particles this state places, if any.
    pub fn particles(&self) -> &[Particle] {
        match self {
            Self::Field { overlay, .. } => overlay,
            Self::Particles(particles) => particles,
        }
    }
}

// ── ConfigError ───────────────────────────────────────────────────

/// Errors detected during [`LatticeConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Lattice or wall geometry is invalid.
    Space(SpaceError),
    /// tau is NaN, infinite, zero, or negative.
    InvalidTau {
        /// The invalid value.
        value: f64,
    },
    /// The density vector does not have one entry per cell.
    DensityLengthMismatch {
        /// `width * height`.
        expected: usize,
        /// Entries supplied.
        actual: usize,
    },
    /// A density is NaN, infinite, or negative.
    InvalidDensity {
        /// Row-major cell index.
        index: usize,
        /// The invalid value.
        value: f64,
    },
    /// A solid wall cell was given non-zero density.
    DensityOnWall {
        /// The wall cell.
        coord: Coord,
    },
    /// A particle lies outside the grid.
    ParticleOutOfBounds {
        /// The offending particle.
        particle: Particle,
    },
    /// A particle starts on a solid wall cell.
    ParticleOnWall {
        /// The offending particle.
        particle: Particle,
    },
    /// Two particles share a cell and a direction.
    DuplicateParticle {
        /// The second occurrence.
        particle: Particle,
    },
    /// More particles were requested than there are free cells.
    TooManyParticles {
        /// Particles requested.
        requested: usize,
        /// Cells available.
        capacity: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space(e) => write!(f, "space: {e}"),
            Self::InvalidTau { value } => {
                write!(f, "tau must be finite and positive, got {value}")
            }
            Self::DensityLengthMismatch { expected, actual } => {
                write!(f, "expected {expected} densities, got {actual}")
            }
            Self::InvalidDensity { index, value } => {
                write!(f, "density at cell {index} must be finite and non-negative, got {value}")
            }
            Self::DensityOnWall { coord } => {
                write!(f, "wall cell {coord} must start empty")
            }
            Self::ParticleOutOfBounds { particle } => {
                write!(f, "particle {particle} lies outside the grid")
            }
            Self::ParticleOnWall { particle } => {
                write!(f, "particle {particle} starts on a wall cell")
            }
            Self::DuplicateParticle { particle } => {
                write!(f, "particle {particle} is placed twice")
            }
            Self::TooManyParticles {
                requested,
                capacity,
            } => write!(
                f,
                "{requested} particles requested but only {capacity} cells are free"
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Space(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SpaceError> for ConfigError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

// ── LatticeConfig ─────────────────────────────────────────────────

/// Complete configuration for constructing a lattice engine.
#[derive(Clone, Debug, PartialEq)]
pub struct LatticeConfig {
    /// Grid width (columns).
    pub width: u32,
    /// Grid height (rows).
    pub height: u32,
    /// Optional solid wall with an aperture.
    pub wall: Option<WallConfig>,
    /// Behaviour at the outer edge.
    pub boundary: BoundaryMode,
    /// BGK relaxation time. Ignored by the particle model but still
    /// validated.
    pub tau: f64,
    /// RNG seed for the collision resolver.
    pub seed: u64,
    /// How conflicting particle arrivals are redistributed.
    pub collision: CollisionRule,
    /// How particles hitting a wall are redirected.
    pub reflection: ReflectionRule,
    /// Grid contents at tick 0.
    pub initial: InitialState,
}

impl LatticeConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.checked_policy().map(|_| ())
    }

    /// Validate and return the boundary policy the engine will use.
    pub(crate) fn checked_policy(&self) -> Result<BoundaryPolicy, ConfigError> {
        // 1. Geometry: non-empty grid, wall column and aperture inside it.
        let wall = self.wall.as_ref().map(|w| (w.column, w.aperture.clone()));
        let policy = BoundaryPolicy::build(self.width, self.height, self.boundary, wall)?;
        // 2. tau must be finite and positive.
        if !self.tau.is_finite() || self.tau <= 0.0 {
            return Err(ConfigError::InvalidTau { value: self.tau });
        }
        // 3. Field densities: one per cell, finite, non-negative, and zero
        //    on wall cells.
        if let InitialState::Field { densities, .. } = &self.initial {
            let expected = policy.lattice().cell_count();
            if densities.len() != expected {
                return Err(ConfigError::DensityLengthMismatch {
                    expected,
                    actual: densities.len(),
                });
            }
            for (index, &value) in densities.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(ConfigError::InvalidDensity { index, value });
                }
                let coord = policy.lattice().coord(index);
                if value > 0.0 && policy.is_wall(coord.x, coord.y) {
                    return Err(ConfigError::DensityOnWall { coord });
                }
            }
        }
        // 4. Particles: inside the grid, off the wall, at most one per
        //    cell and direction.
        let mut seen = HashSet::new();
        for &particle in self.initial.particles() {
            if particle.x >= self.width || particle.y >= self.height {
                return Err(ConfigError::ParticleOutOfBounds { particle });
            }
            if policy.is_wall(particle.x, particle.y) {
                return Err(ConfigError::ParticleOnWall { particle });
            }
            if !seen.insert(particle) {
                return Err(ConfigError::DuplicateParticle { particle });
            }
        }
        Ok(policy)
    }
}
