//! Initial-state builders and reference configurations.
//!
//! The reference presets reproduce the classic demonstration setups: a
//! 100x100 channel with a wall at a quarter of the width, open over ten
//! rows around the middle, with fluid or gas starting left of the wall.

use eddy_core::Direction;
use eddy_space::BoundaryMode;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{ConfigError, InitialState, LatticeConfig, WallConfig};
use crate::reflection::ReflectionRule;
use crate::resolver::CollisionRule;
use crate::state::Particle;

/// Reference grid side length.
pub const REFERENCE_SIZE: u32 = 100;
/// Reference relaxation time.
pub const REFERENCE_TAU: f64 = 0.6;
/// Particles in the reference lattice-gas setup.
pub const REFERENCE_GAS_PARTICLES: usize = 2000;
/// Tracer particles in the reference overlay setup.
pub const REFERENCE_TRACERS: usize = 500;

impl InitialState {
    /// Field state with `density` in the first `columns` columns and
    /// empty cells elsewhere. No overlay.
    pub fn left_fill(width: u32, height: u32, columns: u32, density: f64) -> Self {
        Self::Field {
            densities: left_fill_densities(width, height, columns, density),
            overlay: Vec::new(),
        }
    }
}

fn left_fill_densities(width: u32, height: u32, columns: u32, density: f64) -> Vec<f64> {
    (0..height)
        .flat_map(|_| (0..width).map(move |x| if x < columns { density } else { 0.0 }))
        .collect()
}

/// Place `count` particles on distinct cells of the first `columns`
/// columns, each with a uniformly random direction.
///
/// Cells are drawn without replacement from a [`ChaCha8Rng`] seeded with
/// `seed`, so the same arguments always produce the same placement.
///
/// # Errors
///
/// [`ConfigError::TooManyParticles`] if `count` exceeds the number of
/// cells in the region.
pub fn random_particles(
    width: u32,
    height: u32,
    columns: u32,
    count: usize,
    seed: u64,
) -> Result<Vec<Particle>, ConfigError> {
    let columns = columns.min(width);
    let capacity = columns as usize * height as usize;
    if count > capacity {
        return Err(ConfigError::TooManyParticles {
            requested: count,
            capacity,
        });
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let cells = rand::seq::index::sample(&mut rng, capacity, count);
    let particles = cells
        .into_iter()
        .map(|cell| {
            let x = (cell % columns as usize) as u32;
            let y = (cell / columns as usize) as u32;
            let direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
            Particle::new(x, y, direction)
        })
        .collect();
    Ok(particles)
}

fn reference_wall() -> WallConfig {
    let mid = REFERENCE_SIZE / 2;
    WallConfig::new(REFERENCE_SIZE / 4, mid - 5..mid + 5)
}

impl LatticeConfig {
    /// Lattice Boltzmann channel: unit density left of the wall,
    /// absorbing outer edges, tau 0.6.
    pub fn reference_field() -> Self {
        let n = REFERENCE_SIZE;
        Self {
            width: n,
            height: n,
            wall: Some(reference_wall()),
            boundary: BoundaryMode::Reflective,
            tau: REFERENCE_TAU,
            seed: 0,
            collision: CollisionRule::Randomize,
            reflection: ReflectionRule::BounceBack,
            initial: InitialState::left_fill(n, n, n / 4, 1.0),
        }
    }

    /// Lattice Boltzmann on a periodic grid with 500 tracer particles
    /// placed left of the wall.
    pub fn reference_overlay(seed: u64) -> Result<Self, ConfigError> {
        let n = REFERENCE_SIZE;
        let overlay = random_particles(n, n, n / 4, REFERENCE_TRACERS, seed)?;
        Ok(Self {
            width: n,
            height: n,
            wall: Some(reference_wall()),
            boundary: BoundaryMode::Periodic,
            tau: REFERENCE_TAU,
            seed,
            collision: CollisionRule::Randomize,
            reflection: ReflectionRule::BounceBack,
            initial: InitialState::Field {
                densities: left_fill_densities(n, n, n / 4, 1.0),
                overlay,
            },
        })
    }

    /// Lattice gas: 2000 particles left of the wall, reflective edges,
    /// exclusion collisions and the lattice-gas reflection table.
    pub fn reference_particles(seed: u64) -> Result<Self, ConfigError> {
        let n = REFERENCE_SIZE;
        let particles = random_particles(n, n, n / 4, REFERENCE_GAS_PARTICLES, seed)?;
        Ok(Self {
            width: n,
            height: n,
            wall: Some(reference_wall()),
            boundary: BoundaryMode::Reflective,
            tau: REFERENCE_TAU,
            seed,
            collision: CollisionRule::Exclusion,
            reflection: ReflectionRule::LatticeGas,
            initial: InitialState::Particles(particles),
        })
    }
}
