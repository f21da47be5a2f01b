//! Reusable engine configurations.
//!
//! - [`scenario_config`]: the 10x10 aperture scenario with one particle.
//! - [`single_particle`]: one particle on an arbitrary grid.
//! - [`closed_gas`]: a seeded gas of 120 particles around a wall.
//! - [`rest_field`]: a uniform field at rest on a periodic grid.
//! - [`channel_field`]: fluid packed left of a wall behind a sharp front.

use std::ops::Range;

use eddy_core::Direction;
use eddy_engine::{
    random_particles, CollisionRule, InitialState, LatticeConfig, Particle, ReflectionRule,
    WallConfig,
};
use eddy_space::BoundaryMode;

/// Side length of the aperture scenario grid.
pub const SCENARIO_SIZE: u32 = 10;
/// Wall column of the aperture scenario.
pub const SCENARIO_WALL_COLUMN: u32 = 2;
/// Open rows of the aperture scenario wall.
pub const SCENARIO_APERTURE: Range<u32> = 3..6;

/// 10x10 periodic grid, wall on column 2 open over rows `[3, 6)`, one
/// particle at `(x, y)` moving along `direction`.
pub fn scenario_config(x: u32, y: u32, direction: Direction) -> LatticeConfig {
    single_particle(
        SCENARIO_SIZE,
        SCENARIO_SIZE,
        BoundaryMode::Periodic,
        Some(WallConfig::new(SCENARIO_WALL_COLUMN, SCENARIO_APERTURE)),
        Particle::new(x, y, direction),
    )
}

/// One particle on a `width` x `height` grid.
pub fn single_particle(
    width: u32,
    height: u32,
    boundary: BoundaryMode,
    wall: Option<WallConfig>,
    particle: Particle,
) -> LatticeConfig {
    LatticeConfig {
        width,
        height,
        wall,
        boundary,
        tau: 0.6,
        seed: 42,
        collision: CollisionRule::Randomize,
        reflection: ReflectionRule::BounceBack,
        initial: InitialState::Particles(vec![particle]),
    }
}

/// 20x20 grid with a wall on column 10 open over rows `[8, 12)`, and 120
/// particles placed by `seed` left of the wall.
pub fn closed_gas(
    seed: u64,
    boundary: BoundaryMode,
    collision: CollisionRule,
    reflection: ReflectionRule,
) -> LatticeConfig {
    let particles = random_particles(20, 20, 10, 120, seed).expect("120 fits in 200 cells");
    LatticeConfig {
        width: 20,
        height: 20,
        wall: Some(WallConfig::new(10, 8..12)),
        boundary,
        tau: 0.6,
        seed,
        collision,
        reflection,
        initial: InitialState::Particles(particles),
    }
}

/// Uniform density `rho` at rest on a periodic grid without a wall.
pub fn rest_field(width: u32, height: u32, rho: f64) -> LatticeConfig {
    LatticeConfig {
        width,
        height,
        wall: None,
        boundary: BoundaryMode::Periodic,
        tau: 0.6,
        seed: 0,
        collision: CollisionRule::Randomize,
        reflection: ReflectionRule::BounceBack,
        initial: InitialState::Field {
            densities: vec![rho; width as usize * height as usize],
            overlay: Vec::new(),
        },
    }
}

/// 16x16 grid, wall on column 4 open over rows `[6, 10)`, unit density
/// in columns 0 to 3.
pub fn channel_field(boundary: BoundaryMode) -> LatticeConfig {
    LatticeConfig {
        width: 16,
        height: 16,
        wall: Some(WallConfig::new(4, 6..10)),
        boundary,
        tau: 0.6,
        seed: 0,
        collision: CollisionRule::Randomize,
        reflection: ReflectionRule::BounceBack,
        initial: InitialState::left_fill(16, 16, 4, 1.0),
    }
}
