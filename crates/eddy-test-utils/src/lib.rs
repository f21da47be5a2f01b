//! Test fixtures and grid inspection helpers for Eddy development.
//!
//! Provides ready-made [`LatticeConfig`]s for the standard test
//! scenarios (see [`fixtures`]) and helpers that read an engine's whole
//! grid back as particles or densities for assertions.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use eddy_core::Direction;
use eddy_engine::{LatticeEngine, Particle};

pub use fixtures::{
    channel_field, closed_gas, rest_field, scenario_config, single_particle, SCENARIO_APERTURE,
    SCENARIO_SIZE, SCENARIO_WALL_COLUMN,
};

/// Every particle on the grid, in row-major cell order and direction order
/// within a cell.
///
/// Returns an empty list for a field engine without an overlay.
pub fn particles(engine: &LatticeEngine) -> Vec<Particle> {
    let mut out = Vec::new();
    for y in 0..engine.height() {
        for x in 0..engine.width() {
            if let Ok(cell) = engine.read_occupation(x, y) {
                out.extend(cell.iter().map(|d| Particle::new(x, y, d)));
            }
        }
    }
    out
}

/// The only particle on the grid.
///
/// # Panics
///
/// Panics unless exactly one particle is present.
pub fn sole_particle(engine: &LatticeEngine) -> Particle {
    let all = particles(engine);
    assert_eq!(all.len(), 1, "expected exactly one particle, found {all:?}");
    all[0]
}

/// Whether a particle with `direction` sits on `(x, y)`.
pub fn has_particle(engine: &LatticeEngine, x: u32, y: u32, direction: Direction) -> bool {
    engine
        .read_occupation(x, y)
        .is_ok_and(|cell| cell.contains(direction))
}

/// Step `engine` `steps` times, asserting the particle count never changes.
pub fn assert_particles_conserved(engine: &mut LatticeEngine, steps: u64) {
    let expected = engine.particle_count();
    for _ in 0..steps {
        engine.step();
        assert_eq!(
            engine.particle_count(),
            expected,
            "particle count changed at tick {}",
            engine.tick()
        );
    }
}

/// Step `engine` `steps` times, asserting total field mass stays within
/// `1e-9` per cell of its starting value.
pub fn assert_mass_conserved(engine: &mut LatticeEngine, steps: u64) {
    let start = engine.total_mass().expect("field engine");
    let tolerance = 1e-9 * f64::from(engine.width()) * f64::from(engine.height());
    for _ in 0..steps {
        engine.step();
        let now = engine.total_mass().expect("field engine");
        assert!(
            (now - start).abs() <= tolerance,
            "mass drifted from {start} to {now} at tick {}",
            engine.tick()
        );
    }
}
