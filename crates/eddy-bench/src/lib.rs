//! Benchmark profiles for the Eddy lattice engine.
//!
//! Provides pre-built [`LatticeConfig`] profiles:
//!
//! - [`field_profile`]: 100x100 lattice Boltzmann channel (10K cells)
//! - [`gas_profile`]: 100x100 lattice gas with 2000 particles
//! - [`overlay_profile`]: 100x100 periodic field with 500 tracers
//! - [`stress_gas_profile`]: 316x316 lattice gas (~100K cells)

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use eddy_engine::{
    random_particles, CollisionRule, ConfigError, InitialState, LatticeConfig, ReflectionRule,
    WallConfig,
};
use eddy_space::BoundaryMode;

/// Side length of the stress profile.
pub const STRESS_SIZE: u32 = 316;

/// Reference lattice Boltzmann channel.
pub fn field_profile() -> LatticeConfig {
    LatticeConfig::reference_field()
}

/// Reference lattice gas.
pub fn gas_profile(seed: u64) -> Result<LatticeConfig, ConfigError> {
    LatticeConfig::reference_particles(seed)
}

/// Reference field with tracer overlay.
pub fn overlay_profile(seed: u64) -> Result<LatticeConfig, ConfigError> {
    LatticeConfig::reference_overlay(seed)
}

/// Lattice gas at 10x the reference cell count.
///
/// Same geometry as [`gas_profile`] scaled up: the wall sits at a quarter
/// of the width, and a fifth of the cells left of it start occupied.
pub fn stress_gas_profile(seed: u64) -> Result<LatticeConfig, ConfigError> {
    let n = STRESS_SIZE;
    let columns = n / 4;
    let count = (columns * n / 5) as usize;
    let mid = n / 2;
    Ok(LatticeConfig {
        width: n,
        height: n,
        wall: Some(WallConfig::new(columns, mid - 16..mid + 16)),
        boundary: BoundaryMode::Reflective,
        tau: 0.6,
        seed,
        collision: CollisionRule::Exclusion,
        reflection: ReflectionRule::LatticeGas,
        initial: InitialState::Particles(random_particles(n, n, columns, count, seed)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_validate() {
        field_profile().validate().unwrap();
        gas_profile(42).unwrap().validate().unwrap();
        overlay_profile(42).unwrap().validate().unwrap();
        stress_gas_profile(42).unwrap().validate().unwrap();
    }

    #[test]
    fn stress_profile_population() {
        let config = stress_gas_profile(1).unwrap();
        assert_eq!(config.initial.particles().len(), 79 * 316 / 5);
    }
}
