//! Simulation engine for Eddy lattice models.
//!
//! Provides [`LatticeEngine`], which owns a dense grid of field cells
//! (eight distribution weights, relaxed by BGK collision) or particle
//! cells (eight occupation bits, moved by streaming and resolved by a
//! seeded collision rule). Each tick runs collide → stream → resolve
//! against the [`BoundaryPolicy`](eddy_space::BoundaryPolicy) built from
//! a validated [`LatticeConfig`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod collision;
pub mod config;
pub mod engine;
pub mod equilibrium;
mod hash;
pub mod init;
pub mod limits;
pub mod metrics;
pub mod reflection;
pub mod resolver;
pub(crate) mod state;
pub mod streaming;

pub use config::{ConfigError, InitialState, LatticeConfig, WallConfig};
pub use engine::{EngineState, LatticeEngine};
pub use equilibrium::equilibrium;
pub use init::random_particles;
pub use metrics::StepMetrics;
pub use reflection::ReflectionRule;
pub use resolver::CollisionRule;
pub use state::Particle;
