//! Eddy: a discrete-velocity lattice engine on a D2Q8 grid.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Eddy sub-crates. For most users, adding `eddy` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use eddy::prelude::*;
//!
//! // A 10×10 periodic grid with a wall in column 2, open on rows 3..6.
//! let config = LatticeConfig {
//!     width: 10,
//!     height: 10,
//!     wall: Some(WallConfig::new(2, 3..6)),
//!     boundary: BoundaryMode::Periodic,
//!     tau: 0.6,
//!     seed: 42,
//!     collision: CollisionRule::Randomize,
//!     reflection: ReflectionRule::BounceBack,
//!     initial: InitialState::Particles(vec![Particle::new(1, 5, Direction::E)]),
//! };
//! let mut engine = LatticeEngine::new(config).unwrap();
//! engine.step();
//! assert!(engine.read_occupation(2, 5).unwrap().contains(Direction::E));
//! assert_eq!(engine.tick(), eddy::types::TickId(1));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Crate | Contents |
//! |--------|-------|----------|
//! | [`types`] | `eddy-core` | Directions, coordinates, tick IDs, query errors |
//! | [`space`] | `eddy-space` | Lattice geometry, walls, boundary policy |
//! | [`engine`] | `eddy-engine` | Configuration, kernels, [`engine::LatticeEngine`] |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`eddy-core`).
///
/// Contains the eight lattice [`types::Direction`]s, occupation bitsets,
/// coordinates, and the error type returned by engine queries.
pub use eddy_core as types;

/// Lattice geometry (`eddy-space`).
///
/// Provides [`space::Lattice`], the [`space::WallMap`] with its aperture,
/// and the [`space::BoundaryPolicy`] that decides where every move lands.
pub use eddy_space as space;

/// The simulation engine (`eddy-engine`).
///
/// [`engine::LatticeEngine`] plus the collision, streaming and resolver
/// kernels it is built from.
pub use eddy_engine as engine;

/// Common imports for typical Eddy usage.
///
/// ```rust
/// use eddy::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use eddy_core::{Coord, Direction, DirectionSet, ModelKind, QueryError, TickId};

    // Geometry
    pub use eddy_space::{BoundaryMode, BoundaryPolicy};

    // Engine
    pub use eddy_engine::{
        CollisionRule, ConfigError, EngineState, InitialState, LatticeConfig, LatticeEngine,
        Particle, ReflectionRule, StepMetrics, WallConfig,
    };
}
