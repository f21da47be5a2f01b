//! Numerical safety valves.
//!
//! These clamps are not part of the lattice model. They keep a step
//! finite when a near-empty cell produces an extreme velocity, and they
//! are applied identically on every call so results stay reproducible.

/// Densities below this are raised to it for the velocity and equilibrium.
pub const DENSITY_FLOOR: f64 = 1e-6;

/// Per-component bound on the macroscopic velocity, `[-5, 5]`.
pub const VELOCITY_CLAMP: f64 = 5.0;

/// Bound on `u . e_i` inside the equilibrium, `[-1, 1]`.
pub const UV_CLAMP: f64 = 1.0;

/// Upper bound on `|u|^2` inside the equilibrium.
pub const USQR_CAP: f64 = 100.0;
