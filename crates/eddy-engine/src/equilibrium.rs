//! The D2Q8 equilibrium distribution.
//!
//! `eq[i] = rho/8 * (1 + 3 uv + 4.5 uv^2 - 1.5 |u|^2)` with `uv = u . e_i`,
//! lattice speed `c = 1`. Every direction carries the same weight `1/8`;
//! there is no rest channel.

use eddy_core::{Direction, VELOCITY_COUNT};

use crate::limits::{USQR_CAP, UV_CLAMP};

/// Equilibrium weights for `density` moving at `velocity`.
///
/// `uv` is clamped to `[-1, 1]` and `|u|^2` capped at 100 before use.
/// Pure and infallible; callers sanitize inputs (see [`crate::collision`]).
pub fn equilibrium(density: f64, velocity: (f64, f64)) -> [f64; VELOCITY_COUNT] {
    let (ux, uy) = velocity;
    let usqr = (ux * ux + uy * uy).min(USQR_CAP);
    let base = density / VELOCITY_COUNT as f64;
    let mut eq = [0.0; VELOCITY_COUNT];
    for dir in Direction::ALL {
        let (ex, ey) = dir.vector();
        let uv = (ux * ex + uy * ey).clamp(-UV_CLAMP, UV_CLAMP);
        eq[dir.index()] = base * (1.0 + 3.0 * uv + 4.5 * uv * uv - 1.5 * usqr);
    }
    eq
}
