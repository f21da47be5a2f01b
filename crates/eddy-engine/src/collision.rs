//! BGK collision for the field model.
//!
//! Each cell relaxes toward its local equilibrium:
//! `f[i] <- f[i] - (f[i] - eq[i]) / tau`. The pass is pointwise with no
//! cross-cell reads, so it runs in place.
//!
//! A cell below [`DENSITY_FLOOR`] is treated as holding exactly the floor,
//! both for its velocity and for its equilibrium. Empty cells therefore
//! relax toward `DENSITY_FLOOR / 8` per channel every tick.

use eddy_core::{Direction, VELOCITY_COUNT};

use crate::equilibrium::equilibrium;
use crate::limits::{DENSITY_FLOOR, VELOCITY_CLAMP};
use crate::metrics::StepMetrics;

/// Density and velocity of one cell.
///
/// The density is the raw sum of the weights. The velocity divides the
/// momentum by the density raised to [`DENSITY_FLOOR`] and clamps each
/// component to `[-VELOCITY_CLAMP, VELOCITY_CLAMP]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Macroscopic {
    /// Sum of the eight weights.
    pub density: f64,
    /// Clamped macroscopic velocity.
    pub velocity: (f64, f64),
    /// The density was below the floor.
    pub floored: bool,
    /// Number of velocity components that were clamped (0 to 2).
    pub clamped: u8,
}

/// Compute the macroscopic moments of a cell.
pub fn macroscopic(weights: &[f64; VELOCITY_COUNT]) -> Macroscopic {
    let mut density = 0.0;
    let mut mx = 0.0;
    let mut my = 0.0;
    for dir in Direction::ALL {
        let w = weights[dir.index()];
        let (ex, ey) = dir.vector();
        density += w;
        mx += w * ex;
        my += w * ey;
    }
    let floored = density < DENSITY_FLOOR;
    let divisor = density.max(DENSITY_FLOOR);
    let mut clamped = 0;
    let mut clamp = |v: f64| {
        let c = v.clamp(-VELOCITY_CLAMP, VELOCITY_CLAMP);
        if c != v {
            clamped += 1;
        }
        c
    };
    let velocity = (clamp(mx / divisor), clamp(my / divisor));
    Macroscopic {
        density,
        velocity,
        floored,
        clamped,
    }
}

/// Relax one cell in place. Returns its moments before relaxation.
pub fn relax(weights: &mut [f64; VELOCITY_COUNT], tau: f64) -> Macroscopic {
    let m = macroscopic(weights);
    let eq = equilibrium(m.density.max(DENSITY_FLOOR), m.velocity);
    for (w, e) in weights.iter_mut().zip(eq) {
        *w -= (*w - e) / tau;
    }
    m
}

/// Relax every cell, counting clamp events into `metrics`.
pub fn collide(cells: &mut [[f64; VELOCITY_COUNT]], tau: f64, metrics: &mut StepMetrics) {
    for cell in cells.iter_mut() {
        let m = relax(cell, tau);
        if m.floored {
            metrics.density_floor_hits += 1;
        }
        metrics.velocity_clamps += u64::from(m.clamped);
        if !m.density.is_finite() {
            metrics.non_finite_cells += 1;
        }
    }
}
