//! Per-tick metrics for the lattice engine.
//!
//! [`StepMetrics`] captures timing and clamp/boundary counters for a
//! single tick, enabling telemetry and stability diagnostics.

/// Timing and event counters collected during a single tick.
///
/// All durations are in microseconds. The engine populates these fields
/// after each `step()` call; consumers read them from the most recent
/// tick via `last_metrics()`.
#[derive(Clone, Debug, Default)]
pub struct StepMetrics {
    /// Wall-clock time for the entire tick, in microseconds.
    pub total_us: u64,
    /// Time spent in the collision (relaxation) pass, in microseconds.
    pub collision_us: u64,
    /// Time spent streaming and resolving arrivals, in microseconds.
    pub streaming_us: u64,
    /// Cells whose density was raised to the floor before relaxing.
    pub density_floor_hits: u64,
    /// Velocity components clamped into `[-5, 5]` during collision.
    pub velocity_clamps: u64,
    /// Cells whose density was NaN or infinite entering collision.
    pub non_finite_cells: u64,
    /// Values or particles turned back by a solid wall cell.
    pub bounces: u64,
    /// Particles that hit a reflective edge and re-entered the grid.
    pub edge_reentries: u64,
    /// Cells where more than one particle arrived and the collision rule ran.
    pub conflicts_resolved: u64,
    /// Field mass dropped at absorbing edges this tick.
    pub absorbed_mass: f64,
}

impl StepMetrics {
    /// Whether any numerical safety valve engaged this tick.
    pub fn clamped(&self) -> bool {
        self.velocity_clamps > 0
    }

    /// Whether the field has left the range of finite values.
    pub fn diverged(&self) -> bool {
        self.non_finite_cells > 0
    }
}
