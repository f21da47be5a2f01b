//! The lattice engine.
//!
//! [`LatticeEngine`] is the user-facing API. It owns the grid, the
//! boundary policy, and the seeded resolver RNG. Each call to
//! [`step()`](LatticeEngine::step) runs one complete tick:
//! collide → stream → resolve particle arrivals.
//!
//! # Ownership model
//!
//! `LatticeEngine` is [`Send`] (can be moved between threads) but all
//! mutating methods take `&mut self`, so the borrow checker serializes
//! steps. There are no locks and no background threads.

use std::fmt;
use std::time::Instant;

use eddy_core::{Coord, DirectionSet, ModelKind, QueryError, TickId, VELOCITY_COUNT};
use eddy_space::{BoundaryPolicy, Lattice, WallMap};
use log::{debug, trace, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{ConfigError, InitialState, LatticeConfig};
use crate::equilibrium::equilibrium;
use crate::hash::StateHasher;
use crate::metrics::StepMetrics;
use crate::state::{CellState, FieldLayer, Particle, ParticleLayer};

// Compile-time assertion: LatticeEngine is Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<LatticeEngine>();
    }
};

// ── EngineState ─────────────────────────────────────────────────

/// Lifecycle state of an engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// Constructed or reset; the grid holds the initial configuration.
    Uninitialized,
    /// At least one step has run.
    Running,
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::Running => write!(f, "running"),
        }
    }
}

// ── LatticeEngine ───────────────────────────────────────────────

/// Discrete-velocity lattice simulation over a field or particle grid.
///
/// Created from a [`LatticeConfig`] via [`new()`](LatticeEngine::new).
///
/// # Example
///
/// ```
/// use eddy_core::{Direction, TickId};
/// use eddy_engine::{
///     CollisionRule, InitialState, LatticeConfig, LatticeEngine, Particle, ReflectionRule,
///     WallConfig,
/// };
/// use eddy_space::BoundaryMode;
///
/// let config = LatticeConfig {
///     width: 10,
///     height: 10,
///     wall: Some(WallConfig::new(2, 3..6)),
///     boundary: BoundaryMode::Periodic,
///     tau: 0.6,
///     seed: 42,
///     collision: CollisionRule::Randomize,
///     reflection: ReflectionRule::BounceBack,
///     initial: InitialState::Particles(vec![Particle::new(1, 5, Direction::E)]),
/// };
/// let mut engine = LatticeEngine::new(config)?;
/// engine.step();
/// assert!(engine.read_occupation(2, 5)?.contains(Direction::E));
/// assert_eq!(engine.tick(), TickId(1));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct LatticeEngine {
    config: LatticeConfig,
    policy: BoundaryPolicy,
    state: CellState,
    rng: ChaCha8Rng,
    tick: TickId,
    last_metrics: StepMetrics,
    clamp_warned: bool,
    divergence_warned: bool,
}

impl LatticeEngine {
    /// Create a new engine from a [`LatticeConfig`].
    ///
    /// Validates the configuration, builds the grid at tick 0, and seeds
    /// the resolver RNG from `config.seed`.
    pub fn new(config: LatticeConfig) -> Result<Self, ConfigError> {
        let policy = config.checked_policy()?;
        let state = build_state(&config.initial, &policy);
        debug!(
            "lattice engine: {}x{} {} model, {:?} edges, wall {:?}, tau {}, {} / {}",
            config.width,
            config.height,
            config.initial.model(),
            config.boundary,
            config.wall,
            config.tau,
            config.collision,
            config.reflection,
        );
        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            policy,
            state,
            tick: TickId::default(),
            last_metrics: StepMetrics::default(),
            clamp_warned: false,
            divergence_warned: false,
        })
    }

    /// Advance the simulation by exactly one tick.
    ///
    /// Infallible: numerical instability is absorbed by the clamps in
    /// [`limits`](crate::limits) and reported through
    /// [`last_metrics()`](Self::last_metrics).
    pub fn step(&mut self) {
        let tick_start = Instant::now();
        let mut metrics = StepMetrics::default();

        match &mut self.state {
            CellState::Field { weights, overlay } => {
                let collide_start = Instant::now();
                weights.collide(self.config.tau, &mut metrics);
                metrics.collision_us = collide_start.elapsed().as_micros() as u64;

                let stream_start = Instant::now();
                weights.stream(&self.policy, &mut metrics);
                if let Some(tracers) = overlay {
                    tracers.stream(
                        &self.policy,
                        self.config.reflection,
                        self.config.collision,
                        &mut self.rng,
                        &mut metrics,
                    );
                }
                metrics.streaming_us = stream_start.elapsed().as_micros() as u64;
            }
            CellState::Particle(layer) => {
                let stream_start = Instant::now();
                layer.stream(
                    &self.policy,
                    self.config.reflection,
                    self.config.collision,
                    &mut self.rng,
                    &mut metrics,
                );
                metrics.streaming_us = stream_start.elapsed().as_micros() as u64;
            }
        }

        self.tick = self.tick.next();
        metrics.total_us = tick_start.elapsed().as_micros() as u64;

        if metrics.clamped() && !self.clamp_warned {
            warn!(
                "tick {}: velocity clamp engaged on {} components; simulation may be unstable",
                self.tick, metrics.velocity_clamps
            );
            self.clamp_warned = true;
        }
        if metrics.diverged() && !self.divergence_warned {
            warn!(
                "tick {}: {} cells entered collision with non-finite density",
                self.tick, metrics.non_finite_cells
            );
            self.divergence_warned = true;
        }
        trace!(
            "tick {} in {}us (collide {}us, stream {}us), {} bounces, {} conflicts",
            self.tick,
            metrics.total_us,
            metrics.collision_us,
            metrics.streaming_us,
            metrics.bounces,
            metrics.conflicts_resolved,
        );
        self.last_metrics = metrics;
    }

    /// Run `n` ticks.
    pub fn step_n(&mut self, n: u64) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Reset the grid to the initial configuration with a new seed.
    ///
    /// Returns the engine to tick 0 and [`EngineState::Uninitialized`].
    pub fn reset(&mut self, seed: u64) {
        self.config.seed = seed;
        self.state = build_state(&self.config.initial, &self.policy);
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self.tick = TickId::default();
        self.last_metrics = StepMetrics::default();
        self.clamp_warned = false;
        self.divergence_warned = false;
        debug!("lattice engine reset with seed {seed}");
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Density of cell `(x, y)`: the sum of its weights, never negative.
    ///
    /// # Errors
    ///
    /// [`QueryError::ModelMismatch`] on a particle-model engine,
    /// [`QueryError::CoordOutOfBounds`] outside the grid.
    pub fn read_density(&self, x: u32, y: u32) -> Result<f64, QueryError> {
        let field = self.state.field().ok_or(QueryError::ModelMismatch {
            expected: ModelKind::Field,
            actual: self.model(),
        })?;
        let index = self.cell_index(x, y)?;
        let density: f64 = field.cells()[index].iter().sum();
        Ok(density.max(0.0))
    }

    /// Occupied directions of cell `(x, y)`.
    ///
    /// Available on particle-model engines and on field-model engines
    /// carrying a tracer overlay.
    ///
    /// # Errors
    ///
    /// [`QueryError::ModelMismatch`] when there are no particles,
    /// [`QueryError::CoordOutOfBounds`] outside the grid.
    pub fn read_occupation(&self, x: u32, y: u32) -> Result<DirectionSet, QueryError> {
        let particles = self.state.particles().ok_or(QueryError::ModelMismatch {
            expected: ModelKind::Particle,
            actual: self.model(),
        })?;
        let index = self.cell_index(x, y)?;
        Ok(particles.cells()[index])
    }

    /// Whether `(x, y)` is a solid wall cell. `false` outside the grid.
    pub fn is_wall(&self, x: u32, y: u32) -> bool {
        self.policy.is_wall(x, y)
    }

    /// Densities of every cell in row-major order, for renderers.
    /// `None` on a particle-model engine.
    pub fn density_field(&self) -> Option<Vec<f64>> {
        self.state.field().map(|field| {
            field
                .cells()
                .iter()
                .map(|c| c.iter().sum::<f64>().max(0.0))
                .collect()
        })
    }

    /// Sum of every weight in the grid. `None` on a particle-model engine.
    pub fn total_mass(&self) -> Option<f64> {
        self.state.field().map(FieldLayer::total_mass)
    }

    /// Number of particles (tracers on a field-model engine).
    pub fn particle_count(&self) -> usize {
        self.state.particles().map_or(0, ParticleLayer::count)
    }

    /// FNV-1a hash of the tick and the full grid contents.
    ///
    /// Two engines built from the same configuration and seed report the
    /// same hash after the same number of steps.
    pub fn state_hash(&self) -> u64 {
        let mut hasher = StateHasher::new();
        hasher.u64(self.tick.0);
        if let Some(field) = self.state.field() {
            field.hash_into(&mut hasher);
        }
        if let Some(particles) = self.state.particles() {
            particles.hash_into(&mut hasher);
        }
        hasher.finish()
    }

    /// Current tick (0 after construction or reset).
    pub fn tick(&self) -> TickId {
        self.tick
    }

    /// Lifecycle state.
    pub fn state(&self) -> EngineState {
        if self.tick == TickId::default() {
            EngineState::Uninitialized
        } else {
            EngineState::Running
        }
    }

    /// Cell representation.
    pub fn model(&self) -> ModelKind {
        self.config.initial.model()
    }

    /// Grid width.
    pub fn width(&self) -> u32 {
        self.config.width
    }

    /// Grid height.
    pub fn height(&self) -> u32 {
        self.config.height
    }

    /// The boundary policy shared by streaming and resolution.
    pub fn policy(&self) -> &BoundaryPolicy {
        &self.policy
    }

    /// The wall, if one is configured.
    pub fn wall_map(&self) -> Option<&WallMap> {
        self.policy.wall()
    }

    /// The configuration this engine was built from, with the current seed.
    pub fn config(&self) -> &LatticeConfig {
        &self.config
    }

    /// The current resolver seed.
    pub fn seed(&self) -> u64 {
        self.config.seed
    }

    /// Metrics from the most recent tick.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    fn cell_index(&self, x: u32, y: u32) -> Result<usize, QueryError> {
        let coord = Coord::new(x, y);
        let lattice = self.policy.lattice();
        lattice
            .checked_index(coord)
            .ok_or(QueryError::CoordOutOfBounds {
                coord,
                width: lattice.width(),
                height: lattice.height(),
            })
    }
}

impl fmt::Debug for LatticeEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LatticeEngine")
            .field("tick", &self.tick)
            .field("model", &self.model())
            .field("width", &self.config.width)
            .field("height", &self.config.height)
            .field("seed", &self.config.seed)
            .finish()
    }
}

/// Build the tick-0 grid. The configuration must already be validated
/// against `policy`.
fn build_state(initial: &InitialState, policy: &BoundaryPolicy) -> CellState {
    let lattice = policy.lattice();
    match initial {
        InitialState::Field { densities, overlay } => {
            let cells: Vec<[f64; VELOCITY_COUNT]> =
                densities.iter().map(|&d| equilibrium(d, (0.0, 0.0))).collect();
            CellState::Field {
                weights: FieldLayer::new(cells),
                overlay: (!overlay.is_empty()).then(|| place_particles(overlay, lattice)),
            }
        }
        InitialState::Particles(particles) => {
            CellState::Particle(place_particles(particles, lattice))
        }
    }
}

fn place_particles(particles: &[Particle], lattice: &Lattice) -> ParticleLayer {
    let mut cells = vec![DirectionSet::EMPTY; lattice.cell_count()];
    for p in particles {
        cells[lattice.index(Coord::new(p.x, p.y))].insert(p.direction);
    }
    ParticleLayer::new(cells)
}
