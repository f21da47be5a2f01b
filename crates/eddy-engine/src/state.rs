//! Grid storage for the two cell representations.
//!
//! Each layer owns two buffers of identical shape. A tick reads the front
//! buffer, writes the back buffer, then swaps them; nothing is reallocated
//! after construction.

use std::fmt;

use eddy_core::{Direction, DirectionSet, VELOCITY_COUNT};
use eddy_space::BoundaryPolicy;
use rand_chacha::ChaCha8Rng;

use crate::collision;
use crate::hash::StateHasher;
use crate::metrics::StepMetrics;
use crate::reflection::ReflectionRule;
use crate::resolver::CollisionRule;
use crate::streaming::{self, Arrivals};

/// One particle: a cell and a direction of travel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Particle {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
    /// Direction of travel.
    pub direction: Direction,
}

impl Particle {
    /// Create a particle.
    pub const fn new(x: u32, y: u32, direction: Direction) -> Self {
        Self { x, y, direction }
    }
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}", self.x, self.y, self.direction)
    }
}

// ── FieldLayer ──────────────────────────────────────────────────

/// Eight distribution weights per cell.
#[derive(Clone, Debug)]
pub(crate) struct FieldLayer {
    front: Vec<[f64; VELOCITY_COUNT]>,
    back: Vec<[f64; VELOCITY_COUNT]>,
}

impl FieldLayer {
    pub(crate) fn new(cells: Vec<[f64; VELOCITY_COUNT]>) -> Self {
        let back = vec![[0.0; VELOCITY_COUNT]; cells.len()];
        Self { front: cells, back }
    }

    pub(crate) fn cells(&self) -> &[[f64; VELOCITY_COUNT]] {
        &self.front
    }

    pub(crate) fn collide(&mut self, tau: f64, metrics: &mut StepMetrics) {
        collision::collide(&mut self.front, tau, metrics);
    }

    pub(crate) fn stream(&mut self, policy: &BoundaryPolicy, metrics: &mut StepMetrics) {
        streaming::stream_field(&self.front, &mut self.back, policy, metrics);
        std::mem::swap(&mut self.front, &mut self.back);
    }

    pub(crate) fn total_mass(&self) -> f64 {
        self.front.iter().flatten().sum()
    }

    pub(crate) fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.weights(&self.front);
    }
}

// ── ParticleLayer ───────────────────────────────────────────────

/// Eight occupation bits per cell, plus the per-cell arrival queues used
/// while streaming.
#[derive(Clone, Debug)]
pub(crate) struct ParticleLayer {
    front: Vec<DirectionSet>,
    back: Vec<DirectionSet>,
    arrivals: Vec<Arrivals>,
}

impl ParticleLayer {
    pub(crate) fn new(cells: Vec<DirectionSet>) -> Self {
        let len = cells.len();
        Self {
            front: cells,
            back: vec![DirectionSet::EMPTY; len],
            arrivals: vec![Arrivals::new(); len],
        }
    }

    pub(crate) fn cells(&self) -> &[DirectionSet] {
        &self.front
    }

    pub(crate) fn stream(
        &mut self,
        policy: &BoundaryPolicy,
        reflection: ReflectionRule,
        rule: CollisionRule,
        rng: &mut ChaCha8Rng,
        metrics: &mut StepMetrics,
    ) {
        streaming::gather_particles(&self.front, &mut self.arrivals, policy, reflection, metrics);
        streaming::resolve_arrivals(&self.arrivals, &mut self.back, rule, rng, metrics);
        std::mem::swap(&mut self.front, &mut self.back);
    }

    pub(crate) fn count(&self) -> usize {
        self.front.iter().map(|c| c.len()).sum()
    }

    pub(crate) fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.occupations(&self.front);
    }
}

// ── CellState ───────────────────────────────────────────────────

/// The engine's grid, tagged by cell representation.
#[derive(Clone, Debug)]
pub(crate) enum CellState {
    /// Distribution weights, with optional tracer particles streamed
    /// alongside them.
    Field {
        weights: FieldLayer,
        overlay: Option<ParticleLayer>,
    },
    /// Occupation bits only.
    Particle(ParticleLayer),
}

impl CellState {
    pub(crate) fn particles(&self) -> Option<&ParticleLayer> {
        match self {
            Self::Field { overlay, .. } => overlay.as_ref(),
            Self::Particle(layer) => Some(layer),
        }
    }

    pub(crate) fn field(&self) -> Option<&FieldLayer> {
        match self {
            Self::Field { weights, .. } => Some(weights),
            Self::Particle(_) => None,
        }
    }
}
