//! Particle-collision resolution.
//!
//! After streaming, every destination cell holds the list of particle
//! directions that arrived there this tick. A cell with a single arrival
//! keeps it unchanged. A cell with several arrivals, including two
//! arrivals carrying the same direction, is a conflict and the configured
//! [`CollisionRule`] assigns the outgoing directions.
//!
//! Every arrival produces exactly one outgoing direction, so resolution
//! never changes the particle count.

use std::fmt;

use eddy_core::{Direction, DirectionSet, VELOCITY_COUNT};
use rand_chacha::ChaCha8Rng;

/// How conflicting arrivals at one cell are redistributed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CollisionRule {
    /// Draw N distinct directions uniformly without replacement.
    #[default]
    Randomize,
    /// Reverse every arrival. Deterministic; consumes no randomness.
    Exclusion,
}

impl fmt::Display for CollisionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Randomize => write!(f, "randomize"),
            Self::Exclusion => write!(f, "exclusion"),
        }
    }
}

/// Resolve the arrivals at one cell into its occupation bits.
///
/// `arrivals` holds at most eight entries; the streaming pass guarantees
/// this because each arrival consumes a distinct incoming channel.
pub fn resolve(arrivals: &[Direction], rule: CollisionRule, rng: &mut ChaCha8Rng) -> DirectionSet {
    debug_assert!(arrivals.len() <= VELOCITY_COUNT, "{} arrivals", arrivals.len());
    match arrivals {
        [] => DirectionSet::EMPTY,
        [only] => DirectionSet::from_iter([*only]),
        _ => match rule {
            CollisionRule::Randomize => randomize(arrivals.len(), rng),
            CollisionRule::Exclusion => exclude(arrivals),
        },
    }
}

fn randomize(count: usize, rng: &mut ChaCha8Rng) -> DirectionSet {
    let count = count.min(VELOCITY_COUNT);
    rand::seq::index::sample(rng, VELOCITY_COUNT, count)
        .into_iter()
        .filter_map(Direction::new)
        .collect()
}

/// Reverse each arrival, the first one included. In the classic lattice-gas
/// automaton a collision turns back the particle already in the cell as
/// well as the newcomer; here both stay in the contested cell so the count
/// is kept. Arrivals carrying the same direction (left behind by a
/// lattice-gas wall reflection) reverse onto one slot; the later one
/// rotates clockwise to the next free slot.
fn exclude(arrivals: &[Direction]) -> DirectionSet {
    let mut out = DirectionSet::EMPTY;
    for &dir in arrivals {
        let mut slot = dir.opposite();
        for _ in 0..VELOCITY_COUNT {
            if out.insert(slot) {
                break;
            }
            slot = Direction::ALL[(slot.index() + 1) % VELOCITY_COUNT];
        }
    }
    out
}
