//! The streaming pass.
//!
//! Streaming reads the post-collision buffer and writes a fresh one; the
//! source is never mutated during the pass. Every value leaving a cell is
//! classified by the [`BoundaryPolicy`]:
//!
//! | Move      | Field model                     | Particle model                        |
//! |-----------|---------------------------------|---------------------------------------|
//! | `Stream`  | added to the destination slot   | queued as an arrival at the destination |
//! | `Bounce`  | added to `opposite(i)` in place | reflected in place by the rule        |
//! | `Exit`    | absorbed                        | re-enters with flipped axes           |
//!
//! Field writes accumulate, so a bounce-back and an arrival landing in the
//! same slot both survive.

use eddy_core::{Direction, DirectionSet, VELOCITY_COUNT};
use eddy_space::{BoundaryPolicy, Move};
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;

use crate::metrics::StepMetrics;
use crate::reflection::ReflectionRule;
use crate::resolver::{resolve, CollisionRule};

/// Particle directions queued at one destination cell.
pub type Arrivals = SmallVec<[Direction; VELOCITY_COUNT]>;

/// Stream field weights from `src` into `dst`.
///
/// `dst` is cleared first. Both slices hold one entry per lattice cell.
pub fn stream_field(
    src: &[[f64; VELOCITY_COUNT]],
    dst: &mut [[f64; VELOCITY_COUNT]],
    policy: &BoundaryPolicy,
    metrics: &mut StepMetrics,
) {
    debug_assert_eq!(src.len(), dst.len());
    let lattice = policy.lattice();
    dst.fill([0.0; VELOCITY_COUNT]);
    for (i, cell) in src.iter().enumerate() {
        let from = lattice.coord(i);
        for dir in Direction::ALL {
            let value = cell[dir.index()];
            if value == 0.0 {
                continue;
            }
            match policy.classify(from, dir) {
                Move::Stream(to) => dst[lattice.index(to)][dir.index()] += value,
                Move::Bounce => {
                    dst[i][dir.opposite().index()] += value;
                    metrics.bounces += 1;
                }
                Move::Exit { .. } => metrics.absorbed_mass += value,
            }
        }
    }
}

/// Move every particle in `src` one step and queue it at its landing cell.
///
/// `arrivals` is cleared first. Wall hits and edge re-entries that land on
/// a wall stay at the source with the direction chosen by `reflection`.
pub fn gather_particles(
    src: &[DirectionSet],
    arrivals: &mut [Arrivals],
    policy: &BoundaryPolicy,
    reflection: ReflectionRule,
    metrics: &mut StepMetrics,
) {
    debug_assert_eq!(src.len(), arrivals.len());
    let lattice = policy.lattice();
    arrivals.iter_mut().for_each(SmallVec::clear);
    for (i, cell) in src.iter().enumerate() {
        let from = lattice.coord(i);
        for dir in cell.iter() {
            match policy.classify(from, dir) {
                Move::Stream(to) => arrivals[lattice.index(to)].push(dir),
                Move::Bounce => {
                    arrivals[i].push(reflection.reflect(dir));
                    metrics.bounces += 1;
                }
                Move::Exit { flip_x, flip_y } => match policy.reenter(from, dir, flip_x, flip_y) {
                    Some((at, flipped)) => {
                        arrivals[lattice.index(at)].push(flipped);
                        metrics.edge_reentries += 1;
                    }
                    None => {
                        arrivals[i].push(reflection.reflect(dir));
                        metrics.bounces += 1;
                    }
                },
            }
        }
    }
}

/// Resolve queued arrivals into the occupation buffer `dst`.
///
/// Cells are visited in row-major order so the random draws made under
/// [`CollisionRule::Randomize`] are reproducible for a given seed.
pub fn resolve_arrivals(
    arrivals: &[Arrivals],
    dst: &mut [DirectionSet],
    rule: CollisionRule,
    rng: &mut ChaCha8Rng,
    metrics: &mut StepMetrics,
) {
    debug_assert_eq!(arrivals.len(), dst.len());
    for (slot, queued) in dst.iter_mut().zip(arrivals) {
        if queued.len() > 1 {
            metrics.conflicts_resolved += 1;
        }
        *slot = resolve(queued, rule, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eddy_core::Coord;
    use eddy_space::BoundaryMode;
    use rand::SeedableRng;

    fn policy(mode: BoundaryMode, wall: Option<(u32, std::ops::Range<u32>)>) -> BoundaryPolicy {
        BoundaryPolicy::build(10, 10, mode, wall).unwrap()
    }

    fn one_value(policy: &BoundaryPolicy, at: Coord, dir: Direction) -> Vec<[f64; VELOCITY_COUNT]> {
        let mut cells = vec![[0.0; VELOCITY_COUNT]; policy.lattice().cell_count()];
        cells[policy.lattice().index(at)][dir.index()] = 1.0;
        cells
    }

    fn step_particles(
        policy: &BoundaryPolicy,
        cells: &[DirectionSet],
        reflection: ReflectionRule,
    ) -> (Vec<DirectionSet>, StepMetrics) {
        let mut arrivals = vec![Arrivals::new(); cells.len()];
        let mut out = vec![DirectionSet::EMPTY; cells.len()];
        let mut metrics = StepMetrics::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        gather_particles(cells, &mut arrivals, policy, reflection, &mut metrics);
        resolve_arrivals(&arrivals, &mut out, CollisionRule::Exclusion, &mut rng, &mut metrics);
        (out, metrics)
    }

    #[test]
    fn field_value_moves_one_cell() {
        let p = policy(BoundaryMode::Periodic, None);
        let src = one_value(&p, Coord::new(4, 4), Direction::SE);
        let mut dst = vec![[9.0; VELOCITY_COUNT]; src.len()];
        let mut m = StepMetrics::default();
        stream_field(&src, &mut dst, &p, &mut m);
        assert_eq!(dst[p.lattice().index(Coord::new(5, 5))][Direction::SE.index()], 1.0);
        let total: f64 = dst.iter().flatten().sum();
        assert_eq!(total, 1.0);
    }

    #[test]
    fn field_bounce_lands_in_opposite_slot() {
        let p = policy(BoundaryMode::Periodic, Some((2, 3..6)));
        let src = one_value(&p, Coord::new(1, 0), Direction::E);
        let mut dst = vec![[0.0; VELOCITY_COUNT]; src.len()];
        let mut m = StepMetrics::default();
        stream_field(&src, &mut dst, &p, &mut m);
        assert_eq!(dst[p.lattice().index(Coord::new(1, 0))][Direction::W.index()], 1.0);
        assert_eq!(m.bounces, 1);
    }

    #[test]
    fn bounce_and_arrival_share_a_cell() {
        let p = policy(BoundaryMode::Periodic, Some((2, 3..6)));
        let at = p.lattice().index(Coord::new(1, 0));
        let mut src = vec![[0.0; VELOCITY_COUNT]; p.lattice().cell_count()];
        src[at][Direction::E.index()] = 0.25;
        src[p.lattice().index(Coord::new(1, 1))][Direction::N.index()] = 0.5;
        let mut dst = vec![[0.0; VELOCITY_COUNT]; src.len()];
        let mut m = StepMetrics::default();
        stream_field(&src, &mut dst, &p, &mut m);
        assert_eq!(dst[at][Direction::W.index()], 0.25);
        assert_eq!(dst[at][Direction::N.index()], 0.5);
    }

    #[test]
    fn field_reflective_edge_absorbs() {
        let p = policy(BoundaryMode::Reflective, None);
        let src = one_value(&p, Coord::new(9, 3), Direction::E);
        let mut dst = vec![[0.0; VELOCITY_COUNT]; src.len()];
        let mut m = StepMetrics::default();
        stream_field(&src, &mut dst, &p, &mut m);
        assert!(dst.iter().flatten().all(|&v| v == 0.0));
        assert_eq!(m.absorbed_mass, 1.0);
    }

    #[test]
    fn field_wall_column_beyond_edge_bounces_instead_of_absorbing() {
        let p = policy(BoundaryMode::Reflective, Some((2, 3..6)));
        for (at, dir) in [
            (Coord::new(1, 0), Direction::NE),
            (Coord::new(1, 9), Direction::SE),
        ] {
            let src = one_value(&p, at, dir);
            let mut dst = vec![[0.0; VELOCITY_COUNT]; src.len()];
            let mut m = StepMetrics::default();
            stream_field(&src, &mut dst, &p, &mut m);
            assert_eq!(dst[p.lattice().index(at)][dir.opposite().index()], 1.0);
            assert_eq!(m.bounces, 1);
            assert_eq!(m.absorbed_mass, 0.0);
        }
    }

    #[test]
    fn source_buffer_is_untouched() {
        let p = policy(BoundaryMode::Periodic, Some((2, 3..6)));
        let src = one_value(&p, Coord::new(1, 1), Direction::E);
        let copy = src.clone();
        let mut dst = vec![[0.0; VELOCITY_COUNT]; src.len()];
        stream_field(&src, &mut dst, &p, &mut StepMetrics::default());
        assert_eq!(src, copy);
    }

    #[test]
    fn particle_reenters_at_reflective_edge() {
        let p = policy(BoundaryMode::Reflective, None);
        let mut cells = vec![DirectionSet::EMPTY; p.lattice().cell_count()];
        cells[p.lattice().index(Coord::new(9, 4))] = DirectionSet::from_iter([Direction::NE]);
        let (out, m) = step_particles(&p, &cells, ReflectionRule::BounceBack);
        assert_eq!(
            out[p.lattice().index(Coord::new(9, 3))],
            DirectionSet::from_iter([Direction::NW])
        );
        assert_eq!(m.edge_reentries, 1);
    }

    #[test]
    fn particle_wall_hit_uses_reflection_rule() {
        let p = policy(BoundaryMode::Periodic, Some((2, 3..6)));
        let mut cells = vec![DirectionSet::EMPTY; p.lattice().cell_count()];
        let at = p.lattice().index(Coord::new(1, 0));
        cells[at] = DirectionSet::from_iter([Direction::SE]);
        let (bb, _) = step_particles(&p, &cells, ReflectionRule::BounceBack);
        assert_eq!(bb[at], DirectionSet::from_iter([Direction::NW]));
        let (lg, m) = step_particles(&p, &cells, ReflectionRule::LatticeGas);
        assert_eq!(lg[at], DirectionSet::from_iter([Direction::N]));
        assert_eq!(m.bounces, 1);
    }

    #[test]
    fn coinciding_directions_are_kept_apart() {
        let p = policy(BoundaryMode::Reflective, Some((2, 3..6)));
        let mut cells = vec![DirectionSet::EMPTY; p.lattice().cell_count()];
        // Bottom row, left of a solid wall cell. S re-enters in place as N;
        // SE heads for row 10 of the wall column, so it bounces and the
        // lattice-gas table also turns it to N.
        let at = p.lattice().index(Coord::new(1, 9));
        cells[at] = DirectionSet::from_iter([Direction::S, Direction::SE]);
        let (out, m) = step_particles(&p, &cells, ReflectionRule::LatticeGas);
        assert_eq!(out[at], DirectionSet::from_iter([Direction::S, Direction::SW]));
        assert_eq!(m.conflicts_resolved, 1);
        assert_eq!(m.bounces, 1);
        assert_eq!(m.edge_reentries, 1);
        let total: usize = out.iter().map(|c| c.len()).sum();
        assert_eq!(total, 2);
    }
}
