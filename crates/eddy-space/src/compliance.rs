//! Boundary policy compliance test helpers.
//!
//! These functions verify the invariants streaming relies on for any
//! combination of lattice size, edge mode and wall placement. Reused by
//! the policy test module for every configuration it builds.

use crate::boundary::BoundaryMode;
use crate::policy::{BoundaryPolicy, Move};
use eddy_core::Direction;

/// Assert that every `Stream` destination is in the grid and not a wall.
pub fn assert_streams_land_on_open_cells(policy: &BoundaryPolicy) {
    let lattice = policy.lattice();
    for from in lattice.coords() {
        for dir in Direction::ALL {
            if let Move::Stream(to) = policy.classify(from, dir) {
                assert!(
                    lattice.checked_index(to).is_some(),
                    "{from} --{dir}--> {to} left the grid"
                );
                assert!(
                    !policy.is_wall(to.x, to.y),
                    "{from} --{dir}--> {to} entered a wall cell"
                );
            }
        }
    }
}

/// Assert that a periodic lattice never reports an edge exit.
pub fn assert_periodic_never_exits(policy: &BoundaryPolicy) {
    if policy.lattice().boundary() != BoundaryMode::Periodic {
        return;
    }
    for from in policy.lattice().coords() {
        for dir in Direction::ALL {
            assert!(
                !matches!(policy.classify(from, dir), Move::Exit { .. }),
                "periodic lattice reported an exit at {from} along {dir}"
            );
        }
    }
}

/// Assert that streaming is reversible: `a --d--> b` implies `b --opp(d)--> a`
/// whenever `a` is an open cell.
pub fn assert_streaming_reversible(policy: &BoundaryPolicy) {
    for from in policy.lattice().coords() {
        if policy.is_wall(from.x, from.y) {
            continue;
        }
        for dir in Direction::ALL {
            if let Move::Stream(to) = policy.classify(from, dir) {
                assert_eq!(
                    policy.classify(to, dir.opposite()),
                    Move::Stream(from),
                    "stream {from} --{dir}--> {to} has no reverse"
                );
            }
        }
    }
}

/// Assert that a re-entering particle lands in the grid on an open cell,
/// still moving away from the edge it hit.
pub fn assert_reentry_lands_inside(policy: &BoundaryPolicy) {
    let lattice = policy.lattice();
    for from in lattice.coords() {
        if policy.is_wall(from.x, from.y) {
            continue;
        }
        for dir in Direction::ALL {
            if let Move::Exit { flip_x, flip_y } = policy.classify(from, dir) {
                if let Some((at, new_dir)) = policy.reenter(from, dir, flip_x, flip_y) {
                    assert!(lattice.checked_index(at).is_some());
                    assert!(!policy.is_wall(at.x, at.y));
                    let (dx, dy) = dir.offset();
                    let (nx, ny) = new_dir.offset();
                    if flip_x {
                        assert_eq!(nx, -dx);
                    }
                    if flip_y {
                        assert_eq!(ny, -dy);
                    }
                }
            }
        }
    }
}

/// Run all compliance checks on a policy.
pub fn run_full_compliance(policy: &BoundaryPolicy) {
    assert_streams_land_on_open_cells(policy);
    assert_periodic_never_exits(policy);
    assert_streaming_reversible(policy);
    assert_reentry_lands_inside(policy);
}
