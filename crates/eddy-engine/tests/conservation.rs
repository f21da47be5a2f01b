//! Particle and mass conservation across boundary modes and rules.

use eddy_core::{Direction, VELOCITY_COUNT};
use eddy_engine::limits::DENSITY_FLOOR;
use eddy_engine::metrics::StepMetrics;
use eddy_engine::streaming::stream_field;
use eddy_engine::{
    random_particles, CollisionRule, InitialState, LatticeConfig, LatticeEngine, Particle,
    ReflectionRule, WallConfig,
};
use eddy_space::{BoundaryMode, BoundaryPolicy};
use eddy_test_utils::fixtures::channel_field;
use eddy_test_utils::{assert_mass_conserved, assert_particles_conserved, closed_gas, rest_field};
use proptest::prelude::*;

const MODES: [BoundaryMode; 2] = [BoundaryMode::Periodic, BoundaryMode::Reflective];
const RULES: [CollisionRule; 2] = [CollisionRule::Randomize, CollisionRule::Exclusion];
const REFLECTIONS: [ReflectionRule; 2] = [ReflectionRule::BounceBack, ReflectionRule::LatticeGas];

#[test]
fn particle_count_is_conserved_for_every_combination() {
    for mode in MODES {
        for rule in RULES {
            for reflection in REFLECTIONS {
                let mut engine = LatticeEngine::new(closed_gas(3, mode, rule, reflection)).unwrap();
                assert_eq!(engine.particle_count(), 120);
                assert_particles_conserved(&mut engine, 200);
            }
        }
    }
}

#[test]
fn saturated_grid_with_edge_aperture_keeps_every_particle() {
    for mode in MODES {
        for rule in RULES {
            for reflection in REFLECTIONS {
                for aperture in [0..2, 2..4] {
                    let open = aperture.clone();
                    let particles: Vec<Particle> = (0..4u32)
                        .flat_map(|y| (0..5u32).map(move |x| (x, y)))
                        .filter(|&(x, y)| x != 2 || open.contains(&y))
                        .flat_map(|(x, y)| {
                            Direction::ALL.into_iter().map(move |d| Particle::new(x, y, d))
                        })
                        .collect();
                    let config = LatticeConfig {
                        width: 5,
                        height: 4,
                        wall: Some(WallConfig::new(2, aperture)),
                        boundary: mode,
                        tau: 0.6,
                        seed: 3,
                        collision: rule,
                        reflection,
                        initial: InitialState::Particles(particles),
                    };
                    let mut engine = LatticeEngine::new(config).unwrap();
                    assert_eq!(engine.particle_count(), 8 * 18);
                    assert_particles_conserved(&mut engine, 20);
                }
            }
        }
    }
}

#[test]
fn reference_gas_is_conserved() {
    let mut engine = LatticeEngine::new(LatticeConfig::reference_particles(9).unwrap()).unwrap();
    assert_particles_conserved(&mut engine, 50);
}

#[test]
fn tracer_overlay_is_conserved() {
    let mut engine = LatticeEngine::new(LatticeConfig::reference_overlay(9).unwrap()).unwrap();
    assert_eq!(engine.particle_count(), 500);
    assert_particles_conserved(&mut engine, 20);
}

#[test]
fn rest_field_conserves_mass_and_density() {
    let mut engine = LatticeEngine::new(rest_field(8, 6, 1.3)).unwrap();
    assert_mass_conserved(&mut engine, 100);
    for y in 0..6 {
        for x in 0..8 {
            assert!((engine.read_density(x, y).unwrap() - 1.3).abs() < 1e-12);
        }
    }
}

#[test]
fn empty_field_is_topped_up_to_the_floor_once() {
    let mut engine = LatticeEngine::new(rest_field(4, 1, 0.0)).unwrap();
    engine.step();
    let topped = DENSITY_FLOOR / 0.6;
    for x in 0..4 {
        assert!((engine.read_density(x, 0).unwrap() - topped).abs() < 1e-18);
    }
    assert_eq!(engine.last_metrics().density_floor_hits, 4);
    // Above the floor and at rest, the cells hold still.
    engine.step();
    assert!((engine.read_density(0, 0).unwrap() - topped).abs() < 1e-18);
    assert_eq!(engine.last_metrics().density_floor_hits, 0);
}

#[test]
fn channel_front_is_well_defined_for_first_ticks() {
    for mode in MODES {
        let mut engine = LatticeEngine::new(channel_field(mode)).unwrap();
        for _ in 0..3 {
            engine.step();
            let field = engine.density_field().unwrap();
            assert!(field.iter().all(|d| d.is_finite()));
        }
        // Fluid crossed the wall through the aperture.
        assert!(engine.read_density(5, 7).unwrap() > 0.0);
        assert!(engine.total_mass().unwrap().is_finite());
    }
}

#[test]
fn wall_cells_hold_only_floor_residue() {
    for mode in MODES {
        let mut engine = LatticeEngine::new(channel_field(mode)).unwrap();
        for _ in 0..6 {
            engine.step();
            for y in (0..6).chain(10..16) {
                assert!(engine.read_density(4, y).unwrap() < DENSITY_FLOOR);
            }
        }
    }
}

#[test]
fn divergent_front_is_reported_and_stepping_continues() {
    let mut engine = LatticeEngine::new(channel_field(BoundaryMode::Periodic)).unwrap();
    let mut diverged_at = None;
    for _ in 0..2000 {
        engine.step();
        if engine.last_metrics().diverged() {
            diverged_at = Some(engine.tick());
            break;
        }
    }
    assert!(diverged_at.is_some(), "sharp front never diverged");
    engine.step_n(5);
    for y in 0..16 {
        for x in 0..16 {
            assert!(engine.read_density(x, y).unwrap() >= 0.0);
        }
    }
}

fn arb_wall(w: u32, h: u32) -> impl Strategy<Value = Option<WallConfig>> {
    prop::option::of((1..w.max(2), 0..=h, 0..=h)).prop_map(move |wall| {
        wall.filter(|_| w > 1)
            .map(|(col, a, b)| WallConfig::new(col.min(w - 1), a.min(b)..a.max(b)))
    })
}

fn arb_gas() -> impl Strategy<Value = LatticeConfig> {
    (3u32..12, 3u32..12)
        .prop_flat_map(|(w, h)| {
            (
                Just((w, h)),
                arb_wall(w, h),
                prop::sample::select(MODES.to_vec()),
                prop::sample::select(RULES.to_vec()),
                prop::sample::select(REFLECTIONS.to_vec()),
                any::<u64>(),
                0usize..=h as usize,
            )
        })
        .prop_map(|((w, h), wall, boundary, collision, reflection, seed, count)| {
            // One column left of any wall, so nothing starts on a wall cell.
            let particles = random_particles(w, h, 1, count, seed).unwrap();
            LatticeConfig {
                width: w,
                height: h,
                wall,
                boundary,
                tau: 0.6,
                seed,
                collision,
                reflection,
                initial: InitialState::Particles(particles),
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_gases_conserve_particles(config in arb_gas()) {
        let mut engine = LatticeEngine::new(config).unwrap();
        let expected = engine.particle_count();
        for _ in 0..30 {
            engine.step();
            prop_assert_eq!(engine.particle_count(), expected);
        }
    }

    #[test]
    fn streaming_conserves_mass_on_periodic_grids(
        (w, h, weights) in (2u32..10, 2u32..10).prop_flat_map(|(w, h)| {
            let cells = (w * h) as usize;
            (Just(w), Just(h), prop::collection::vec(prop::array::uniform8(0.0f64..2.0), cells))
        }),
        column in 0u32..10,
    ) {
        let column = column % w;
        let policy =
            BoundaryPolicy::build(w, h, BoundaryMode::Periodic, Some((column, 0..h / 2))).unwrap();
        let mut src = weights;
        // Wall cells hold nothing.
        for (i, cell) in src.iter_mut().enumerate() {
            let c = policy.lattice().coord(i);
            if policy.is_wall(c.x, c.y) {
                *cell = [0.0; VELOCITY_COUNT];
            }
        }
        let before: f64 = src.iter().flatten().sum();
        let mut dst = vec![[0.0; VELOCITY_COUNT]; src.len()];
        let mut metrics = StepMetrics::default();
        stream_field(&src, &mut dst, &policy, &mut metrics);
        let after: f64 = dst.iter().flatten().sum();
        prop_assert!((after - before).abs() <= 1e-9 * src.len() as f64);
        prop_assert_eq!(metrics.absorbed_mass, 0.0);
    }
}
