//! Integration tests: propagation rule, invariants, and edge policies.
//!
//! Draws are forced through the mock sources in `smolder-test-utils` so
//! expected grids can be written out by hand.

use smolder_core::{Grid, SimError, StepId};
use smolder_engine::{
    simulate, simulate_seeded, simulate_with, ChaChaSource, EngineConfig, Execution,
    PropagationWorld, SimulationParams, SpreadRule,
};
use smolder_space::EdgeBehavior;
use smolder_test_utils::fixtures::{corner_ignition, gradient, single_ignition};
use smolder_test_utils::{init_test_logging, FixedSource, ScriptedSource};

fn run<R: smolder_engine::RandomSource>(
    grid: &Grid,
    wind: f64,
    steps: u64,
    config: EngineConfig,
    source: &R,
) -> Grid {
    simulate_with(
        grid,
        &SimulationParams::new(wind, steps).unwrap(),
        &config,
        source,
        None,
    )
    .unwrap()
    .grid
}

// ── Reference scenario ──────────────────────────────────────────

#[test]
fn corner_spreads_to_both_neighbours_when_draws_are_zero() {
    init_test_logging();
    let out = run(
        &corner_ignition(),
        1.0,
        1,
        EngineConfig::default(),
        &FixedSource::always(),
    );
    assert_eq!(out.to_rows(), vec![vec![1.0, 0.3], vec![0.3, 0.0]]);
}

#[test]
fn corner_scenario_second_step() {
    // Step 2: (0,1) and (1,0) see mean (1.0 + 0.0) / 2 = 0.5, p = 0.3 -> 0.6.
    // (1,1) sees mean 0.3, p = 0.18 -> 0.3. (0,0) saturates at 1.0.
    let out = run(
        &corner_ignition(),
        1.0,
        2,
        EngineConfig::default(),
        &FixedSource::always(),
    );
    let rows = out.to_rows();
    assert_eq!(rows[0][0], 1.0);
    assert!((rows[0][1] - 0.6).abs() < 1e-12);
    assert!((rows[1][0] - 0.6).abs() < 1e-12);
    assert!((rows[1][1] - 0.3).abs() < 1e-12);
}

#[test]
fn draw_at_probability_does_not_activate() {
    // (0,1) has p = 0.3 exactly; a draw equal to p must not activate.
    let p = SpreadRule::default().probability(0.5, 1.0);
    let source = ScriptedSource::new(vec![vec![0.0, p, 0.0, 0.0]]);
    let out = run(&corner_ignition(), 1.0, 1, EngineConfig::default(), &source);
    assert_eq!(out.get(0, 1), Some(0.0));
    assert_eq!(out.get(1, 0), Some(0.3));
}

// ── Invariants ──────────────────────────────────────────────────

#[test]
fn shape_preserved() {
    let g = gradient(5, 8);
    let out = simulate(&g, 2.0, 4).unwrap();
    assert_eq!(out.shape(), (5, 8));
}

#[test]
fn values_stay_in_unit_interval_under_strong_wind() {
    let g = gradient(6, 6);
    let out = run(&g, 50.0, 20, EngineConfig::default(), &FixedSource::always());
    assert!(out.as_slice().iter().all(|v| (0.0..=1.0).contains(v)));
    assert_eq!(out.max_value(), 1.0);
}

#[test]
fn zero_steps_returns_input() {
    let g = gradient(3, 4);
    assert_eq!(
        run(&g, 1.0, 0, EngineConfig::default(), &FixedSource::always()),
        g
    );
}

#[test]
fn cells_never_decrease_between_steps() {
    let mut world = PropagationWorld::new(
        gradient(7, 5),
        SimulationParams::new(1.3, 12).unwrap(),
        EngineConfig::default(),
        ChaChaSource::new(2024),
    )
    .unwrap();
    let mut prev = world.snapshot().clone();
    while world.remaining_steps() > 0 {
        let next = world.step_sync().unwrap().snapshot.clone();
        for (a, b) in prev.as_slice().iter().zip(next.as_slice()) {
            assert!(b >= a, "cell decreased from {a} to {b}");
        }
        prev = next;
    }
}

#[test]
fn zero_wind_freezes_grid() {
    let g = gradient(4, 4);
    let out = run(&g, 0.0, 10, EngineConfig::default(), &FixedSource::always());
    assert_eq!(out, g);
}

#[test]
fn all_zero_grid_never_ignites() {
    let g = Grid::filled(5, 5, 0.0).unwrap();
    let out = run(&g, 10.0, 10, EngineConfig::default(), &FixedSource::always());
    assert_eq!(out, g);
}

#[test]
fn saturated_grid_stays_saturated() {
    let g = Grid::filled(3, 3, 1.0).unwrap();
    assert_eq!(simulate_seeded(&g, 1.0, 5, 1).unwrap(), g);
}

#[test]
fn single_cell_grid_is_unchanged_with_absorbing_edges() {
    let g = Grid::from_rows(&[[0.4]]).unwrap();
    let out = run(&g, 5.0, 5, EngineConfig::default(), &FixedSource::always());
    assert_eq!(out, g);
}

#[test]
fn same_seed_same_grid() {
    let g = single_ignition(9, 9, 4, 4);
    let a = simulate_seeded(&g, 1.5, 10, 31337).unwrap();
    let b = simulate_seeded(&g, 1.5, 10, 31337).unwrap();
    assert_eq!(a, b);
}

#[test]
fn unseeded_runs_preserve_invariants() {
    let g = single_ignition(6, 6, 0, 0);
    for _ in 0..5 {
        let out = simulate(&g, 1.0, 3).unwrap();
        assert_eq!(out.get(0, 0), Some(1.0));
        assert!(out.as_slice().iter().all(|v| (0.0..=1.0).contains(v)));
    }
}

// ── Validation ──────────────────────────────────────────────────

#[test]
fn ragged_grid_rejected() {
    let err = Grid::from_rows(&[vec![0.1, 0.2], vec![0.3]]).unwrap_err();
    assert!(matches!(err, SimError::InvalidGridShape { .. }));
}

#[test]
fn empty_grids_rejected() {
    let none: [[f64; 0]; 0] = [];
    assert!(matches!(
        Grid::from_rows(&none).unwrap_err(),
        SimError::InvalidGridShape { .. }
    ));
    let empty_row: [[f64; 0]; 1] = [[]];
    assert!(matches!(
        Grid::from_rows(&empty_row).unwrap_err(),
        SimError::InvalidGridShape { .. }
    ));
}

#[test]
fn negative_wind_rejected() {
    let err = simulate(&corner_ignition(), -1.0, 3).unwrap_err();
    assert!(matches!(
        err,
        SimError::InvalidParameter {
            name: "wind_factor",
            ..
        }
    ));
}

#[test]
fn out_of_range_cell_rejected() {
    let err = Grid::from_rows(&[[0.0, 1.5]]).unwrap_err();
    assert_eq!(
        err,
        SimError::InvalidCellValue {
            row: 0,
            col: 1,
            value: 1.5
        }
    );
}

// ── Edge policies ───────────────────────────────────────────────

#[test]
fn absorbing_strip() {
    let g = Grid::from_rows(&[[1.0, 0.0, 0.0]]).unwrap();
    let out = run(&g, 1.0, 1, EngineConfig::default(), &FixedSource::always());
    assert_eq!(out.to_rows(), vec![vec![1.0, 0.3, 0.0]]);
}

#[test]
fn wrapping_strip_reaches_far_end() {
    let g = Grid::from_rows(&[[1.0, 0.0, 0.0]]).unwrap();
    let config = EngineConfig::default().with_edge(EdgeBehavior::Wrap);
    let out = run(&g, 1.0, 1, config, &FixedSource::always());
    assert_eq!(out.to_rows(), vec![vec![1.0, 0.3, 0.3]]);
}

#[test]
fn single_cell_grid_feeds_itself_when_wrapping() {
    let g = Grid::from_rows(&[[0.5]]).unwrap();
    for edge in [EdgeBehavior::Wrap, EdgeBehavior::Clamp] {
        let config = EngineConfig::default().with_edge(edge);
        let out = run(&g, 1.0, 1, config, &FixedSource::always());
        assert!((out.as_slice()[0] - 0.8).abs() < 1e-12, "{edge:?}");
    }
}

// ── Execution modes ─────────────────────────────────────────────

#[test]
fn parallel_execution_is_bit_identical() {
    let g = gradient(33, 47);
    for edge in [EdgeBehavior::Absorb, EdgeBehavior::Clamp, EdgeBehavior::Wrap] {
        let seq = EngineConfig::default().with_edge(edge);
        let par = seq.with_execution(Execution::Parallel);
        let source = ChaChaSource::new(5);
        assert_eq!(run(&g, 1.1, 9, seq, &source), run(&g, 1.1, 9, par, &source));
    }
}

#[test]
fn metrics_count_one_draw_per_cell() {
    let out = simulate_with(
        &gradient(4, 6),
        &SimulationParams::new(1.0, 3).unwrap(),
        &EngineConfig::default(),
        &ChaChaSource::new(0),
        None,
    )
    .unwrap();
    let steps: Vec<StepId> = out.report.steps.iter().map(|m| m.step).collect();
    assert_eq!(steps, vec![StepId(1), StepId(2), StepId(3)]);
    assert!(out.report.steps.iter().all(|m| m.draws == 24));
    let total: usize = out.report.steps.iter().map(|m| m.activations).sum();
    assert_eq!(out.report.activations, total as u64);
}

// ── Concurrency ─────────────────────────────────────────────────

fn assert_bit_identical(got: &Grid, want: &Grid) {
    assert_eq!(got.shape(), want.shape());
    for (i, (a, b)) in got.as_slice().iter().zip(want.as_slice()).enumerate() {
        assert_eq!(a.to_bits(), b.to_bits(), "cell {i}: {a} vs {b}");
    }
}

#[test]
fn concurrent_runs_match_isolated_runs() {
    let grids = [
        gradient(9, 11),
        single_ignition(12, 7, 3, 3),
        corner_ignition(),
        gradient(20, 20),
        gradient(9, 11),
    ];
    let params = SimulationParams::new(1.3, 8).unwrap();
    let shared = ChaChaSource::new(4242);
    let mode = |i: usize| {
        if i % 2 == 0 {
            Execution::Sequential
        } else {
            Execution::Parallel
        }
    };

    let alone_seeded: Vec<Grid> = grids
        .iter()
        .enumerate()
        .map(|(i, g)| simulate_seeded(g, 1.3, 8, i as u64).unwrap())
        .collect();
    let alone_shared: Vec<Grid> = grids
        .iter()
        .map(|g| run(g, 1.3, 8, EngineConfig::default(), &shared))
        .collect();

    let (seeded, with_shared): (Vec<Grid>, Vec<Grid>) = std::thread::scope(|s| {
        let seeded: Vec<_> = grids
            .iter()
            .enumerate()
            .map(|(i, g)| s.spawn(move || simulate_seeded(g, 1.3, 8, i as u64).unwrap()))
            .collect();
        let with_shared: Vec<_> = grids
            .iter()
            .enumerate()
            .map(|(i, g)| {
                let source = &shared;
                let config = EngineConfig::default().with_execution(mode(i));
                s.spawn(move || {
                    simulate_with(g, &params, &config, source, None)
                        .unwrap()
                        .grid
                })
            })
            .collect();
        (
            seeded.into_iter().map(|h| h.join().unwrap()).collect(),
            with_shared.into_iter().map(|h| h.join().unwrap()).collect(),
        )
    });

    for (got, want) in seeded.iter().zip(&alone_seeded) {
        assert_bit_identical(got, want);
    }
    for (got, want) in with_shared.iter().zip(&alone_shared) {
        assert_bit_identical(got, want);
    }
    // Same grid and shared source on two threads gives the same result.
    assert_bit_identical(&with_shared[0], &with_shared[4]);
}
