//! Behavioural properties of the engine, exercised through the public API only.

use life_engine::patterns::{BEACON, BLINKER, BLOCK, PULSAR, TOAD};
use life_engine::{Engine, LifeError, Params};
use proptest::prelude::*;

// ============================================================================
// Helpers
// ============================================================================

fn seeded(rows: i64, columns: i64, seed: i64) -> Engine {
    Engine::from_params(&Params { rows, columns, seed }).expect("valid params")
}

fn live_cells(engine: &Engine) -> Vec<(usize, usize)> {
    engine.grid().iter_live().collect()
}

fn assert_same_cells(a: &Engine, b: &Engine) {
    for row in 0..a.row_count() as i64 {
        for column in 0..a.column_count() as i64 {
            assert_eq!(
                a.is_alive(row, column).unwrap(),
                b.is_alive(row, column).unwrap(),
                "cell ({row}, {column}) at generation {}",
                a.generation()
            );
        }
    }
}

// ============================================================================
// Determinism and generation counter
// ============================================================================

#[test]
fn same_seed_same_history_for_fifty_generations() {
    let mut a = seeded(16, 24, 12_345);
    let mut b = seeded(16, 24, 12_345);
    assert_same_cells(&a, &b);
    for _ in 0..50 {
        a.iterate();
        b.iterate();
        assert_same_cells(&a, &b);
    }
}

#[test]
fn different_seeds_differ() {
    let a = seeded(16, 24, 1);
    let b = seeded(16, 24, 2);
    assert_ne!(a.grid(), b.grid());
}

#[test]
fn generation_counts_iterations() {
    let mut engine = seeded(10, 10, 5);
    for k in 1..=25 {
        engine.iterate();
        assert_eq!(engine.generation(), k);
    }
}

// ============================================================================
// Transition rule
// ============================================================================

#[test]
fn exactly_three_neighbours_means_alive_next() {
    let neighbours = [(2, 2), (2, 3), (2, 4)];

    let mut dead_centre = Engine::with_live_cells(7, 7, &neighbours).unwrap();
    dead_centre.iterate();
    assert!(dead_centre.is_alive(3, 3).unwrap());

    let mut cells = neighbours.to_vec();
    cells.push((3, 3));
    let mut live_centre = Engine::with_live_cells(7, 7, &cells).unwrap();
    live_centre.iterate();
    assert!(live_centre.is_alive(3, 3).unwrap());
}

#[test]
fn live_cell_with_one_neighbour_dies() {
    let mut engine = Engine::with_live_cells(7, 7, &[(3, 3), (3, 4)]).unwrap();
    engine.iterate();
    assert!(!engine.is_alive(3, 3).unwrap());
}

#[test]
fn overcrowded_cell_dies() {
    let cells = [(3, 3), (2, 2), (2, 3), (2, 4), (3, 2)];
    let mut engine = Engine::with_live_cells(7, 7, &cells).unwrap();
    engine.iterate();
    assert!(!engine.is_alive(3, 3).unwrap());
}

// ============================================================================
// Toroidal wraparound
// ============================================================================

#[test]
fn corner_counts_opposite_corner() {
    // (0,0) has (5,5) and (0,1) as its only live neighbours: it survives
    // only if the diagonal wraps.
    let mut engine = Engine::with_live_cells(6, 6, &[(0, 0), (5, 5), (0, 1)]).unwrap();
    engine.iterate();
    assert!(engine.is_alive(0, 0).unwrap());
}

#[test]
fn birth_across_edges() {
    let mut engine = Engine::with_live_cells(6, 6, &[(5, 5), (5, 0), (0, 5)]).unwrap();
    engine.iterate();
    assert!(engine.is_alive(0, 0).unwrap());
}

// ============================================================================
// Still lifes and oscillators
// ============================================================================

#[test]
fn block_is_stable() {
    let mut engine = Engine::from_pattern(6, 6, &BLOCK, (2, 2)).unwrap();
    let expected = live_cells(&engine);
    for _ in 0..100 {
        engine.iterate();
        assert_eq!(live_cells(&engine), expected);
    }
}

#[test]
fn blinker_has_period_two() {
    let horizontal = vec![(2, 1), (2, 2), (2, 3)];
    let vertical = vec![(1, 2), (2, 2), (3, 2)];

    let mut engine = Engine::from_pattern(5, 5, &BLINKER, (2, 1)).unwrap();
    assert_eq!(live_cells(&engine), horizontal);
    for generation in 1..=10 {
        engine.iterate();
        let expected = if generation % 2 == 1 { &vertical } else { &horizontal };
        assert_eq!(&live_cells(&engine), expected, "generation {generation}");
    }
}

#[test]
fn classic_oscillators_return_to_start() {
    for (pattern, period, size) in [(&TOAD, 2, 8), (&BEACON, 2, 8), (&PULSAR, 3, 17)] {
        let mut engine = Engine::from_pattern(size, size, pattern, (2, 2)).unwrap();
        let start = engine.grid().clone();
        for _ in 0..period {
            engine.iterate();
        }
        assert_eq!(engine.grid(), &start, "{}", pattern.name);
    }
}

// ============================================================================
// Bounds and construction errors
// ============================================================================

#[test]
fn out_of_range_queries_fail() {
    for (rows, columns) in [(1, 1), (5, 5), (3, 8)] {
        let engine = seeded(rows, columns, 9);
        for (row, column) in [(rows, 0), (-1, 0), (0, columns), (0, -1)] {
            match engine.is_alive(row, column) {
                Err(LifeError::IndexOutOfRange { row: r, column: c, .. }) => {
                    assert_eq!((r, c), (row, column));
                }
                other => panic!("expected IndexOutOfRange, got {other:?}"),
            }
        }
    }
}

#[test]
fn sentinel_params_do_not_build() {
    let params = Params::parse("?rows=abc&columns=4&seed=1");
    assert_eq!(params.rows, Params::INVALID);
    assert!(matches!(
        Engine::from_params(&params),
        Err(LifeError::InvalidDimension { .. })
    ));

    let params = Params::parse("?rows=4&columns=4&seed=now");
    assert!(matches!(
        Engine::from_params(&params),
        Err(LifeError::InvalidSeed { seed: -1 })
    ));
}

#[test]
fn negative_seed_other_than_sentinel_builds() {
    let mut a = seeded(5, 5, -5);
    let mut b = Engine::from_params(&Params::parse("?rows=5&columns=5&seed=-5")).unwrap();
    assert_eq!(a.grid(), b.grid());
    for _ in 0..10 {
        a.iterate();
        b.iterate();
    }
    assert_eq!(a.grid(), b.grid());
}

#[test]
fn parsed_params_drive_construction() {
    let engine = Engine::from_params(&Params::parse("http://localhost/?rows=3&columns=7&seed=11"))
        .unwrap();
    assert_eq!((engine.row_count(), engine.column_count()), (3, 7));
    assert_eq!(engine.grid(), seeded(3, 7, 11).grid());
}

#[test]
fn snapshot_has_one_line_per_row() {
    let engine = seeded(4, 9, 3);
    let text = engine.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines.iter().all(|line| line.chars().count() == 9));
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    #[test]
    fn seeded_runs_are_reproducible(
        rows in 1i64..12,
        columns in 1i64..12,
        seed in 0i64..1_000_000,
        generations in 0usize..20,
    ) {
        let mut a = seeded(rows, columns, seed);
        let mut b = seeded(rows, columns, seed);
        for _ in 0..generations {
            a.iterate();
            b.iterate();
        }
        prop_assert_eq!(a.grid(), b.grid());
        prop_assert_eq!(a.generation(), generations as u64);
    }

    #[test]
    fn dimensions_never_change(
        rows in 1i64..10,
        columns in 1i64..10,
        seed in 0i64..1_000,
    ) {
        let mut engine = seeded(rows, columns, seed);
        for _ in 0..5 {
            engine.iterate();
            prop_assert_eq!(engine.row_count() as i64, rows);
            prop_assert_eq!(engine.column_count() as i64, columns);
        }
    }
}
