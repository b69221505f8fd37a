use std::collections::HashSet;

use life_engine::{Bounds, Coordinate, LifeEngine, LifeError, Outcome, Snapshot};

const BLINKER: [(i64, i64); 3] = [(0, 0), (1, 0), (2, 0)];

fn stepped_blinker(steps: u64) -> LifeEngine {
    let mut engine = LifeEngine::new(BLINKER, 16).expect("valid history limit");
    engine.step_n(steps);
    engine
}

#[test]
fn rejects_small_history_limits() {
    assert_eq!(
        LifeEngine::new(BLINKER, 1).unwrap_err(),
        LifeError::InvalidHistoryLimit { limit: 1 }
    );
    assert_eq!(
        LifeEngine::new(BLINKER, 0).unwrap_err().to_string(),
        "history limit must be greater than 1, got 0"
    );
}

#[test]
fn set_and_query_round_trip() {
    let mut engine = LifeEngine::empty();
    assert!(engine.set_alive(true, (3, -2)));
    assert!(engine.is_alive((3, -2)));
    assert!(engine.is_alive(Coordinate::new(3, -2)));
    assert!(engine.set_alive(false, (3, -2)));
    assert!(!engine.is_alive((3, -2)));
}

#[test]
fn set_alive_resets_simulation() {
    let mut engine = stepped_blinker(2);
    assert_eq!(engine.outcome(), Outcome::Cycled { period: 2 });

    assert!(engine.set_alive(true, (10, 10)));
    assert_eq!(engine.generation(), 0);
    assert_eq!(engine.outcome(), Outcome::Advanced);
    assert_eq!(engine.history_len(), 1);
}

#[test]
fn killing_a_dead_cell_changes_nothing() {
    let mut engine = stepped_blinker(3);
    let generation = engine.generation();
    let outcome = engine.outcome();
    let history_len = engine.history_len();

    assert!(!engine.set_alive(false, (50, 50)));
    assert_eq!(engine.generation(), generation);
    assert_eq!(engine.outcome(), outcome);
    assert_eq!(engine.history_len(), history_len);
}

#[test]
fn reviving_a_live_cell_changes_nothing() {
    let mut engine = stepped_blinker(2);
    assert!(!engine.set_alive(true, (1, 0)));
    assert_eq!(engine.generation(), 2);
    assert_eq!(engine.history_len(), 3);
}

#[test]
fn double_toggle_restores_board_and_resets_each_time() {
    let mut engine = stepped_blinker(1);
    let before: HashSet<Coordinate> = engine.live_cells().iter().copied().collect();

    assert!(engine.toggle((5, 5)));
    assert_eq!(engine.generation(), 0);
    engine.step();
    assert_eq!(engine.generation(), 1);

    // The blinker flipped back; (5, 5) died alone.
    assert!(!engine.is_alive((5, 5)));
    engine.toggle((5, 5));
    engine.toggle((5, 5));
    assert_eq!(engine.generation(), 0);
    assert_eq!(engine.history_len(), 1);

    let mut fresh = stepped_blinker(1);
    fresh.toggle((9, 9));
    assert!(!fresh.toggle((9, 9)));
    assert_eq!(fresh.generation(), 0);
    let after: HashSet<Coordinate> = fresh.live_cells().iter().copied().collect();
    assert_eq!(after, before);
}

#[test]
fn insert_resets_once_and_counts_new_cells() {
    let mut engine = stepped_blinker(2);
    let added = engine.insert([(1, 0), (20, 20), (21, 20)]);
    assert_eq!(added, 2);
    assert_eq!(engine.generation(), 0);
    assert_eq!(engine.history_len(), 1);
    assert_eq!(engine.population(), 5);

    engine.step();
    assert_eq!(engine.insert([(1, 0)]), 0);
    assert_eq!(engine.generation(), 1);
    assert_eq!(engine.insert(Vec::<Coordinate>::new()), 0);
    assert_eq!(engine.generation(), 1);
}

#[test]
fn remove_resets_only_when_something_died() {
    let mut engine = stepped_blinker(2);
    assert_eq!(engine.remove([(40, 40)]), 0);
    assert_eq!(engine.generation(), 2);

    assert_eq!(engine.remove([(0, 0), (40, 40)]), 1);
    assert_eq!(engine.generation(), 0);
    assert_eq!(engine.population(), 2);
}

#[test]
fn clear_is_noop_on_empty_board() {
    let mut engine = LifeEngine::empty();
    engine.step_n(3);
    assert_eq!(engine.outcome(), Outcome::Extinct);

    engine.clear();
    assert_eq!(engine.generation(), 3);
    assert_eq!(engine.outcome(), Outcome::Extinct);
}

#[test]
fn clear_resets_populated_board() {
    let mut engine = stepped_blinker(4);
    engine.clear();
    assert!(engine.is_empty());
    assert_eq!(engine.generation(), 0);
    assert_eq!(engine.outcome(), Outcome::Advanced);
    assert_eq!(engine.history_len(), 1);
}

#[test]
fn bounds_follow_live_cells() {
    let engine = LifeEngine::new([(-2, 3), (4, -1)], 8).unwrap();
    assert_eq!(
        engine.bounds(),
        Some(Bounds {
            min_x: -2,
            max_x: 4,
            min_y: -1,
            max_y: 3,
        })
    );
    let bounds = engine.bounds().unwrap();
    assert_eq!(bounds.width(), 7);
    assert_eq!(bounds.height(), 5);

    assert_eq!(LifeEngine::empty().bounds(), None);
}

#[test]
fn snapshots_ignore_insertion_order() {
    let coords = [(5, 5), (-1, 2), (0, 0), (3, -9), (2, 2), (-7, 2)];

    let mut forward = LifeEngine::empty();
    for c in coords {
        forward.set_alive(true, c);
    }
    let mut backward = LifeEngine::empty();
    backward.insert(coords.iter().rev().copied());

    assert_eq!(forward.snapshot(), backward.snapshot());
    let expected: Snapshot = coords.iter().copied().map(Coordinate::from).collect();
    assert_eq!(forward.snapshot(), expected);

    let mut seen = HashSet::new();
    seen.insert(forward.snapshot());
    assert!(seen.contains(&backward.snapshot()));
}

#[test]
fn for_each_live_visits_in_row_major_order() {
    let engine = LifeEngine::new([(3, 1), (0, 2), (-4, 1), (9, -3)], 4).unwrap();
    let mut visited = Vec::new();
    engine.for_each_live(|c| visited.push((c.x, c.y)));
    assert_eq!(visited, vec![(9, -3), (-4, 1), (3, 1), (0, 2)]);
}

#[test]
fn engines_are_independent_across_threads() {
    let handles: Vec<_> = (0..4i64)
        .map(|offset| {
            std::thread::spawn(move || {
                let mut engine =
                    LifeEngine::new(BLINKER.map(|(x, y)| (x + offset, y)), 8).unwrap();
                engine.step_n(2);
                (engine.outcome(), engine.generation())
            })
        })
        .collect();
    for handle in handles {
        let (outcome, generation) = handle.join().unwrap();
        assert_eq!(outcome, Outcome::Cycled { period: 2 });
        assert_eq!(generation, 2);
    }
}
