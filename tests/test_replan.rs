//! Replanning triggers and the unreachable-target fallback.

use pacmaze::grid::{Cell, Grid};
use pacmaze::replan::{fallback_step, Replanner};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn corridor() -> Grid {
    let rows = [
        "XXXXXXX", //
        "X.....X", //
        "XXXXXXX",
    ];
    Grid::from_blueprint(rows).unwrap()
}

fn split_rooms() -> Grid {
    let rows = [
        "XXXXX", //
        "X.X.X", //
        "XXXXX",
    ];
    Grid::from_blueprint(rows).unwrap()
}

#[test]
fn replans_when_nothing_is_cached() {
    let grid = corridor();
    let nav = Replanner::new(5);
    assert!(nav.should_replan(&grid, Cell::new(1, 1), Cell::new(4, 1), 0));
}

#[test]
fn cached_route_is_followed_without_replanning() {
    let grid = corridor();
    let mut nav = Replanner::new(5);
    let target = Cell::new(4, 1);
    assert!(nav.replan(&grid, Cell::new(1, 1), target, 0));
    assert_eq!(nav.target(), Some(target));
    assert_eq!(nav.remaining(), 3);
    assert!(!nav.should_replan(&grid, Cell::new(1, 1), target, 1));

    let next = nav.pop_step().unwrap();
    assert_eq!(next, Cell::new(2, 1));
    assert!(!nav.should_replan(&grid, next, target, 2));
}

#[test]
fn target_change_forces_a_replan() {
    let grid = corridor();
    let mut nav = Replanner::new(5);
    assert!(nav.replan(&grid, Cell::new(1, 1), Cell::new(4, 1), 0));
    assert!(nav.should_replan(&grid, Cell::new(1, 1), Cell::new(3, 1), 1));
}

#[test]
fn deviation_from_the_route_forces_a_replan() {
    let grid = corridor();
    let mut nav = Replanner::new(5);
    let target = Cell::new(5, 1);
    assert!(nav.replan(&grid, Cell::new(1, 1), target, 0));
    // Expected next step is (2,1); a position two cells along is off-route.
    assert!(nav.should_replan(&grid, Cell::new(4, 1), target, 1));
}

#[test]
fn periodic_replanning_waits_for_the_interval() {
    let grid = corridor();
    let mut nav = Replanner::new(5);
    nav.periodic = true;
    let target = Cell::new(4, 1);
    assert!(nav.replan(&grid, Cell::new(1, 1), target, 0));
    let pos = nav.pop_step().unwrap();
    assert!(!nav.should_replan(&grid, pos, target, 3));
    assert!(nav.should_replan(&grid, pos, target, 5));
}

#[test]
fn arrival_needs_no_replan() {
    let grid = corridor();
    let mut nav = Replanner::new(5);
    let target = Cell::new(2, 1);
    assert!(nav.replan(&grid, Cell::new(1, 1), target, 0));
    let pos = nav.pop_step().unwrap();
    assert_eq!(pos, target);
    assert!(!nav.should_replan(&grid, pos, target, 1));
}

#[test]
fn unreachable_target_clears_the_cache() {
    let grid = split_rooms();
    let mut nav = Replanner::new(5);
    assert!(!nav.replan(&grid, Cell::new(1, 1), Cell::new(3, 1), 0));
    assert_eq!(nav.target(), None);
    assert_eq!(nav.remaining(), 0);
}

#[test]
fn invalid_goal_keeps_the_previous_route() {
    let grid = corridor();
    let mut nav = Replanner::new(5);
    assert!(nav.replan(&grid, Cell::new(1, 1), Cell::new(4, 1), 0));
    assert!(!nav.replan(&grid, Cell::new(1, 1), Cell::new(0, 0), 1));
    assert_eq!(nav.target(), Some(Cell::new(4, 1)));
    assert_eq!(nav.remaining(), 3);
}

#[test]
fn fallback_step_is_seed_reproducible_and_legal() {
    let grid = corridor();
    let pos = Cell::new(2, 1);

    let mut a = StdRng::seed_from_u64(7);
    let mut b = StdRng::seed_from_u64(7);
    let step_a = fallback_step(&grid, pos, &mut a);
    let step_b = fallback_step(&grid, pos, &mut b);
    assert_eq!(step_a, step_b);
    assert!(grid.neighbors(pos).contains(&step_a.unwrap()));
}

#[test]
fn fallback_step_holds_position_when_boxed_in() {
    let grid = Grid::from_blueprint(["XXX", "X.X", "XXX"]).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    assert_eq!(fallback_step(&grid, Cell::new(1, 1), &mut rng), None);
}
