//! State machine transitions and target selection per mode.

use pacmaze::ghost::{Ghost, GhostKind, Mode, TargetContext};
use pacmaze::grid::{Cell, Grid};
use pacmaze::schedule::ModeSchedule;

fn open_grid() -> Grid {
    let rows = [
        "XXXXXXX",
        "X.....X",
        "X.....X",
        "X.....X",
        "X.....X",
        "X.....X",
        "XXXXXXX",
    ];
    Grid::from_blueprint(rows).unwrap()
}

fn short_schedule() -> ModeSchedule {
    ModeSchedule::new(vec![(Mode::Scatter, 3), (Mode::Chase, 5)]).unwrap()
}

fn blinky(schedule: &ModeSchedule) -> Ghost {
    Ghost::new(
        GhostKind::Blinky,
        Cell::new(1, 1),
        Cell::new(5, 1),
        Cell::new(3, 3),
        schedule,
    )
}

#[test]
fn schedule_rejects_malformed_phase_lists() {
    assert!(ModeSchedule::new(Vec::new()).is_none());
    assert!(ModeSchedule::new(vec![(Mode::Chase, 5)]).is_none());
    assert!(ModeSchedule::new(vec![(Mode::Scatter, 0)]).is_none());
    assert!(ModeSchedule::new(vec![(Mode::Scatter, 3), (Mode::Frightened, 2)]).is_none());
}

#[test]
fn mode_sequence_follows_the_schedule_exactly() {
    let schedule = short_schedule();
    let mut ghost = blinky(&schedule);
    let mut observed = Vec::new();
    for _ in 0..16 {
        ghost.tick_mode(&schedule);
        observed.push(ghost.mode);
    }
    use Mode::{Chase as C, Scatter as S};
    assert_eq!(
        observed,
        vec![S, S, S, C, C, C, C, C, S, S, S, C, C, C, C, C]
    );
}

#[test]
fn frightened_expiry_resumes_the_interrupted_phase() {
    let schedule = short_schedule();
    let mut ghost = blinky(&schedule);
    // Run into the Chase phase, then frighten mid-phase.
    for _ in 0..4 {
        ghost.tick_mode(&schedule);
    }
    assert_eq!(ghost.mode, Mode::Chase);
    ghost.frighten(6);
    for _ in 0..6 {
        ghost.tick_mode(&schedule);
        assert_eq!(ghost.mode, Mode::Frightened);
    }
    ghost.tick_mode(&schedule);
    assert_eq!(ghost.mode, Mode::Chase, "must resume Chase, not Scatter");
}

#[test]
fn refrighten_refreshes_the_timer_but_keeps_the_resume_phase() {
    let schedule = short_schedule();
    let mut ghost = blinky(&schedule);
    for _ in 0..4 {
        ghost.tick_mode(&schedule);
    }
    ghost.frighten(4);
    ghost.tick_mode(&schedule);
    ghost.frighten(4);
    for _ in 0..4 {
        ghost.tick_mode(&schedule);
        assert_eq!(ghost.mode, Mode::Frightened);
    }
    ghost.tick_mode(&schedule);
    assert_eq!(ghost.mode, Mode::Chase);
}

#[test]
fn devour_only_applies_while_frightened() {
    let schedule = short_schedule();
    let mut ghost = blinky(&schedule);
    ghost.devour();
    assert_eq!(ghost.mode, Mode::Scatter);

    ghost.frighten(10);
    ghost.devour();
    assert_eq!(ghost.mode, Mode::Eaten);
}

#[test]
fn frighten_is_ignored_while_eaten() {
    let schedule = short_schedule();
    let mut ghost = blinky(&schedule);
    ghost.frighten(10);
    ghost.devour();
    ghost.frighten(10);
    assert_eq!(ghost.mode, Mode::Eaten);
}

#[test]
fn eaten_leaves_only_through_the_respawn_cell() {
    let schedule = short_schedule();
    let mut ghost = blinky(&schedule);
    ghost.frighten(10);
    ghost.devour();

    for _ in 0..20 {
        ghost.tick_mode(&schedule);
        assert_eq!(ghost.mode, Mode::Eaten, "must wait for the respawn cell");
    }

    ghost.pos = ghost.respawn;
    ghost.tick_mode(&schedule);
    assert_eq!(ghost.mode, Mode::Scatter, "home arrival goes to Scatter, never Chase");
}

#[test]
fn targets_track_the_mode() {
    let grid = open_grid();
    let schedule = short_schedule();
    let mut ghost = blinky(&schedule);
    let ctx = TargetContext {
        grid: &grid,
        player: Cell::new(2, 4),
    };

    assert_eq!(ghost.select_target(&ctx), ghost.home_corner);

    ghost.mode = Mode::Chase;
    assert_eq!(ghost.select_target(&ctx), Cell::new(2, 4));

    ghost.mode = Mode::Eaten;
    assert_eq!(ghost.select_target(&ctx), ghost.respawn);
}

#[test]
fn frightened_target_is_deterministic_and_walkable() {
    let grid = open_grid();
    let schedule = short_schedule();
    let mut ghost = blinky(&schedule);
    ghost.mode = Mode::Frightened;
    let ctx = TargetContext {
        grid: &grid,
        player: Cell::new(1, 1),
    };

    let first = ghost.select_target(&ctx);
    let second = ghost.select_target(&ctx);
    assert_eq!(first, second);
    assert!(grid.is_walkable(first));
    // Mirror of (1,1) through the center of a 7x7 board.
    assert_eq!(first, Cell::new(5, 5));
}
