//! Ghost behavior: the four-mode state machine and per-mode target
//! selection.
//!
//! Mode transitions:
//!
//! * Scatter and Chase alternate on the shared [`ModeSchedule`]; the timer
//!   resets to the next phase's duration on each flip.
//! * A power pellet forces Scatter/Chase into Frightened and remembers the
//!   interrupted phase; the timer expiring with no collision resumes exactly
//!   that phase (a ghost frightened out of Chase goes back to Chase).
//! * A collision while Frightened turns the ghost into Eaten (eyes heading
//!   home). Eaten ignores further power pellets and leaves the state only by
//!   reaching the respawn cell, where it rejoins the schedule at its first
//!   Scatter phase. There is no Eaten -> Chase shortcut.
//!
//! Target selection never mutates the ghost; it maps the current mode and a
//! world snapshot to a goal cell for the pathfinder.

use tracing::debug;

use crate::grid::{Cell, Grid};
use crate::replan::Replanner;
use crate::schedule::ModeSchedule;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    Scatter,
    Chase,
    Frightened,
    Eaten,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GhostKind {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl GhostKind {
    pub const ALL: [GhostKind; 4] = [
        GhostKind::Blinky,
        GhostKind::Pinky,
        GhostKind::Inky,
        GhostKind::Clyde,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GhostKind::Blinky => "Blinky",
            GhostKind::Pinky => "Pinky",
            GhostKind::Inky => "Inky",
            GhostKind::Clyde => "Clyde",
        }
    }
}

/// Read-only world snapshot handed to target selection.
pub struct TargetContext<'a> {
    pub grid: &'a Grid,
    pub player: Cell,
}

pub struct Ghost {
    pub kind: GhostKind,
    pub pos: Cell,
    pub mode: Mode,
    /// Ticks remaining in the current phase (or frightened spell).
    pub mode_timer: u32,
    pub home_corner: Cell,
    pub respawn: Cell,
    /// Cached route and the replanning bookkeeping that guards it.
    pub nav: Replanner,
    spawn: Cell,
    phase_index: usize,
    resume_phase: usize,
    resume_timer: u32,
}

impl Ghost {
    pub fn new(
        kind: GhostKind,
        spawn: Cell,
        home_corner: Cell,
        respawn: Cell,
        schedule: &ModeSchedule,
    ) -> Self {
        let (mode, ticks) = schedule.phase(0);
        Self {
            kind,
            pos: spawn,
            mode,
            mode_timer: ticks,
            home_corner,
            respawn,
            nav: Replanner::new(0),
            spawn,
            phase_index: 0,
            resume_phase: 0,
            resume_timer: 0,
        }
    }

    /// Back to the spawn cell and the top of the schedule. Used on life loss
    /// and level change.
    pub fn reset(&mut self, schedule: &ModeSchedule) {
        self.pos = self.spawn;
        self.enter_phase(schedule, 0);
        self.nav.invalidate();
    }

    /// Power pellet consumed. Ignored while Eaten; a re-trigger while
    /// already Frightened refreshes the timer but keeps the originally
    /// interrupted phase.
    pub fn frighten(&mut self, duration: u32) {
        match self.mode {
            Mode::Eaten => {}
            Mode::Frightened => self.mode_timer = duration,
            Mode::Scatter | Mode::Chase => {
                self.resume_phase = self.phase_index;
                self.resume_timer = self.mode_timer;
                self.mode = Mode::Frightened;
                self.mode_timer = duration;
                self.nav.invalidate();
            }
        }
    }

    /// Collision with the player while Frightened. No effect in any other
    /// mode.
    pub fn devour(&mut self) {
        if self.mode == Mode::Frightened {
            debug!(ghost = self.kind.name(), "devoured, heading home");
            self.mode = Mode::Eaten;
            self.mode_timer = 0;
            self.nav.invalidate();
        }
    }

    /// One tick of the state machine. Called once per game tick, before
    /// target selection and movement.
    pub fn tick_mode(&mut self, schedule: &ModeSchedule) {
        match self.mode {
            Mode::Scatter | Mode::Chase => {
                if self.mode_timer == 0 {
                    self.enter_phase(schedule, schedule.next_index(self.phase_index));
                }
                self.mode_timer = self.mode_timer.saturating_sub(1);
            }
            Mode::Frightened => {
                if self.mode_timer == 0 {
                    self.phase_index = self.resume_phase;
                    let (mode, _) = schedule.phase(self.phase_index);
                    self.mode = mode;
                    self.mode_timer = self.resume_timer;
                } else {
                    self.mode_timer -= 1;
                }
            }
            Mode::Eaten => {
                if self.pos == self.respawn {
                    debug!(ghost = self.kind.name(), "respawned");
                    self.enter_phase(schedule, 0);
                }
            }
        }
    }

    fn enter_phase(&mut self, schedule: &ModeSchedule, index: usize) {
        self.phase_index = index;
        let (mode, ticks) = schedule.phase(index);
        self.mode = mode;
        self.mode_timer = ticks;
    }

    /// Goal cell for the current mode. Chase targets the player's tile
    /// directly; Frightened flees toward the player's mirror image through
    /// the board center, snapped to the nearest walkable cell. Pure: state
    /// changes are the state machine's job, never this function's.
    pub fn select_target(&self, ctx: &TargetContext) -> Cell {
        match self.mode {
            Mode::Scatter => self.home_corner,
            Mode::Chase => ctx.player,
            Mode::Frightened => flee_target(ctx.grid, ctx.player),
            Mode::Eaten => self.respawn,
        }
    }
}

/// Mirror of the player's position through the grid center, snapped to the
/// nearest walkable cell. Deterministic by construction so frightened
/// behavior replays identically from the same inputs.
fn flee_target(grid: &Grid, player: Cell) -> Cell {
    let mirrored = Cell::new(grid.width() - 1 - player.x, grid.height() - 1 - player.y);
    grid.nearest_walkable(mirrored).unwrap_or(player)
}
