//! Tick loop wiring: advances the player, the ghosts and the board state in
//! a fixed order so a run replays identically from the same inputs and seed.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::ghost::{Ghost, Mode, TargetContext};
use crate::grid::{Cell, Dir};
use crate::maze::{Level, Tile};
use crate::replan::{fallback_step, Replanner};
use crate::schedule::ModeSchedule;

pub const POWER_TICKS: u32 = 90;
pub const GHOST_MOVE_INTERVAL: u64 = 2;
pub const FRIGHTENED_MOVE_INTERVAL: u64 = 3;
/// Periodic autopilot replans, so a long route reacts to board changes.
pub const PILOT_REPLAN_INTERVAL: u32 = 12;
const PELLET_SCORE: u32 = 10;
const POWER_SCORE: u32 = 50;
const DEVOUR_SCORE: u32 = 200;
const START_LIVES: u32 = 3;

/// Self-steering state for the player: a clicked goal cell, or continuous
/// nearest-pellet hoovering when `auto` is on.
pub struct Autopilot {
    pub engaged: bool,
    pub auto: bool,
    pub goal: Option<Cell>,
    pub nav: Replanner,
}

impl Autopilot {
    fn new() -> Self {
        Self {
            engaged: false,
            auto: false,
            goal: None,
            nav: Replanner::new(PILOT_REPLAN_INTERVAL),
        }
    }

    pub fn disengage(&mut self) {
        self.engaged = false;
        self.auto = false;
        self.goal = None;
        self.nav.periodic = false;
        self.nav.invalidate();
    }
}

pub struct Game {
    pub level: Level,
    pub player: Cell,
    pub dir: Option<Dir>,
    pub ghosts: Vec<Ghost>,
    pub schedule: ModeSchedule,
    pub pilot: Autopilot,
    pub score: u32,
    pub lives: u32,
    pub stage: u32,
    pub pellets_left: usize,
    pub ticks: u64,
    template: Level,
    rng: StdRng,
}

impl Game {
    /// Pass a seed to make fallback moves (and thus whole runs) replayable.
    pub fn new(level: Level, seed: Option<u64>) -> Self {
        let schedule = ModeSchedule::standard();
        let ghosts = level
            .ghost_seeds
            .iter()
            .map(|seed| Ghost::new(seed.kind, seed.spawn, seed.corner, level.respawn, &schedule))
            .collect();
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            player: level.player_spawn,
            dir: None,
            ghosts,
            schedule,
            pilot: Autopilot::new(),
            score: 0,
            lives: START_LIVES,
            stage: 1,
            pellets_left: level.pellets,
            ticks: 0,
            template: level.clone(),
            level,
            rng,
        }
    }

    pub fn game_over(&self) -> bool {
        self.lives == 0
    }

    /// Longest remaining frightened spell across the pack, for the HUD.
    pub fn frightened_ticks(&self) -> u32 {
        self.ghosts
            .iter()
            .filter(|ghost| ghost.mode == Mode::Frightened)
            .map(|ghost| ghost.mode_timer)
            .max()
            .unwrap_or(0)
    }

    /// Route the player to a clicked cell. Clicks on walls are ignored and
    /// the current route (if any) is kept.
    pub fn click_goal(&mut self, cell: Cell) {
        if !self.level.grid.is_walkable(cell) {
            debug!(%cell, "ignoring click on a blocked cell");
            return;
        }
        self.pilot.auto = false;
        self.pilot.engaged = true;
        self.pilot.goal = Some(cell);
        self.pilot.nav.periodic = false;
        self.pilot.nav.invalidate();
        self.dir = None;
    }

    /// Toggle continuous nearest-pellet autopilot.
    pub fn toggle_auto(&mut self) {
        if self.pilot.auto {
            self.pilot.disengage();
        } else {
            self.pilot.engaged = true;
            self.pilot.auto = true;
            self.pilot.goal = None;
            self.pilot.nav.periodic = true;
            self.pilot.nav.invalidate();
            self.dir = None;
        }
    }

    /// One tick: player first, then ghosts in index order, then collisions.
    pub fn tick(&mut self, desired_dir: Option<Dir>, input_active: bool) {
        self.ticks = self.ticks.wrapping_add(1);
        self.apply_input(desired_dir, input_active);
        self.move_player();
        self.consume_tile();

        if self.pellets_left == 0 {
            self.next_stage();
            return;
        }

        self.update_ghosts();
        self.handle_collisions();
    }

    fn apply_input(&mut self, desired_dir: Option<Dir>, input_active: bool) {
        if let Some(dir) = desired_dir {
            // Manual steering always wins over the autopilot.
            if self.pilot.engaged {
                self.pilot.disengage();
            }
            if self.level.grid.step(self.player, dir).is_some() {
                self.dir = Some(dir);
            }
        } else if !input_active {
            self.dir = None;
        }
    }

    fn move_player(&mut self) {
        if self.pilot.engaged {
            self.autopilot_move();
            return;
        }
        if let Some(dir) = self.dir {
            match self.level.grid.step(self.player, dir) {
                Some(next) => self.player = next,
                None => self.dir = None,
            }
        }
    }

    fn autopilot_move(&mut self) {
        let Self {
            level,
            player,
            pilot,
            ticks,
            ..
        } = self;
        let grid = &level.grid;

        let target = if pilot.auto {
            nearest_pellet(&level.tiles, *player)
        } else {
            pilot.goal
        };
        let Some(target) = target else {
            pilot.disengage();
            return;
        };
        if *player == target {
            if !pilot.auto {
                pilot.disengage();
            }
            return;
        }
        if pilot.nav.should_replan(grid, *player, target, *ticks)
            && !pilot.nav.replan(grid, *player, target, *ticks)
        {
            pilot.disengage();
            return;
        }
        if let Some(next) = pilot.nav.pop_step() {
            *player = next;
        }
    }

    fn consume_tile(&mut self) {
        let Cell { x, y } = self.player;
        match self.level.tiles[y][x] {
            Tile::Pellet => {
                self.level.tiles[y][x] = Tile::Empty;
                self.score += PELLET_SCORE;
                self.pellets_left = self.pellets_left.saturating_sub(1);
            }
            Tile::Power => {
                self.level.tiles[y][x] = Tile::Empty;
                self.score += POWER_SCORE;
                self.pellets_left = self.pellets_left.saturating_sub(1);
                debug!("power pellet consumed");
                for ghost in &mut self.ghosts {
                    ghost.frighten(POWER_TICKS);
                }
            }
            _ => {}
        }
    }

    fn update_ghosts(&mut self) {
        let Self {
            level,
            ghosts,
            schedule,
            rng,
            ticks,
            player,
            ..
        } = self;
        let grid = &level.grid;
        let ctx = TargetContext {
            grid,
            player: *player,
        };

        for ghost in ghosts.iter_mut() {
            ghost.tick_mode(schedule);

            let interval = match ghost.mode {
                Mode::Frightened => FRIGHTENED_MOVE_INTERVAL,
                Mode::Eaten => 1,
                Mode::Scatter | Mode::Chase => GHOST_MOVE_INTERVAL,
            };
            if *ticks % interval != 0 {
                continue;
            }

            let target = ghost.select_target(&ctx);
            if ghost.nav.should_replan(grid, ghost.pos, target, *ticks)
                && !ghost.nav.replan(grid, ghost.pos, target, *ticks)
            {
                if let Some(next) = fallback_step(grid, ghost.pos, rng) {
                    ghost.pos = next;
                }
                continue;
            }
            if let Some(next) = ghost.nav.pop_step() {
                ghost.pos = next;
            }
        }
    }

    fn handle_collisions(&mut self) {
        let mut killed = false;
        for ghost in &mut self.ghosts {
            if ghost.pos != self.player {
                continue;
            }
            match ghost.mode {
                Mode::Frightened => {
                    ghost.devour();
                    self.score += DEVOUR_SCORE;
                }
                Mode::Eaten => {}
                Mode::Scatter | Mode::Chase => killed = true,
            }
        }
        if killed {
            self.lives = self.lives.saturating_sub(1);
            debug!(lives = self.lives, "player caught");
            if self.lives > 0 {
                self.reset_positions();
            }
        }
    }

    fn reset_positions(&mut self) {
        self.player = self.level.player_spawn;
        self.dir = None;
        self.pilot.disengage();
        for ghost in &mut self.ghosts {
            ghost.reset(&self.schedule);
        }
    }

    fn next_stage(&mut self) {
        self.stage += 1;
        self.level = self.template.clone();
        self.pellets_left = self.level.pellets;
        self.reset_positions();
    }
}

/// Closest remaining pellet by Manhattan distance; row-major tie-break keeps
/// the choice deterministic.
fn nearest_pellet(tiles: &[Vec<Tile>], from: Cell) -> Option<Cell> {
    let mut best: Option<(usize, Cell)> = None;
    for (y, row) in tiles.iter().enumerate() {
        for (x, &tile) in row.iter().enumerate() {
            if !matches!(tile, Tile::Pellet | Tile::Power) {
                continue;
            }
            let cell = Cell::new(x, y);
            let dist = cell.manhattan(from);
            if best.map_or(true, |(found, _)| dist < found) {
                best = Some((dist, cell));
            }
        }
    }
    best.map(|(_, cell)| cell)
}
