//! Decides when a cached route has gone stale and owns the fallback when the
//! pathfinder comes up empty.
//!
//! A route is recomputed when any of these hold:
//!
//! * no route is cached, or it was computed for a different target,
//! * periodic replanning is on and the interval has elapsed,
//! * the agent is no longer one step away from the route's next cell
//!   (deviation).
//!
//! On an unreachable target the agent is never left stuck or crashed: it
//! steps to a random walkable neighbor instead, or holds position when boxed
//! in. Discarding a cached route is the only form of cancellation; nothing
//! runs between ticks.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::error::PathError;
use crate::grid::{Cell, Grid};
use crate::pathfinding::find_path;

pub struct Replanner {
    path: VecDeque<Cell>,
    target: Option<Cell>,
    /// Re-query every `interval` ticks even while the route stays valid.
    pub periodic: bool,
    interval: u32,
    last_planned: u64,
}

impl Replanner {
    pub fn new(interval: u32) -> Self {
        Self {
            path: VecDeque::new(),
            target: None,
            periodic: false,
            interval,
            last_planned: 0,
        }
    }

    /// The target the cached route was computed for, if any.
    pub fn target(&self) -> Option<Cell> {
        self.target
    }

    /// Remaining steps of the cached route.
    pub fn remaining(&self) -> usize {
        self.path.len()
    }

    /// Drops the cached route and its target.
    pub fn invalidate(&mut self) {
        self.path.clear();
        self.target = None;
    }

    /// Whether a fresh pathfinding query is needed before the next step.
    pub fn should_replan(&self, grid: &Grid, pos: Cell, new_target: Cell, tick: u64) -> bool {
        if self.target != Some(new_target) {
            return true;
        }
        if pos == new_target {
            return false;
        }
        if self.periodic && tick.saturating_sub(self.last_planned) >= u64::from(self.interval) {
            return true;
        }
        match self.path.front() {
            None => true,
            Some(&next) => !grid.are_adjacent(pos, next),
        }
    }

    /// Runs the pathfinder and installs the fresh route. Returns false when
    /// no route was installed: an unreachable target clears the cache (the
    /// caller falls back to [`fallback_step`]), while an invalid request
    /// keeps the previous route untouched.
    pub fn replan(&mut self, grid: &Grid, pos: Cell, target: Cell, tick: u64) -> bool {
        self.last_planned = tick;
        match find_path(grid, pos, target) {
            Ok(path) => {
                self.path = path.into();
                self.target = Some(target);
                true
            }
            Err(err @ (PathError::InvalidStart(_) | PathError::InvalidGoal(_))) => {
                warn!(error = %err, "rejected pathfinding request");
                false
            }
            Err(PathError::NotFound) => {
                debug!(%pos, %target, "target unreachable, keeping agent loose");
                self.invalidate();
                false
            }
            // Already logged at the search site; recover like NotFound.
            Err(PathError::BudgetExceeded(_)) => {
                self.invalidate();
                false
            }
        }
    }

    /// Next cell of the cached route, consuming it.
    pub fn pop_step(&mut self) -> Option<Cell> {
        self.path.pop_front()
    }
}

/// Fallback move when no route exists: a uniformly random walkable neighbor,
/// or `None` to hold position when there is none. Seed the RNG to make runs
/// reproducible.
pub fn fallback_step(grid: &Grid, pos: Cell, rng: &mut impl Rng) -> Option<Cell> {
    grid.neighbors(pos).choose(rng).copied()
}
