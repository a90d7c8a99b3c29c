//! A* shortest-path search over the grid graph.
//!
//! Edges cost 1 everywhere. The heuristic is the Manhattan distance with the
//! horizontal term reduced modulo the grid width when the grid has tunnel
//! rows, so it never overestimates a route that shortcuts through a tunnel
//! and the returned paths stay optimal.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::warn;

use crate::error::PathError;
use crate::grid::{Cell, Grid};

/// An ordered run of cells from just after the start up to and including the
/// goal. Empty means the start already is the goal.
pub type Path = Vec<Cell>;

/// Expansions allowed per query, as a multiple of the cell count. The closed
/// set caps real expansions at one per cell, so this can only trip if the
/// search state itself is corrupted.
const BUDGET_FACTOR: usize = 4;

/// Open-set entry. Ordered so the heap pops the node with the smallest
/// f-score; ties prefer the smaller h-score, then the most recently
/// discovered node. Fixed tie-break keeps repeated identical queries on
/// identical paths.
#[derive(Clone, Copy, PartialEq, Eq)]
struct OpenNode {
    f: usize,
    h: usize,
    seq: usize,
    cell: Cell,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn heuristic(grid: &Grid, from: Cell, goal: Cell) -> usize {
    let dx = from.x.abs_diff(goal.x);
    let dx = if grid.has_tunnels() {
        dx.min(grid.width() - dx)
    } else {
        dx
    };
    dx + from.y.abs_diff(goal.y)
}

/// Shortest path from `start` to `goal`.
///
/// Start or goal on a wall (or off the grid) is rejected up front as a
/// caller error, distinct from [`PathError::NotFound`] which reports a
/// genuinely unreachable goal. `start == goal` yields an empty path.
pub fn find_path(grid: &Grid, start: Cell, goal: Cell) -> Result<Path, PathError> {
    if !grid.is_walkable(start) {
        return Err(PathError::InvalidStart(start));
    }
    if !grid.is_walkable(goal) {
        return Err(PathError::InvalidGoal(goal));
    }
    if start == goal {
        return Ok(Path::new());
    }

    let budget = grid.width() * grid.height() * BUDGET_FACTOR;
    let mut open = BinaryHeap::new();
    let mut came_from: HashMap<Cell, Cell> = HashMap::new();
    let mut g_score: HashMap<Cell, usize> = HashMap::new();
    let mut closed: HashSet<Cell> = HashSet::new();
    let mut seq = 0usize;
    let mut expanded = 0usize;

    let h = heuristic(grid, start, goal);
    g_score.insert(start, 0);
    open.push(OpenNode {
        f: h,
        h,
        seq,
        cell: start,
    });

    while let Some(node) = open.pop() {
        if !closed.insert(node.cell) {
            continue;
        }
        if node.cell == goal {
            return Ok(reconstruct(&came_from, start, goal));
        }
        expanded += 1;
        if expanded > budget {
            warn!(expanded, %start, %goal, "pathfinding budget exhausted");
            return Err(PathError::BudgetExceeded(expanded));
        }

        let g = g_score[&node.cell];
        for next in grid.neighbors(node.cell) {
            if closed.contains(&next) {
                continue;
            }
            let tentative = g + 1;
            if g_score.get(&next).map_or(true, |&known| tentative < known) {
                came_from.insert(next, node.cell);
                g_score.insert(next, tentative);
                seq += 1;
                let h = heuristic(grid, next, goal);
                open.push(OpenNode {
                    f: tentative + h,
                    h,
                    seq,
                    cell: next,
                });
            }
        }
    }

    Err(PathError::NotFound)
}

fn reconstruct(came_from: &HashMap<Cell, Cell>, start: Cell, goal: Cell) -> Path {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        if prev == start {
            break;
        }
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}
