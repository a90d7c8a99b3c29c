//! Error types for level loading and pathfinding.

use thiserror::Error;

use crate::grid::Cell;

/// A maze blueprint that cannot be turned into a playable level.
///
/// Fatal at load time; the level never starts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BlueprintError {
    #[error("blueprint is empty")]
    Empty,
    #[error("blueprint row {row} is {found} cells wide, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("blueprint has no walkable cells")]
    NoFloor,
    #[error("unknown blueprint symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol { row: usize, col: usize, symbol: char },
    #[error("spawn cell {0} is not walkable")]
    SpawnBlocked(Cell),
}

/// A pathfinding query that produced no usable route.
///
/// `InvalidStart`/`InvalidGoal` are caller bugs and are rejected before any
/// search runs; `NotFound` is a topology fact (disconnected regions) that the
/// replanning layer recovers from. `BudgetExceeded` is the defensive
/// iteration cap; it is handled like `NotFound` but logged, since it should
/// never trip on a valid grid.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    #[error("start cell {0} is not walkable")]
    InvalidStart(Cell),
    #[error("goal cell {0} is not walkable")]
    InvalidGoal(Cell),
    #[error("no path to goal")]
    NotFound,
    #[error("search budget exhausted after {0} expansions")]
    BudgetExceeded(usize),
}
