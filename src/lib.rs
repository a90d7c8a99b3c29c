//! A terminal Pac-Man variant built around a tile-grid A* pathfinder and a
//! four-mode ghost behavior model (scatter/chase/frightened/eaten).
//!
//! The library half holds everything deterministic and testable: the grid
//! model, the pathfinder, the ghost state machine with its target policies,
//! the replanning controller and the tick loop. The binary adds the
//! crossterm front end on top.

pub mod config;
pub mod error;
pub mod game;
pub mod ghost;
pub mod grid;
pub mod maze;
pub mod pathfinding;
pub mod render;
pub mod replan;
pub mod schedule;

pub use error::{BlueprintError, PathError};
pub use grid::{Cell, Dir, Grid};
pub use pathfinding::{find_path, Path};
