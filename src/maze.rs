//! The bundled level: blueprint symbols, the pellet layer and agent spawns.
//!
//! Blueprint symbols: `X` wall, `.` pellet, `o` power pellet, space open
//! floor, `G` ghost-pen floor (open, never holds a pellet).

use crate::error::BlueprintError;
use crate::ghost::GhostKind;
use crate::grid::{Cell, Grid};

pub const BLUEPRINT: [&str; 30] = [
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXX",
    "X............XX............X",
    "X.XXXX.XXXXX.XX.XXXXX.XXXX.X",
    "XoXXXX.XXXXX.XX.XXXXX.XXXXoX",
    "X.XXXX.XXXXX.XX.XXXXX.XXXX.X",
    "X..........................X",
    "X.XXXX.XX.XXXXXXXX.XX.XXXX.X",
    "X.XXXX.XX.XXXXXXXX.XX.XXXX.X",
    "X......XX....XX....XX......X",
    "XXXXXX.XXXXX XX XXXXX.XXXXXX",
    "     X.XXXXX XX XXXXX.X     ",
    "     X.XX          XX.X     ",
    "     X.XX XXX  XXX XX.X     ",
    "XXXXXX.XX XGGGGGGX XX.XXXXXX",
    "      .   XGGGGGGX   .      ",
    "XXXXXX.XX XXXXXXXX XX.XXXXXX",
    "     X.XX          XX.X     ",
    "     X.XX XXXXXXXX XX.X     ",
    "XXXXXX.XX XXXXXXXX XX.XXXXXX",
    "X............XX............X",
    "X.XXXX.XXXXX.XX.XXXXX.XXXX.X",
    "X.XXXX.XXXXX.XX.XXXXX.XXXX.X",
    "Xo..XX.......  .......XX..oX",
    "XXX.XX.XX.XX    XX.XX.XX.XXX",
    "XXX.XX.XX.XXXXXXXX.XX.XX.XXX",
    "X......XX....XX....XX......X",
    "X.XXXXXXXXXX.XX.XXXXXXXXXX.X",
    "X.XXXXXXXXXX.XX.XXXXXXXXXX.X",
    "X..........................X",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXX",
];

pub const PLAYER_SPAWN: Cell = Cell::new(13, 23);

/// Where eaten ghosts regrow, just above the pen.
pub const RESPAWN: Cell = Cell::new(13, 11);

/// Spawn cell and preferred scatter corner per ghost. Corners sitting on a
/// wall are snapped to the nearest walkable cell at load time.
const GHOST_HOMES: [(GhostKind, Cell, Cell); 4] = [
    (GhostKind::Blinky, Cell::new(13, 11), Cell::new(25, 1)),
    (GhostKind::Inky, Cell::new(14, 14), Cell::new(2, 1)),
    (GhostKind::Pinky, Cell::new(12, 14), Cell::new(1, 29)),
    (GhostKind::Clyde, Cell::new(15, 14), Cell::new(26, 29)),
];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Wall,
    Empty,
    Pellet,
    Power,
}

#[derive(Clone, Copy, Debug)]
pub struct GhostSeed {
    pub kind: GhostKind,
    pub spawn: Cell,
    pub corner: Cell,
}

/// Everything the game needs to start a stage, parsed once at load.
#[derive(Clone, Debug)]
pub struct Level {
    pub grid: Grid,
    pub tiles: Vec<Vec<Tile>>,
    pub pellets: usize,
    pub player_spawn: Cell,
    pub respawn: Cell,
    pub ghost_seeds: Vec<GhostSeed>,
}

pub fn load_level() -> Result<Level, BlueprintError> {
    parse_level(&BLUEPRINT)
}

pub fn parse_level(rows: &[&str]) -> Result<Level, BlueprintError> {
    let grid = Grid::from_blueprint(rows.iter().copied())?;

    let mut tiles = Vec::with_capacity(grid.height());
    let mut pellets = 0;
    for (y, row) in rows.iter().enumerate() {
        let mut line = Vec::with_capacity(grid.width());
        for (x, symbol) in row.chars().enumerate() {
            let tile = match symbol {
                'X' => Tile::Wall,
                '.' => {
                    pellets += 1;
                    Tile::Pellet
                }
                'o' => {
                    pellets += 1;
                    Tile::Power
                }
                ' ' | 'G' => Tile::Empty,
                symbol => {
                    return Err(BlueprintError::UnknownSymbol {
                        row: y,
                        col: x,
                        symbol,
                    })
                }
            };
            line.push(tile);
        }
        tiles.push(line);
    }

    for cell in [PLAYER_SPAWN, RESPAWN] {
        if !grid.is_walkable(cell) {
            return Err(BlueprintError::SpawnBlocked(cell));
        }
    }

    let mut ghost_seeds = Vec::with_capacity(GHOST_HOMES.len());
    for (kind, spawn, corner) in GHOST_HOMES {
        if !grid.is_walkable(spawn) {
            return Err(BlueprintError::SpawnBlocked(spawn));
        }
        let corner = grid.nearest_walkable(corner).ok_or(BlueprintError::NoFloor)?;
        ghost_seeds.push(GhostSeed {
            kind,
            spawn,
            corner,
        });
    }

    Ok(Level {
        grid,
        tiles,
        pellets,
        player_spawn: PLAYER_SPAWN,
        respawn: RESPAWN,
        ghost_seeds,
    })
}
