//! Diff-based crossterm renderer: only cells whose sprite changed since the
//! previous frame are redrawn, with a full repaint after resizes.

use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::game::Game;
use crate::ghost::{GhostKind, Mode};
use crate::grid::Cell;
use crate::maze::Tile;

pub const CELL_W: usize = 2;

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Player,
    Ghost(GhostKind),
    Frightened,
    Eyes,
    Wall,
    Empty,
    Pellet,
    Power,
    Goal,
}

#[derive(Clone, Copy, PartialEq)]
struct Sprite {
    glyph: Glyph,
    color: Color,
}

pub struct Renderer {
    last: Vec<Sprite>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
    width: usize,
    height: usize,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            last: vec![
                Sprite {
                    glyph: Glyph::Empty,
                    color: Color::Reset,
                };
                width * height
            ],
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
            width,
            height,
        }
    }

    /// Maps a terminal coordinate back to the board cell under it, if any.
    /// Used to translate mouse clicks into autopilot goals.
    pub fn cell_at(&self, column: u16, row: u16) -> Option<Cell> {
        let x = usize::from(column.checked_sub(self.origin_x)?) / CELL_W;
        let y = usize::from(row.checked_sub(self.origin_y)?);
        (x < self.width && y < self.height).then_some(Cell::new(x, y))
    }
}

pub fn render(stdout: &mut Stdout, game: &Game, renderer: &mut Renderer) -> io::Result<()> {
    let needed_h = (renderer.height + 2) as u16;
    let needed_w = (renderer.width * CELL_W) as u16;

    stdout.queue(MoveTo(0, 0))?;

    let (term_w, term_h) = terminal::size()?;
    if term_w < needed_w || term_h < needed_h {
        stdout.queue(Clear(ClearType::All))?;
        let msg = format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            needed_w, needed_h, term_w, term_h
        );
        stdout.queue(Print(msg))?;
        stdout.flush()?;
        renderer.needs_full = true;
        return Ok(());
    }

    let origin_x = (term_w - needed_w) / 2;
    let origin_y = (term_h - needed_h) / 2 + 1;
    if origin_x != renderer.origin_x || origin_y != renderer.origin_y {
        renderer.origin_x = origin_x;
        renderer.origin_y = origin_y;
        renderer.needs_full = true;
    }

    let auto = if game.pilot.auto { "  [AUTO]" } else { "" };
    let hud = format!(
        "Score: {}  Lives: {}  Level: {}  Pellets: {}  Fright: {}{}  (q quit / a auto / click to steer)",
        game.score,
        game.lives,
        game.stage,
        game.pellets_left,
        game.frightened_ticks(),
        auto
    );
    if renderer.needs_full || hud != renderer.last_hud {
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y - 1))?;
        stdout.queue(SetForegroundColor(Color::White))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;
        renderer.last_hud = hud;
    }

    for y in 0..renderer.height {
        for x in 0..renderer.width {
            let sprite = sprite_for(game, Cell::new(x, y));
            let idx = y * renderer.width + x;
            if renderer.needs_full || sprite != renderer.last[idx] {
                renderer.last[idx] = sprite;
                draw_cell(stdout, renderer, x, y, sprite)?;
            }
        }
    }
    renderer.needs_full = false;

    stdout.flush()?;
    Ok(())
}

fn sprite_for(game: &Game, pos: Cell) -> Sprite {
    if pos == game.player {
        return Sprite {
            glyph: Glyph::Player,
            color: Color::Yellow,
        };
    }
    for ghost in &game.ghosts {
        if ghost.pos != pos {
            continue;
        }
        return match ghost.mode {
            Mode::Frightened => Sprite {
                glyph: Glyph::Frightened,
                color: Color::Blue,
            },
            Mode::Eaten => Sprite {
                glyph: Glyph::Eyes,
                color: Color::White,
            },
            Mode::Scatter | Mode::Chase => Sprite {
                glyph: Glyph::Ghost(ghost.kind),
                color: ghost_color(ghost.kind),
            },
        };
    }
    if game.pilot.engaged && !game.pilot.auto && game.pilot.goal == Some(pos) {
        return Sprite {
            glyph: Glyph::Goal,
            color: Color::Green,
        };
    }
    match game.level.tiles[pos.y][pos.x] {
        Tile::Wall => Sprite {
            glyph: Glyph::Wall,
            color: Color::Blue,
        },
        Tile::Empty => Sprite {
            glyph: Glyph::Empty,
            color: Color::Reset,
        },
        Tile::Pellet => Sprite {
            glyph: Glyph::Pellet,
            color: Color::White,
        },
        Tile::Power => Sprite {
            glyph: Glyph::Power,
            color: Color::Magenta,
        },
    }
}

fn ghost_color(kind: GhostKind) -> Color {
    match kind {
        GhostKind::Blinky => Color::Red,
        GhostKind::Pinky => Color::Magenta,
        GhostKind::Inky => Color::Cyan,
        GhostKind::Clyde => Color::DarkYellow,
    }
}

fn draw_cell(
    stdout: &mut Stdout,
    renderer: &Renderer,
    x: usize,
    y: usize,
    sprite: Sprite,
) -> io::Result<()> {
    let text = match sprite.glyph {
        Glyph::Player => "😃",
        Glyph::Ghost(_) => "👻",
        Glyph::Frightened => "😱",
        Glyph::Eyes => "👀",
        Glyph::Wall => "██",
        Glyph::Empty => "  ",
        Glyph::Pellet => "· ",
        Glyph::Power => "● ",
        Glyph::Goal => "<>",
    };
    let x_pos = renderer.origin_x + (x * CELL_W) as u16;
    let y_pos = renderer.origin_y + y as u16;
    stdout.queue(MoveTo(x_pos, y_pos))?;
    stdout.queue(SetForegroundColor(sprite.color))?;
    stdout.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    if w < CELL_W {
        for _ in 0..(CELL_W - w) {
            stdout.queue(Print(' '))?;
        }
    }
    stdout.queue(ResetColor)?;
    Ok(())
}

pub fn render_game_over(stdout: &mut Stdout, game: &Game, renderer: &Renderer) -> io::Result<()> {
    let (term_w, term_h) = terminal::size()?;
    let needed_h = (renderer.height + 2) as u16;
    let needed_w = (renderer.width * CELL_W) as u16;
    if term_w < needed_w || term_h < needed_h {
        stdout.queue(MoveTo(0, needed_h))?;
    } else {
        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        stdout.queue(MoveTo(origin_x, origin_y + renderer.height as u16))?;
    }
    stdout.queue(Print(format!(
        "GAME OVER - Final Score: {} (press q to quit)",
        game.score
    )))?;
    stdout.flush()?;
    Ok(())
}
