use std::io::{self, Stdout};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEventKind,
};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use tracing_subscriber::EnvFilter;

use pacmaze::config::Settings;
use pacmaze::game::Game;
use pacmaze::grid::Dir;
use pacmaze::maze;
use pacmaze::render::{render, render_game_over, Renderer};

const INPUT_HOLD_MS: u64 = 160;

fn main() -> io::Result<()> {
    // Logs go to stderr so a `2> pacmaze.log` redirect keeps the board clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let settings = Settings::from_env();
    let level =
        maze::load_level().map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, level, settings);

    stdout.execute(Show)?;
    stdout.execute(DisableMouseCapture)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(stdout: &mut Stdout, level: maze::Level, settings: Settings) -> io::Result<()> {
    let mut game = Game::new(level, settings.seed);
    let mut renderer = Renderer::new(game.level.grid.width(), game.level.grid.height());
    let mut last_tick = Instant::now();
    let mut last_seen: [Option<Instant>; 4] = [None, None, None, None];
    let mut last_pressed: Option<Dir> = None;
    let frame_time = Duration::from_micros(1_000_000 / settings.render_fps.max(1));

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Char('a') => game.toggle_auto(),
                        KeyCode::Char('k') | KeyCode::Up => {
                            last_seen[0] = Some(Instant::now());
                            last_pressed = Some(Dir::Up);
                        }
                        KeyCode::Char('j') | KeyCode::Down => {
                            last_seen[1] = Some(Instant::now());
                            last_pressed = Some(Dir::Down);
                        }
                        KeyCode::Char('h') | KeyCode::Left => {
                            last_seen[2] = Some(Instant::now());
                            last_pressed = Some(Dir::Left);
                        }
                        KeyCode::Char('l') | KeyCode::Right => {
                            last_seen[3] = Some(Instant::now());
                            last_pressed = Some(Dir::Right);
                        }
                        _ => {}
                    },
                    _ => {}
                },
                Event::Mouse(mouse) => {
                    if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                        if let Some(cell) = renderer.cell_at(mouse.column, mouse.row) {
                            game.click_goal(cell);
                        }
                    }
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= Duration::from_millis(settings.tick_ms) {
            last_tick = Instant::now();
            let desired_dir = active_dir_recent(&last_seen, last_pressed);
            let input_active = desired_dir.is_some();
            game.tick(desired_dir, input_active);
            render(stdout, &game, &mut renderer)?;
            if game.game_over() {
                render_game_over(stdout, &game, &renderer)?;
                return wait_for_quit();
            }
        } else {
            render(stdout, &game, &mut renderer)?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn wait_for_quit() -> io::Result<()> {
    loop {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && key.code == KeyCode::Char('q') {
                    return Ok(());
                }
            }
        }
    }
}

fn active_dir_recent(last_seen: &[Option<Instant>; 4], last_pressed: Option<Dir>) -> Option<Dir> {
    let now = Instant::now();
    if let Some(dir) = last_pressed {
        if let Some(t) = last_seen[idx_for_dir(dir)] {
            if now.duration_since(t) <= Duration::from_millis(INPUT_HOLD_MS) {
                return Some(dir);
            }
        }
    }
    let mut best: Option<(Dir, Instant)> = None;
    for (idx, dir) in Dir::ALL.iter().enumerate() {
        if let Some(t) = last_seen[idx] {
            if now.duration_since(t) <= Duration::from_millis(INPUT_HOLD_MS) {
                match best {
                    None => best = Some((*dir, t)),
                    Some((_, bt)) if t > bt => best = Some((*dir, t)),
                    _ => {}
                }
            }
        }
    }
    best.map(|(dir, _)| dir)
}

fn idx_for_dir(dir: Dir) -> usize {
    match dir {
        Dir::Up => 0,
        Dir::Down => 1,
        Dir::Left => 2,
        Dir::Right => 3,
    }
}
