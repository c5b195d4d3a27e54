use std::io::{self, Stdout, Write};

use anyhow::{anyhow, Context, Result};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::QueueableCommand;
use log::info;
use unicode_width::UnicodeWidthStr;
use walker_maze::{MazeCarver, MazeConfig, MazeSession, Pos, Selection, Snapshot};

const CELL_W: usize = 2;

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Wall,
    Open,
    Path,
    Endpoint,
}

fn main() -> Result<()> {
    env_logger::init();

    let config = MazeConfig::from_env()?;
    let carver = MazeCarver::generate(&config)?;
    let rounds = carver.rounds();
    let walkers = carver.walkers().len();
    let mut session = MazeSession::new(carver.into_grid());

    let from = read_pos("MAZE_FROM")?.unwrap_or(Pos::new(0, 0));
    let to = read_pos("MAZE_TO")?.unwrap_or(Pos::new(config.width - 1, config.height - 1));
    session.select(from)?;
    let steps = match session.select(to)? {
        Selection::Routed(path) => path.len(),
        Selection::Pending(_) => 0,
    };
    info!("path {} -> {}: {} steps", from, to, steps);

    let mut stdout = io::stdout();
    render(&mut stdout, &session.snapshot())?;
    stdout.queue(Print(format!(
        "{}x{}  walkers: {}  rounds: {}  path: {} steps\n",
        config.width, config.height, walkers, rounds, steps
    )))?;
    stdout.flush()?;
    Ok(())
}

fn read_pos(key: &str) -> Result<Option<Pos>> {
    let Ok(value) = std::env::var(key) else {
        return Ok(None);
    };
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| anyhow!("{} must look like x,y, got {:?}", key, value))?;
    let x = x.trim().parse().with_context(|| format!("bad x in {}", key))?;
    let y = y.trim().parse().with_context(|| format!("bad y in {}", key))?;
    Ok(Some(Pos::new(x, y)))
}

fn render(stdout: &mut Stdout, snap: &Snapshot<'_>) -> io::Result<()> {
    let endpoints = snap
        .path
        .map(|p| [Some(p.start()), Some(p.end())])
        .unwrap_or([snap.pending, None]);
    for (y, row) in snap.grid.rows().enumerate() {
        for (x, &open) in row.iter().enumerate() {
            let pos = Pos::new(x, y);
            let glyph = if endpoints.contains(&Some(pos)) {
                Glyph::Endpoint
            } else if snap.path.is_some_and(|p| p.contains(pos)) {
                Glyph::Path
            } else if open {
                Glyph::Open
            } else {
                Glyph::Wall
            };
            draw_cell(stdout, glyph)?;
        }
        stdout.queue(Print('\n'))?;
    }
    Ok(())
}

fn draw_cell(stdout: &mut Stdout, glyph: Glyph) -> io::Result<()> {
    let (text, color) = match glyph {
        Glyph::Wall => ("██", Color::Blue),
        Glyph::Open => ("  ", Color::Reset),
        Glyph::Path => ("··", Color::Yellow),
        Glyph::Endpoint => ("●", Color::Red),
    };
    stdout.queue(SetForegroundColor(color))?;
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
