use std::collections::VecDeque;

use log::{debug, warn};

use crate::error::{MazeError, Result};
use crate::grid::{Dir, Grid, Pos};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Potential {
    Wall,
    Unvisited,
    Distance(u32),
}

impl Potential {
    pub fn distance(self) -> Option<u32> {
        match self {
            Potential::Distance(d) => Some(d),
            _ => None,
        }
    }
}

/// Step distance from a source cell to every open cell, moving orthogonally
/// through open cells only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotentialField {
    width: usize,
    height: usize,
    source: Pos,
    values: Vec<Vec<Potential>>,
}

impl PotentialField {
    /// Floods the whole grid from `source`.
    pub fn new(grid: &Grid, source: Pos) -> Result<Self> {
        Self::flood(grid, source, None)
    }

    /// Floods from `source` until `destination` holds a distance. Cells farther
    /// away than the destination may be left unvisited.
    pub fn toward(grid: &Grid, source: Pos, destination: Pos) -> Result<Self> {
        let field = Self::flood(grid, source, Some(destination))?;
        if field.distance(destination).is_none() {
            warn!("{} is not reachable from {}", destination, source);
            return Err(MazeError::NoPath {
                from: source,
                to: destination,
            });
        }
        Ok(field)
    }

    /// Builds a field from precomputed values, e.g. one restored for re-rendering.
    pub fn from_values(source: Pos, values: Vec<Vec<Potential>>) -> Result<Self> {
        let height = values.len();
        let width = values.first().map_or(0, |row| row.len());
        if width == 0 || values.iter().any(|row| row.len() != width) {
            return Err(MazeError::InvalidDimension { width, height });
        }
        let field = Self {
            width,
            height,
            source,
            values,
        };
        field.check(source)?;
        Ok(field)
    }

    fn flood(grid: &Grid, source: Pos, stop_at: Option<Pos>) -> Result<Self> {
        if !grid.is_open(source)? {
            return Err(MazeError::SelectionOnWall {
                x: source.x,
                y: source.y,
            });
        }
        if let Some(dest) = stop_at {
            if !grid.is_open(dest)? {
                return Err(MazeError::SelectionOnWall {
                    x: dest.x,
                    y: dest.y,
                });
            }
        }

        let mut values: Vec<Vec<Potential>> = grid
            .rows()
            .map(|row| {
                row.iter()
                    .map(|&open| if open { Potential::Unvisited } else { Potential::Wall })
                    .collect()
            })
            .collect();
        values[source.y][source.x] = Potential::Distance(0);

        let mut reached = 1usize;
        let mut q = VecDeque::new();
        if stop_at != Some(source) {
            q.push_back((source, 0u32));
        }
        'flood: while let Some((pos, base)) = q.pop_front() {
            for dir in Dir::ALL {
                let Some(next) = grid.neighbor(pos, dir) else {
                    continue;
                };
                if values[next.y][next.x] != Potential::Unvisited {
                    continue;
                }
                values[next.y][next.x] = Potential::Distance(base + 1);
                reached += 1;
                if stop_at == Some(next) {
                    break 'flood;
                }
                q.push_back((next, base + 1));
            }
        }
        debug!("potential field from {} reached {} cells", source, reached);

        Ok(Self {
            width: grid.width(),
            height: grid.height(),
            source,
            values,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn source(&self) -> Pos {
        self.source
    }

    pub fn get(&self, pos: Pos) -> Result<Potential> {
        self.check(pos)?;
        Ok(self.values[pos.y][pos.x])
    }

    pub fn distance(&self, pos: Pos) -> Option<u32> {
        self.get(pos).ok().and_then(Potential::distance)
    }

    /// Orthogonal neighbour of `pos` inside the field.
    pub fn neighbor(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        self.check(pos).ok()?;
        let (dx, dy) = dir.delta();
        let nx = pos.x as isize + dx;
        let ny = pos.y as isize + dy;
        if nx < 0 || ny < 0 || nx >= self.width as isize || ny >= self.height as isize {
            return None;
        }
        Some(Pos::new(nx as usize, ny as usize))
    }

    fn check(&self, pos: Pos) -> Result<()> {
        if pos.x < self.width && pos.y < self.height {
            Ok(())
        } else {
            Err(MazeError::out_of_bounds(pos, self.width, self.height))
        }
    }
}
