use std::fmt;

use crate::error::{MazeError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    /// Neighbour lookup order used wherever ties have to be broken.
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }
}

/// Open/wall map of a maze. Cells at even x and even y are nodes, every other
/// cell is a link between two nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<bool>>,
}

impl Grid {
    /// Creates a grid with every cell closed except the seed at (0, 0).
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let too_large = width
            .checked_mul(height)
            .map_or(true, |cells| cells > isize::MAX as usize);
        if width % 2 == 0 || height % 2 == 0 || too_large {
            return Err(MazeError::InvalidDimension { width, height });
        }
        let mut cells = vec![vec![false; width]; height];
        cells[0][0] = true;
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn is_open(&self, pos: Pos) -> Result<bool> {
        self.check(pos)?;
        Ok(self.cells[pos.y][pos.x])
    }

    pub fn set_open(&mut self, pos: Pos) -> Result<()> {
        self.check(pos)?;
        self.cells[pos.y][pos.x] = true;
        Ok(())
    }

    pub fn is_node(pos: Pos) -> bool {
        pos.x % 2 == 0 && pos.y % 2 == 0
    }

    /// Cell `steps` cells away from `pos` in direction `dir`.
    pub fn offset(&self, pos: Pos, dir: Dir, steps: usize) -> Result<Pos> {
        self.check(pos)?;
        let (dx, dy) = dir.delta();
        let steps = isize::try_from(steps).unwrap_or(isize::MAX);
        let nx = (pos.x as isize).saturating_add(dx.saturating_mul(steps));
        let ny = (pos.y as isize).saturating_add(dy.saturating_mul(steps));
        if nx < 0 || ny < 0 || nx >= self.width as isize || ny >= self.height as isize {
            return Err(MazeError::OutOfBounds {
                x: nx,
                y: ny,
                width: self.width,
                height: self.height,
            });
        }
        Ok(Pos::new(nx as usize, ny as usize))
    }

    /// Orthogonal neighbour of `pos`, if it lies inside the grid.
    pub fn neighbor(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        self.offset(pos, dir, 1).ok()
    }

    pub fn nodes(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height)
            .step_by(2)
            .flat_map(move |y| (0..self.width).step_by(2).map(move |x| Pos::new(x, y)))
    }

    pub fn open_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, open)| **open)
                .map(move |(x, _)| Pos::new(x, y))
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.iter().map(|row| row.as_slice())
    }

    fn check(&self, pos: Pos) -> Result<()> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(MazeError::out_of_bounds(pos, self.width, self.height))
        }
    }
}
