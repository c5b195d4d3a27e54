use log::debug;

use crate::error::{MazeError, Result};
use crate::grid::{Grid, Pos};
use crate::path::Path;

/// What a pick did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// First cell of a pair; waiting for the second.
    Pending(Pos),
    /// Second cell picked; the path starts at the first pick.
    Routed(Path),
}

/// Read-only state handed to a renderer.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub grid: &'a Grid,
    pub pending: Option<Pos>,
    pub path: Option<&'a Path>,
}

/// A carved maze plus the user's picks on it.
#[derive(Debug, Clone)]
pub struct MazeSession {
    grid: Grid,
    pending: Option<Pos>,
    last_path: Option<Path>,
}

impl MazeSession {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            pending: None,
            last_path: None,
        }
    }

    /// Rejected picks leave the session untouched.
    pub fn select(&mut self, pos: Pos) -> Result<Selection> {
        if !self.grid.is_open(pos)? {
            return Err(MazeError::SelectionOnWall { x: pos.x, y: pos.y });
        }
        match self.pending.take() {
            None => {
                self.pending = Some(pos);
                self.last_path = None;
                Ok(Selection::Pending(pos))
            }
            Some(first) => {
                let path = match crate::compute_path(&self.grid, pos, first) {
                    Ok(path) => path,
                    Err(err) => {
                        self.pending = Some(first);
                        return Err(err);
                    }
                };
                debug!("routed {} -> {} in {} steps", first, pos, path.len());
                self.last_path = Some(path.clone());
                Ok(Selection::Routed(path))
            }
        }
    }

    pub fn clear(&mut self) {
        self.pending = None;
        self.last_path = None;
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn last_path(&self) -> Option<&Path> {
        self.last_path.as_ref()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: &self.grid,
            pending: self.pending,
            path: self.last_path.as_ref(),
        }
    }
}
