use log::warn;

use crate::error::{MazeError, Result};
use crate::grid::{Dir, Pos};
use crate::potential::{Potential, PotentialField};

/// Cells from a destination back to the field's source, one orthogonal step apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    cells: Vec<Pos>,
}

impl Path {
    pub fn cells(&self) -> &[Pos] {
        &self.cells
    }

    /// Number of steps, one less than the number of cells.
    pub fn len(&self) -> usize {
        self.cells.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn start(&self) -> Pos {
        self.cells[0]
    }

    pub fn end(&self) -> Pos {
        self.cells[self.cells.len() - 1]
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.cells.contains(&pos)
    }
}

/// Walks down the potential from `destination` to the source, taking the
/// first neighbour in up, down, left, right order that holds the next lower value.
pub fn reconstruct_path(field: &PotentialField, destination: Pos) -> Result<Path> {
    let start = match field.get(destination)? {
        Potential::Distance(d) => d,
        Potential::Wall => {
            return Err(MazeError::SelectionOnWall {
                x: destination.x,
                y: destination.y,
            })
        }
        Potential::Unvisited => {
            return Err(MazeError::NoPath {
                from: field.source(),
                to: destination,
            })
        }
    };

    // A shortest path visits each cell at most once.
    let cell_count = field.width().saturating_mul(field.height());
    if usize::try_from(start).map_or(true, |steps| steps >= cell_count) {
        warn!("potential {} at {} exceeds the field size", start, destination);
        return Err(MazeError::ReconstructionInconsistency {
            x: destination.x,
            y: destination.y,
            expected: start,
        });
    }

    let mut cells = vec![destination];
    let mut pos = destination;
    let mut remaining = start;
    while remaining > 0 {
        remaining -= 1;
        let next = Dir::ALL
            .into_iter()
            .filter_map(|dir| field.neighbor(pos, dir))
            .find(|n| field.distance(*n) == Some(remaining));
        match next {
            Some(n) => {
                pos = n;
                cells.push(n);
            }
            None => {
                warn!("no neighbour of {} holds potential {}", pos, remaining);
                return Err(MazeError::ReconstructionInconsistency {
                    x: pos.x,
                    y: pos.y,
                    expected: remaining,
                });
            }
        }
    }
    if pos != field.source() {
        warn!("descent ended at {} instead of {}", pos, field.source());
        return Err(MazeError::ReconstructionInconsistency {
            x: pos.x,
            y: pos.y,
            expected: 0,
        });
    }

    Ok(Path { cells })
}
