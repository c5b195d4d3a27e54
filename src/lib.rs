//! Perfect-maze generation with round-robin random walkers, and shortest paths
//! through the carved grid by breadth-first potential descent.

pub mod carver;
pub mod config;
pub mod error;
pub mod grid;
pub mod path;
pub mod potential;
pub mod session;

pub use carver::{MazeCarver, StepOutcome, Walker};
pub use config::MazeConfig;
pub use error::{MazeError, Result};
pub use grid::{Dir, Grid, Pos};
pub use path::{reconstruct_path, Path};
pub use potential::{Potential, PotentialField};
pub use session::{MazeSession, Selection, Snapshot};

/// Shortest path from `destination` back to `source`. Both cells must be open.
pub fn compute_path(grid: &Grid, source: Pos, destination: Pos) -> Result<Path> {
    for pos in [source, destination] {
        if !grid.is_open(pos)? {
            return Err(MazeError::SelectionOnWall { x: pos.x, y: pos.y });
        }
    }
    let field = PotentialField::toward(grid, source, destination)?;
    reconstruct_path(&field, destination)
}
