use thiserror::Error;

use crate::grid::Pos;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("grid dimensions must be positive odd integers, got {width}x{height}")]
    InvalidDimension { width: usize, height: usize },

    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: isize,
        y: isize,
        width: usize,
        height: usize,
    },

    #[error("cell ({x}, {y}) is a wall")]
    SelectionOnWall { x: usize, y: usize },

    #[error("no path from {from} to {to}")]
    NoPath { from: Pos, to: Pos },

    #[error("potential field is inconsistent at ({x}, {y}): no neighbour holds {expected}")]
    ReconstructionInconsistency { x: usize, y: usize, expected: u32 },

    #[error("cell ({x}, {y}) is not a node")]
    NotANode { x: usize, y: usize },

    #[error("walker count must be at least 1")]
    InvalidWalkerCount,

    #[error("invalid value {value:?} for {key}")]
    InvalidSetting { key: &'static str, value: String },
}

impl MazeError {
    /// Coordinates past `isize::MAX` are reported as `isize::MAX`.
    pub fn out_of_bounds(pos: Pos, width: usize, height: usize) -> Self {
        MazeError::OutOfBounds {
            x: isize::try_from(pos.x).unwrap_or(isize::MAX),
            y: isize::try_from(pos.y).unwrap_or(isize::MAX),
            width,
            height,
        }
    }
}

pub type Result<T> = std::result::Result<T, MazeError>;
