use std::str::FromStr;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{MazeError, Result};

const DEFAULT_WIDTH: usize = 101;
const DEFAULT_HEIGHT: usize = 101;
const DEFAULT_WALKERS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeConfig {
    pub width: usize,
    pub height: usize,
    pub walker_count: usize,
    /// Fixed seed for reproducible mazes; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            walker_count: DEFAULT_WALKERS,
            seed: None,
        }
    }
}

impl MazeConfig {
    /// Reads `MAZE_WIDTH`, `MAZE_HEIGHT`, `MAZE_WALKERS` and `MAZE_SEED`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            width: read_setting(&lookup, "MAZE_WIDTH")?.unwrap_or(defaults.width),
            height: read_setting(&lookup, "MAZE_HEIGHT")?.unwrap_or(defaults.height),
            walker_count: read_setting(&lookup, "MAZE_WALKERS")?.unwrap_or(defaults.walker_count),
            seed: read_setting(&lookup, "MAZE_SEED")?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width % 2 == 0 || self.height % 2 == 0 {
            return Err(MazeError::InvalidDimension {
                width: self.width,
                height: self.height,
            });
        }
        if self.walker_count == 0 {
            return Err(MazeError::InvalidWalkerCount);
        }
        Ok(())
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn read_setting<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>> {
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| MazeError::InvalidSetting { key, value }),
    }
}
