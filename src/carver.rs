use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::MazeConfig;
use crate::error::{MazeError, Result};
use crate::grid::{Dir, Grid, Pos};

// Order the candidate moves are listed in before the random pick.
const CARVE_ORDER: [Dir; 4] = [Dir::Left, Dir::Right, Dir::Up, Dir::Down];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// First arrival at `node`: the node and the link behind it were opened.
    Carved { node: Pos, link: Pos },
    /// The target node was already open; only the walker moved.
    Moved(Pos),
    /// No legal move (single-node grid).
    Idle,
}

/// A carving agent. Holds nothing but its own position; the grid is lent to it
/// for each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walker {
    pos: Pos,
}

impl Walker {
    /// Places a walker on a node cell, normally the seed.
    pub fn new(pos: Pos) -> Result<Self> {
        if !Grid::is_node(pos) {
            return Err(MazeError::NotANode { x: pos.x, y: pos.y });
        }
        Ok(Self { pos })
    }

    pub fn position(&self) -> Pos {
        self.pos
    }

    pub fn legal_moves(&self, grid: &Grid) -> Vec<Dir> {
        CARVE_ORDER
            .into_iter()
            .filter(|dir| grid.offset(self.pos, *dir, 2).is_ok())
            .collect()
    }

    pub fn step(&mut self, grid: &mut Grid, rng: &mut impl Rng) -> Result<StepOutcome> {
        let moves = self.legal_moves(grid);
        match moves.choose(rng) {
            Some(&dir) => self.step_in(grid, dir),
            None => Ok(StepOutcome::Idle),
        }
    }

    /// Moves two cells in `dir`, opening the target node and the link between
    /// only if the node was still closed.
    pub fn step_in(&mut self, grid: &mut Grid, dir: Dir) -> Result<StepOutcome> {
        let node = grid.offset(self.pos, dir, 2)?;
        let link = grid.offset(self.pos, dir, 1)?;
        self.pos = node;
        if grid.is_open(node)? {
            return Ok(StepOutcome::Moved(node));
        }
        grid.set_open(node)?;
        grid.set_open(link)?;
        Ok(StepOutcome::Carved { node, link })
    }
}

/// Round-robin driver for a set of walkers sharing one grid.
#[derive(Debug, Clone)]
pub struct MazeCarver {
    grid: Grid,
    walkers: Vec<Walker>,
    closed_nodes: usize,
    rounds: usize,
}

impl MazeCarver {
    pub fn new(grid: Grid, walker_count: usize) -> Result<Self> {
        if walker_count == 0 {
            return Err(MazeError::InvalidWalkerCount);
        }
        let mut closed_nodes = 0;
        for node in grid.nodes() {
            if !grid.is_open(node)? {
                closed_nodes += 1;
            }
        }
        let seed = Walker::new(Pos::new(0, 0))?;
        Ok(Self {
            grid,
            walkers: vec![seed; walker_count],
            closed_nodes,
            rounds: 0,
        })
    }

    /// Carves a complete maze as described by `config`.
    pub fn generate(config: &MazeConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = config.rng();
        let mut carver = Self::new(Grid::new(config.width, config.height)?, config.walker_count)?;
        carver.run(&mut rng)?;
        Ok(carver)
    }

    /// One step for every walker, in order. Returns whether the maze is complete.
    pub fn round(&mut self, rng: &mut impl Rng) -> Result<bool> {
        let mut carved = 0;
        for walker in &mut self.walkers {
            if let StepOutcome::Carved { .. } = walker.step(&mut self.grid, rng)? {
                carved += 1;
            }
        }
        self.closed_nodes -= carved;
        self.rounds += 1;
        trace!(
            "round {}: carved {} nodes, {} left",
            self.rounds,
            carved,
            self.closed_nodes
        );
        Ok(self.is_valid())
    }

    pub fn run(&mut self, rng: &mut impl Rng) -> Result<usize> {
        while !self.is_valid() {
            self.round(rng)?;
        }
        debug!(
            "carved {}x{} maze with {} walkers in {} rounds",
            self.grid.width(),
            self.grid.height(),
            self.walkers.len(),
            self.rounds
        );
        Ok(self.rounds)
    }

    pub fn is_valid(&self) -> bool {
        self.closed_nodes == 0
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn walkers(&self) -> &[Walker] {
        &self.walkers
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn all_nodes_open(grid: &Grid) -> bool {
        grid.nodes().all(|p| grid.is_open(p).unwrap())
    }

    #[test]
    fn carving_terminates_with_every_node_open() {
        for (w, h) in [(3, 3), (5, 7), (21, 11), (1, 9), (9, 1)] {
            for walkers in [1, 3, 20] {
                for seed in 0..4 {
                    let mut rng = StdRng::seed_from_u64(seed);
                    let mut carver = MazeCarver::new(Grid::new(w, h).unwrap(), walkers).unwrap();
                    carver.run(&mut rng).unwrap();
                    assert!(carver.is_valid());
                    assert!(all_nodes_open(carver.grid()), "{w}x{h} walkers={walkers}");
                }
            }
        }
    }

    #[test]
    fn carved_maze_has_one_link_less_than_nodes() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut carver = MazeCarver::new(Grid::new(15, 9).unwrap(), 5).unwrap();
        carver.run(&mut rng).unwrap();
        let grid = carver.grid();
        let (nodes, links): (Vec<Pos>, Vec<Pos>) =
            grid.open_cells().partition(|p| Grid::is_node(*p));
        assert_eq!(links.len(), nodes.len() - 1);
    }

    #[test]
    fn single_node_grid_is_already_complete() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut carver = MazeCarver::new(Grid::new(1, 1).unwrap(), 4).unwrap();
        assert!(carver.is_valid());
        assert_eq!(carver.run(&mut rng).unwrap(), 0);
        assert_eq!(carver.grid().open_cells().count(), 1);
    }

    #[test]
    fn forced_sequence_opens_nodes_one_step_at_a_time() {
        let mut grid = Grid::new(5, 5).unwrap();
        let mut walker = Walker::new(Pos::new(0, 0)).unwrap();
        let steps = [
            (Dir::Right, Pos::new(2, 0), Pos::new(1, 0)),
            (Dir::Down, Pos::new(2, 2), Pos::new(2, 1)),
            (Dir::Right, Pos::new(4, 2), Pos::new(3, 2)),
        ];
        for (dir, node, link) in steps {
            assert!(!grid.is_open(node).unwrap());
            assert!(!grid.is_open(link).unwrap());
            assert_eq!(
                walker.step_in(&mut grid, dir).unwrap(),
                StepOutcome::Carved { node, link }
            );
            assert!(grid.is_open(node).unwrap());
            assert!(grid.is_open(link).unwrap());
            assert_eq!(walker.position(), node);
        }
        let open_nodes: Vec<Pos> = grid.nodes().filter(|p| grid.is_open(*p).unwrap()).collect();
        assert_eq!(
            open_nodes,
            vec![Pos::new(0, 0), Pos::new(2, 0), Pos::new(2, 2), Pos::new(4, 2)]
        );
    }

    #[test]
    fn revisiting_an_open_node_carves_nothing() {
        let mut grid = Grid::new(5, 5).unwrap();
        let mut walker = Walker::new(Pos::new(0, 0)).unwrap();
        walker.step_in(&mut grid, Dir::Down).unwrap();
        walker.step_in(&mut grid, Dir::Right).unwrap();
        let before = grid.clone();
        assert_eq!(
            walker.step_in(&mut grid, Dir::Up).unwrap(),
            StepOutcome::Carved {
                node: Pos::new(2, 0),
                link: Pos::new(2, 1)
            }
        );
        // Back to the seed through a closed link: no new link may appear.
        let before_return = grid.clone();
        assert_eq!(
            walker.step_in(&mut grid, Dir::Left).unwrap(),
            StepOutcome::Moved(Pos::new(0, 0))
        );
        assert_eq!(grid, before_return);
        assert!(!grid.is_open(Pos::new(1, 0)).unwrap());
        assert_ne!(grid, before);
    }

    #[test]
    fn illegal_direction_is_rejected_without_moving() {
        let mut grid = Grid::new(3, 3).unwrap();
        let mut walker = Walker::new(Pos::new(0, 0)).unwrap();
        assert!(matches!(
            walker.step_in(&mut grid, Dir::Up),
            Err(MazeError::OutOfBounds { .. })
        ));
        assert_eq!(walker.position(), Pos::new(0, 0));
        assert_eq!(grid.open_cells().count(), 1);
    }

    #[test]
    fn legal_moves_respect_bounds() {
        let grid = Grid::new(5, 5).unwrap();
        assert_eq!(
            Walker::new(Pos::new(0, 0)).unwrap().legal_moves(&grid),
            vec![Dir::Right, Dir::Down]
        );
        assert_eq!(Walker::new(Pos::new(2, 2)).unwrap().legal_moves(&grid).len(), 4);
        assert_eq!(
            Walker::new(Pos::new(4, 4)).unwrap().legal_moves(&grid),
            vec![Dir::Left, Dir::Up]
        );
        let single = Grid::new(1, 1).unwrap();
        assert!(Walker::new(Pos::new(0, 0)).unwrap().legal_moves(&single).is_empty());
    }

    #[test]
    fn walkers_only_start_on_nodes() {
        assert_eq!(
            Walker::new(Pos::new(1, 0)).unwrap_err(),
            MazeError::NotANode { x: 1, y: 0 }
        );
        assert_eq!(
            Walker::new(Pos::new(2, 3)).unwrap_err(),
            MazeError::NotANode { x: 2, y: 3 }
        );
        assert_eq!(Walker::new(Pos::new(4, 2)).unwrap().position(), Pos::new(4, 2));
    }

    #[test]
    fn zero_walkers_is_rejected() {
        let grid = Grid::new(3, 3).unwrap();
        assert_eq!(
            MazeCarver::new(grid, 0).unwrap_err(),
            MazeError::InvalidWalkerCount
        );
    }

    #[test]
    fn stepping_rounds_matches_running_to_completion() {
        let mut whole = MazeCarver::new(Grid::new(11, 11).unwrap(), 3).unwrap();
        whole.run(&mut StdRng::seed_from_u64(9)).unwrap();

        let mut stepped = MazeCarver::new(Grid::new(11, 11).unwrap(), 3).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let mut rounds = 0;
        while !stepped.round(&mut rng).unwrap() {
            rounds += 1;
            assert!(stepped.walkers().iter().all(|w| Grid::is_node(w.position())));
        }
        assert_eq!(rounds + 1, whole.rounds());
        assert_eq!(stepped.grid(), whole.grid());
    }
}
