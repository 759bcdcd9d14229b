use ndarray::Array2;
use rand::prelude::*;

use super::*;

/// Uniform random placement by rejection sampling: draw a cell, redraw
/// while it already holds a mine, until the requested count is placed.
/// Terminates because the config guarantees at least one free cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seeds from the thread-local entropy source, for real play.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: BoardConfig) -> Result<Board> {
        config.validate()?;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines: Array2<bool> = Array2::default(config.size().nd());
        let mut placed: Total = 0;

        while placed < config.mines {
            let pos: Pos = (rng.gen_range(0..config.rows), rng.gen_range(0..config.cols));
            if mines[pos.nd()] {
                continue;
            }
            mines[pos.nd()] = true;
            placed += 1;
        }

        log::debug!(
            "Placed {} mines on a {}x{} board (seed {})",
            placed,
            config.rows,
            config.cols,
            self.seed
        );
        Ok(Board::from_mine_mask(mines))
    }
}
