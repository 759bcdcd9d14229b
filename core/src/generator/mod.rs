use crate::*;
pub use random::*;

mod random;

/// Produces the mine layout for a new game.
///
/// Generators are consumed per game; `Game::restart` takes a fresh one so
/// every board is independently generated.
pub trait BoardGenerator {
    fn generate(self, config: BoardConfig) -> Result<Board>;
}

/// Generator with a known, explicit layout.
///
/// This is the injection point for deterministic tests: mine placement is
/// reproducible down to the exact cells.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedBoardGenerator {
    mine_positions: Vec<Pos>,
}

impl FixedBoardGenerator {
    pub fn new(mine_positions: Vec<Pos>) -> Self {
        Self { mine_positions }
    }
}

impl BoardGenerator for FixedBoardGenerator {
    fn generate(self, config: BoardConfig) -> Result<Board> {
        config.validate()?;

        let board = Board::from_mine_positions(config.size(), &self.mine_positions)?;
        if board.mine_count() != config.mines {
            log::warn!(
                "Fixed layout places {} mines, config asked for {}",
                board.mine_count(),
                config.mines
            );
        }
        Ok(board)
    }
}
