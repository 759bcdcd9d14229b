use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Board shape and mine density for one game.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub rows: Idx,
    pub cols: Idx,
    pub mines: Total,
}

impl BoardConfig {
    /// The reference game: an 18x14 grid holding 40 mines.
    pub const DEFAULT: Self = Self {
        rows: 18,
        cols: 14,
        mines: 40,
    };

    pub const fn new(rows: Idx, cols: Idx, mines: Total) -> Self {
        Self { rows, cols, mines }
    }

    pub const fn size(&self) -> Pos {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> Total {
        area(self.rows, self.cols)
    }

    /// The one fatal misconfiguration: a mine density that leaves no safe
    /// cell to reveal.
    pub fn validate(&self) -> Result<()> {
        if self.mines >= self.total_cells() {
            Err(GameError::TooManyMines)
        } else {
            Ok(())
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Mine layout of one game plus the adjacency counts derived from it.
///
/// Immutable once built: both layers are filled at generation time and only
/// read afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    mines: Array2<bool>,
    counts: Array2<u8>,
    mine_count: Total,
}

impl Board {
    pub fn from_mine_mask(mines: Array2<bool>) -> Self {
        let mine_count = mines
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap();
        let counts = Array2::from_shape_fn(mines.raw_dim(), |(row, col)| {
            count_adjacent_mines(&mines, (row as Idx, col as Idx))
        });
        Self {
            mines,
            counts,
            mine_count,
        }
    }

    pub fn from_mine_positions(size: Pos, mine_positions: &[Pos]) -> Result<Self> {
        let mut mines: Array2<bool> = Array2::default(size.nd());

        for &pos in mine_positions {
            if pos.0 >= size.0 || pos.1 >= size.1 {
                return Err(GameError::OutOfBounds);
            }
            mines[pos.nd()] = true;
        }

        Ok(Self::from_mine_mask(mines))
    }

    pub fn config(&self) -> BoardConfig {
        let (rows, cols) = self.size();
        BoardConfig::new(rows, cols, self.mine_count)
    }

    pub fn size(&self) -> Pos {
        let dim = self.mines.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> Total {
        self.mines.len().try_into().unwrap()
    }

    pub fn mine_count(&self) -> Total {
        self.mine_count
    }

    pub fn safe_cells(&self) -> Total {
        self.total_cells() - self.mine_count
    }

    pub fn validate_pos(&self, pos: Pos) -> Result<Pos> {
        let (rows, cols) = self.size();
        if pos.0 < rows && pos.1 < cols {
            Ok(pos)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn is_mine(&self, pos: Pos) -> bool {
        self.mines[pos.nd()]
    }

    /// Adjacency count stored at generation time.
    pub fn adjacent_mines(&self, pos: Pos) -> u8 {
        self.counts[pos.nd()]
    }

    pub fn neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> {
        neighbors(pos, self.size())
    }
}

/// Counts the mines in the clipped 8-neighborhood of `pos`. Pure; used to
/// fill the counts layer at generation time.
pub fn count_adjacent_mines(mines: &Array2<bool>, pos: Pos) -> u8 {
    let dim = mines.dim();
    let size = (dim.0.try_into().unwrap(), dim.1.try_into().unwrap());
    neighbors(pos, size)
        .filter(|&neighbor| mines[neighbor.nd()])
        .count()
        .try_into()
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_exact_mine_count() {
        let board = Board::from_mine_positions((4, 4), &[(0, 0), (3, 3), (1, 2)]).unwrap();
        assert_eq!(board.mine_count(), 3);
        assert_eq!(board.safe_cells(), 13);
    }

    #[test]
    fn duplicate_positions_collapse_into_one_mine() {
        let board = Board::from_mine_positions((3, 3), &[(1, 1), (1, 1)]).unwrap();
        assert_eq!(board.mine_count(), 1);
    }

    #[test]
    fn rejects_mine_outside_the_board() {
        let result = Board::from_mine_positions((3, 3), &[(3, 0)]);
        assert_eq!(result, Err(GameError::OutOfBounds));
    }

    #[test]
    fn counts_match_brute_force_recount() {
        let board =
            Board::from_mine_positions((5, 4), &[(0, 0), (0, 1), (2, 2), (4, 0), (4, 3)]).unwrap();

        for row in 0..5u8 {
            for col in 0..4u8 {
                let pos = (row, col);
                let mut expected = 0;
                for r in row.saturating_sub(1)..=(row + 1).min(4) {
                    for c in col.saturating_sub(1)..=(col + 1).min(3) {
                        if (r, c) != pos && board.is_mine((r, c)) {
                            expected += 1;
                        }
                    }
                }
                assert_eq!(board.adjacent_mines(pos), expected, "at {:?}", pos);
            }
        }
    }

    #[test]
    fn corner_adjacency_uses_clipped_neighborhood() {
        let board = Board::from_mine_positions((3, 3), &[(0, 1), (1, 0), (1, 1)]).unwrap();
        assert_eq!(board.adjacent_mines((0, 0)), 3);
        assert_eq!(board.adjacent_mines((2, 2)), 1);
    }

    #[test]
    fn config_rejects_full_board() {
        assert_eq!(
            BoardConfig::new(3, 3, 9).validate(),
            Err(GameError::TooManyMines)
        );
        assert_eq!(
            BoardConfig::new(3, 3, 10).validate(),
            Err(GameError::TooManyMines)
        );
        assert!(BoardConfig::new(3, 3, 8).validate().is_ok());
    }

    #[test]
    fn default_config_is_the_reference_game() {
        let config = BoardConfig::default();
        assert_eq!(config.size(), (18, 14));
        assert_eq!(config.mines, 40);
        assert!(config.validate().is_ok());
    }
}
