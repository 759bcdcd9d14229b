use std::collections::{HashSet, VecDeque};

use chrono::prelude::*;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Terminal classification of a game session.
///
/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
/// - (Won | Lost) -> InProgress, only through `Game::restart`
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Capability switches for the rule variants. The base game enables
/// everything; switching a rule off is configuration, not a separate
/// engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ruleset {
    /// Placing a flag consumes budget and is refused once the budget is
    /// spent. Removing a flag is always allowed.
    pub enforce_flag_budget: bool,
    /// Evaluate the win condition after every action.
    pub win_detection: bool,
}

impl Default for Ruleset {
    fn default() -> Self {
        Self {
            enforce_flag_budget: true,
            win_detection: true,
        }
    }
}

/// Outcome of a primary action on a cell
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have changed the visible board
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Outcome of a secondary action on a cell
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Placed,
    /// The placed flag completed the win condition
    Won,
    Removed,
}

impl FlagOutcome {
    /// Whether this outcome could have changed the visible board
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// One game from generation to win or loss.
///
/// Owns the authoritative per-cell state and mediates every player action
/// against it. Single-threaded and synchronous: each action is fully
/// processed, including flood fill, before the next is accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    grid: Array2<Cell>,
    rules: Ruleset,
    revealed_count: Total,
    flagged_count: Total,
    outcome: Outcome,
    started_at: DateTime<Utc>,
}

impl Game {
    pub fn new(board: Board) -> Self {
        Self::with_rules(board, Ruleset::default())
    }

    pub fn with_rules(board: Board, rules: Ruleset) -> Self {
        let grid = Array2::default(board.size().nd());
        Self {
            board,
            grid,
            rules,
            revealed_count: 0,
            flagged_count: 0,
            outcome: Outcome::InProgress,
            started_at: Utc::now(),
        }
    }

    /// Generates a fresh board and wraps it in a new game.
    pub fn generate<G: BoardGenerator>(config: BoardConfig, generator: G) -> Result<Self> {
        Ok(Self::new(generator.generate(config)?))
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    pub fn size(&self) -> Pos {
        self.board.size()
    }

    pub fn config(&self) -> BoardConfig {
        self.board.config()
    }

    pub fn total_mines(&self) -> Total {
        self.board.mine_count()
    }

    /// Remaining flag budget. Conserved against the mine count: budget plus
    /// placed flags always equals the total mine count. Negative only when
    /// `enforce_flag_budget` is off.
    pub fn flags_left(&self) -> isize {
        (self.board.mine_count() as isize) - (self.flagged_count as isize)
    }

    pub fn cell_at(&self, pos: Pos) -> Cell {
        self.grid[pos.nd()]
    }

    /// The generated layout backing this game.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Every cell with its position, for the renderer.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Pos, Cell)> + '_ {
        self.grid
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Idx, col as Idx), cell))
    }

    /// When this board was generated or last restarted. Hook for the timing
    /// display owned by the UI collaborator.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Seconds since the game started
    pub fn elapsed_secs(&self) -> u32 {
        (Utc::now() - self.started_at).num_seconds().max(0) as u32
    }

    /// Primary action: reveal the cell at `pos`.
    ///
    /// Flagged and already-revealed targets are a no-op. Revealing a mine
    /// loses the game and exposes the layout; revealing a zero-adjacency
    /// cell flood-fills its empty region.
    pub fn reveal(&mut self, pos: Pos) -> Result<RevealOutcome> {
        let pos = self.board.validate_pos(pos)?;
        self.check_in_progress()?;

        match self.grid[pos.nd()] {
            Cell::Hidden => Ok(self.reveal_hidden(pos)),
            _ => Ok(RevealOutcome::NoChange),
        }
    }

    /// Secondary action: toggle the flag at `pos`.
    ///
    /// Flagging a revealed cell is a no-op, as is placing a flag with the
    /// budget spent. Removing a flag is always allowed.
    pub fn toggle_flag(&mut self, pos: Pos) -> Result<FlagOutcome> {
        let pos = self.board.validate_pos(pos)?;
        self.check_in_progress()?;

        Ok(match self.grid[pos.nd()] {
            Cell::Hidden => {
                if self.rules.enforce_flag_budget && self.flags_left() <= 0 {
                    return Ok(FlagOutcome::NoChange);
                }
                self.grid[pos.nd()] = Cell::Flagged;
                self.flagged_count += 1;
                if self.try_win() {
                    FlagOutcome::Won
                } else {
                    FlagOutcome::Placed
                }
            }
            Cell::Flagged => {
                self.grid[pos.nd()] = Cell::Hidden;
                self.flagged_count -= 1;
                FlagOutcome::Removed
            }
            _ => FlagOutcome::NoChange,
        })
    }

    /// Discards the board and starts over: fresh layout from `generator`
    /// under the same config, full flag budget, all cells hidden, clock
    /// reset.
    pub fn restart<G: BoardGenerator>(&mut self, generator: G) -> Result<()> {
        let board = generator.generate(self.board.config())?;
        self.grid = Array2::default(board.size().nd());
        self.board = board;
        self.revealed_count = 0;
        self.flagged_count = 0;
        self.outcome = Outcome::InProgress;
        self.started_at = Utc::now();
        Ok(())
    }

    fn reveal_hidden(&mut self, pos: Pos) -> RevealOutcome {
        if self.board.is_mine(pos) {
            log::debug!("Hit mine at {:?}", pos);
            self.outcome = Outcome::Lost;
            self.expose_mines();
            return RevealOutcome::HitMine;
        }

        self.reveal_cell(pos);
        if self.board.adjacent_mines(pos) == 0 {
            self.flood_reveal(pos);
        }

        if self.try_win() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    fn reveal_cell(&mut self, pos: Pos) {
        let count = self.board.adjacent_mines(pos);
        self.grid[pos.nd()] = Cell::Revealed(count);
        self.revealed_count += 1;
        log::trace!("Revealed {:?}, {} adjacent mines", pos, count);
    }

    /// Worklist flood fill over the zero-adjacency region around `start`.
    ///
    /// Flags are a hard barrier: flagged neighbors are never revealed and
    /// never unflagged, even over a mine. Bordering number cells are
    /// revealed but not expanded. Each cell is enqueued at most once, so
    /// re-entering an already-revealed empty cell cannot loop.
    fn flood_reveal(&mut self, start: Pos) {
        let mut visited = HashSet::from([start]);
        let mut pending: VecDeque<Pos> = self
            .board
            .neighbors(start)
            .filter(|&pos| self.grid[pos.nd()] == Cell::Hidden)
            .collect();

        while let Some(pos) = pending.pop_front() {
            if !visited.insert(pos) {
                continue;
            }
            if self.grid[pos.nd()] != Cell::Hidden {
                continue;
            }

            self.reveal_cell(pos);

            if self.board.adjacent_mines(pos) == 0 {
                pending.extend(
                    self.board
                        .neighbors(pos)
                        .filter(|&neighbor| self.grid[neighbor.nd()] == Cell::Hidden)
                        .filter(|neighbor| !visited.contains(neighbor)),
                );
            }
        }
    }

    /// The win condition: every mine flagged and every safe cell revealed.
    /// Flags only sit on unrevealed cells, so once all safe cells are
    /// revealed a full flag count can only mean every flag is on a mine.
    fn try_win(&mut self) -> bool {
        if !self.rules.win_detection || self.outcome.is_terminal() {
            return false;
        }

        if self.revealed_count == self.board.safe_cells()
            && self.flagged_count == self.board.mine_count()
        {
            log::debug!("All mines flagged and all safe cells revealed");
            self.outcome = Outcome::Won;
            true
        } else {
            false
        }
    }

    /// Loss display pass: expose every unflagged mine and cross out flags
    /// that sat on safe cells. Flagged mines keep their flag.
    fn expose_mines(&mut self) {
        let (rows, cols) = self.board.size();
        for row in 0..rows {
            for col in 0..cols {
                let pos = (row, col);
                match (self.grid[pos.nd()], self.board.is_mine(pos)) {
                    (Cell::Hidden, true) => self.grid[pos.nd()] = Cell::Mine,
                    (Cell::Flagged, false) => self.grid[pos.nd()] = Cell::WrongFlag,
                    _ => {}
                }
            }
        }
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.outcome.is_terminal() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
