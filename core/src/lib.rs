//! Rules engine for a fixed-layout minesweeper game.
//!
//! The crate owns the grid of cells, mine placement, adjacency counting,
//! flood-fill reveal, flag bookkeeping, and win/loss determination. It has
//! no rendering or input handling: a UI collaborator resolves player input
//! to `(row, col)` positions, calls [`Game::reveal`] and
//! [`Game::toggle_flag`], and draws from [`Game::iter_cells`],
//! [`Game::flags_left`], and [`Game::outcome`].

pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod generator;
mod types;
