use serde::{Deserialize, Serialize};

/// Player-visible state of a single board cell.
///
/// `Mine` and `WrongFlag` only appear after a loss, when the engine exposes
/// the layout for the end-of-game display.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
    WrongFlag,
}

impl Cell {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_))
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Hidden
    }
}
