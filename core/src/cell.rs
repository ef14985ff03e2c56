use serde::{Deserialize, Serialize};

use crate::GameError;

/// Content of a single board cell.
///
/// Catalog and save data encode cells as `0 = Void`, `1 = Empty`, `2 = Occupied`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Cell {
    /// Outside the playable shape, never changes.
    Void,
    /// Playable hole without a peg.
    Empty,
    /// Playable hole holding a peg.
    Occupied,
}

impl Cell {
    pub const fn is_playable(self) -> bool {
        !matches!(self, Self::Void)
    }

    pub const fn is_peg(self) -> bool {
        matches!(self, Self::Occupied)
    }

    pub const fn is_empty_hole(self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Void
    }
}

impl TryFrom<u8> for Cell {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Void),
            1 => Ok(Self::Empty),
            2 => Ok(Self::Occupied),
            _ => Err(GameError::InvalidCellValue),
        }
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Void => 0,
            Cell::Empty => 1,
            Cell::Occupied => 2,
        }
    }
}
