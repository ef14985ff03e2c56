use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Rectangular grid of cells with the peg-jump rules.
///
/// Boards are treated as values: every move produces a new board, which is
/// what keeps history snapshots independent from the live state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    /// Deep-copies a row template into a board and counts its pegs.
    ///
    /// Rows may be ragged, missing trailing cells are `Void`.
    pub fn initialize(template: &[Vec<Cell>]) -> Result<(Self, CellCount)> {
        let rows = template.len();
        let cols = template.iter().map(Vec::len).max().unwrap_or(0);

        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyBoard);
        }
        let max = usize::from(Coord::MAX);
        if rows > max || cols > max {
            return Err(GameError::InvalidBoardShape);
        }

        let mut cells = Array2::from_elem((rows, cols), Cell::Void);
        for (row, template_row) in template.iter().enumerate() {
            for (col, &cell) in template_row.iter().enumerate() {
                cells[[row, col]] = cell;
            }
        }

        let board = Self { cells };
        let occupied = board.count_occupied();
        Ok((board, occupied))
    }

    /// `(rows, cols)`
    pub fn size(&self) -> Position {
        // dimensions are bounded by `Coord::MAX` in `initialize`
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn contains(&self, pos: Position) -> bool {
        let (rows, cols) = self.size();
        pos.0 < rows && pos.1 < cols
    }

    pub fn validate_pos(&self, pos: Position) -> Result<Position> {
        if self.contains(pos) {
            Ok(pos)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, pos: Position) -> Option<Cell> {
        self.cells.get(pos.to_nd_index()).copied()
    }

    pub fn count_occupied(&self) -> CellCount {
        // at most 255 * 255 cells
        self.cells.iter().filter(|cell| cell.is_peg()).count() as CellCount
    }

    pub fn is_legal_jump(&self, from: Position, to: Position) -> bool {
        self.check_jump(from, to).is_ok()
    }

    /// Validates a jump and returns the position of the peg jumped over.
    pub fn check_jump(&self, from: Position, to: Position) -> Result<Position> {
        let from = self.validate_pos(from)?;
        let to = self.validate_pos(to)?;

        if !self[from].is_peg() {
            return Err(GameError::NotAPeg);
        }
        if !self[to].is_empty_hole() {
            return Err(GameError::TargetNotEmpty);
        }
        if !JUMP_DISPLACEMENTS.contains(&offset(from, to)) {
            return Err(GameError::InvalidJumpGeometry);
        }

        let over = midpoint(from, to);
        if self[over].is_peg() {
            Ok(over)
        } else {
            Err(GameError::NoPegToJumpOver)
        }
    }

    pub fn apply_jump(&self, from: Position, to: Position) -> Result<Self> {
        let over = self.check_jump(from, to)?;

        let mut next = self.clone();
        next.cells[from.to_nd_index()] = Cell::Empty;
        next.cells[over.to_nd_index()] = Cell::Empty;
        next.cells[to.to_nd_index()] = Cell::Occupied;
        Ok(next)
    }

    pub fn apply_hammer(&self, at: Position) -> Result<Self> {
        let at = self.validate_pos(at)?;
        if !self[at].is_peg() {
            return Err(GameError::NotAPeg);
        }

        let mut next = self.clone();
        next.cells[at.to_nd_index()] = Cell::Empty;
        Ok(next)
    }

    /// Every empty hole the peg at `from` can currently jump to.
    pub fn legal_targets(&self, from: Position) -> SmallVec<[Position; 4]> {
        let size = self.size();
        JUMP_DISPLACEMENTS
            .iter()
            .filter_map(|&delta| apply_delta(from, delta, size))
            .filter(|&to| self.is_legal_jump(from, to))
            .collect()
    }

    pub fn has_any_legal_jump(&self) -> bool {
        let size = self.size();
        self.cells
            .indexed_iter()
            .filter(|(_, cell)| cell.is_peg())
            .any(|((row, col), _)| {
                let from = (row as Coord, col as Coord);
                JUMP_DISPLACEMENTS.iter().any(|&delta| {
                    apply_delta(from, delta, size).is_some_and(|to| {
                        self[to].is_empty_hole() && self[midpoint(from, to)].is_peg()
                    })
                })
            })
    }

    /// Row-major iterator over every cell with its position.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }
}

impl Index<Position> for Board {
    type Output = Cell;

    fn index(&self, pos: Position) -> &Self::Output {
        &self.cells[pos.to_nd_index()]
    }
}

/// Builds a board template from catalog-style `0/1/2` rows.
#[cfg(test)]
pub(crate) fn template(rows: &[&[u8]]) -> Vec<Vec<Cell>> {
    rows.iter()
        .map(|row| row.iter().map(|&v| Cell::try_from(v).unwrap()).collect())
        .collect()
}
