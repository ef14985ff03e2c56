/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for peg counts and total-cell counts.
pub type CellCount = u16;

/// Board position as `(row, col)`.
pub type Position = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Position {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Offsets a peg can jump by: two cells along exactly one axis.
pub const JUMP_DISPLACEMENTS: [(isize, isize); 4] = [(-2, 0), (2, 0), (0, -2), (0, 2)];

/// Applies `delta` to `pos`, returning a value only when it remains in bounds.
pub fn apply_delta(pos: Position, delta: (isize, isize), bounds: Position) -> Option<Position> {
    let (row, col) = pos;
    let (d_row, d_col) = delta;
    let (rows, cols) = bounds;

    let next_row = row.checked_add_signed(d_row.try_into().ok()?)?;
    if next_row >= rows {
        return None;
    }

    let next_col = col.checked_add_signed(d_col.try_into().ok()?)?;
    if next_col >= cols {
        return None;
    }

    Some((next_row, next_col))
}

/// Signed `(row, col)` offset from `from` to `to`.
pub fn offset(from: Position, to: Position) -> (isize, isize) {
    (
        to.0 as isize - from.0 as isize,
        to.1 as isize - from.1 as isize,
    )
}

/// Cell halfway between two positions of a straight two-cell jump.
pub const fn midpoint(from: Position, to: Position) -> Position {
    (
        ((from.0 as u16 + to.0 as u16) / 2) as Coord,
        ((from.1 as u16 + to.1 as u16) / 2) as Coord,
    )
}
