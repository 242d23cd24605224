//! Tetromino catalog: the seven piece kinds and their square shape matrices.

use crate::board::{Cell, EMPTY};
use crate::piece::Rotation;

/// Tetromino kinds. Each kind has a fixed cell value (1..=7) that doubles as
/// its colour index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoKind {
    T,
    J,
    L,
    O,
    S,
    Z,
    I,
}

impl TetrominoKind {
    /// All kinds, in the order random selection indexes them.
    pub const ALL: [Self; 7] = [Self::T, Self::J, Self::L, Self::O, Self::S, Self::Z, Self::I];

    /// Cell value written into the board when this kind locks.
    pub const fn cell(self) -> Cell {
        match self {
            Self::T => 1,
            Self::O => 2,
            Self::L => 3,
            Self::J => 4,
            Self::I => 5,
            Self::S => 6,
            Self::Z => 7,
        }
    }

    /// Fresh copy of this kind's spawn orientation.
    pub fn shape(self) -> Shape {
        let v = self.cell();
        let o = EMPTY;
        match self {
            Self::T => Shape::from_rows(&[[o, o, o], [v, v, v], [o, v, o]]),
            Self::O => Shape::from_rows(&[[v, v], [v, v]]),
            Self::L => Shape::from_rows(&[[o, o, v], [v, v, v], [o, o, o]]),
            Self::J => Shape::from_rows(&[[v, o, o], [v, v, v], [o, o, o]]),
            // Padded to 4x4 so it rotates as a square matrix.
            Self::I => Shape::from_rows(&[[o, v, o, o], [o, v, o, o], [o, v, o, o], [o, v, o, o]]),
            Self::S => Shape::from_rows(&[[o, v, v], [v, v, o], [o, o, o]]),
            Self::Z => Shape::from_rows(&[[v, v, o], [o, v, v], [o, o, o]]),
        }
    }
}

/// Square occupancy matrix of one piece. `cells[y * size + x]`, 0 = empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    size: usize,
    cells: Vec<Cell>,
}

impl Shape {
    fn from_rows<const N: usize>(rows: &[[Cell; N]; N]) -> Self {
        Self {
            size: N,
            cells: rows.iter().flatten().copied().collect(),
        }
    }

    /// Side length; also bounds the kick search.
    #[inline]
    pub fn width(&self) -> usize {
        self.size
    }

    /// Non-empty cells as `(x, y, value)` in local coordinates.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != EMPTY)
            .map(|(i, v)| (i % self.size, i / self.size, *v))
    }

    /// Rows of the matrix, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    /// Rotate in place: transpose, then reverse each row (clockwise) or the
    /// row order (counter-clockwise).
    pub fn rotate(&mut self, rotation: Rotation) {
        let n = self.size;
        for y in 0..n {
            for x in 0..y {
                self.cells.swap(y * n + x, x * n + y);
            }
        }
        match rotation {
            Rotation::Clockwise => self.cells.chunks_mut(n).for_each(<[Cell]>::reverse),
            Rotation::CounterClockwise => {
                for y in 0..n / 2 {
                    for x in 0..n {
                        self.cells.swap(y * n + x, (n - 1 - y) * n + x);
                    }
                }
            }
        }
    }
}
