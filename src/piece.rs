//! The falling piece and the parameters of the moves applied to it.

use crate::tetromino::{Shape, TetrominoKind};

/// Horizontal move direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub const fn dx(self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

/// Rotation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

/// Current piece: its own copy of the shape plus the top-left offset of that
/// shape in board coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: TetrominoKind,
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl ActivePiece {
    pub fn new(kind: TetrominoKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            x,
            y,
        }
    }

    /// Piece of `kind` at row 0, horizontally centred on a board `cols` wide.
    pub fn spawn(kind: TetrominoKind, cols: usize) -> Self {
        let shape = kind.shape();
        let x = (cols / 2) as i32 - (shape.width() / 2) as i32;
        Self { kind, shape, x, y: 0 }
    }

    /// Board coordinates of the occupied cells.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .occupied()
            .map(|(x, y, _)| (self.x + x as i32, self.y + y as i32))
    }
}
