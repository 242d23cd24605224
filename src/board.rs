//! Board: grid of locked cells. y=0 is the top row.

use crate::piece::ActivePiece;
use std::collections::VecDeque;

/// Cell value: 0 is empty, 1..=7 is the material of a locked piece.
pub type Cell = u8;

pub const EMPTY: Cell = 0;

/// Locked-cell grid with fixed dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// grid[y][x]; grid[0] is the top row.
    grid: VecDeque<Vec<Cell>>,
}

impl Board {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            grid: (0..rows).map(|_| vec![EMPTY; cols]).collect(),
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell at signed board coordinates; `None` outside the grid.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        self.grid.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Write a cell; out-of-range coordinates are ignored.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if let Some(slot) = self.grid.get_mut(y).and_then(|row| row.get_mut(x)) {
            *slot = cell;
        }
    }

    /// Row `y` from the top.
    pub fn row(&self, y: usize) -> &[Cell] {
        &self.grid[y]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.grid.iter().map(Vec::as_slice)
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.grid
            .get(y)
            .is_some_and(|row| row.iter().all(|&c| c != EMPTY))
    }

    pub fn is_empty(&self) -> bool {
        self.grid.iter().flatten().all(|&c| c == EMPTY)
    }

    /// Write the piece's non-empty cells into the grid at its position.
    ///
    /// Callers check [`collides`](crate::collision::collides) first; merge
    /// itself does no bounds checking and panics if a cell lands outside.
    pub fn merge(&mut self, piece: &ActivePiece) {
        for (x, y, value) in piece.shape.occupied() {
            let bx = piece.x + x as i32;
            let by = piece.y + y as i32;
            debug_assert!(bx >= 0 && by >= 0, "merge outside the board at ({bx}, {by})");
            self.grid[by as usize][bx as usize] = value;
        }
    }

    /// Remove every full row, shifting the rows above down and inserting an
    /// empty row at the top. Returns the number of rows removed.
    pub fn sweep(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = self.rows;
        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                if let Some(mut removed) = self.grid.remove(row) {
                    removed.fill(EMPTY);
                    self.grid.push_front(removed);
                }
                cleared += 1;
                // Same index again: the row above has shifted into it.
                continue;
            }
            y -= 1;
        }
        cleared
    }

    /// Zero every cell.
    pub fn clear(&mut self) {
        self.grid.iter_mut().for_each(|row| row.fill(EMPTY));
    }
}
