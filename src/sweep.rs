//! Row clearing after a lock.

use crate::board::Board;
use log::debug;

/// Clears full rows from a board and reports how many went.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineSweeper;

impl LineSweeper {
    pub fn sweep(board: &mut Board) -> usize {
        let cleared = board.sweep();
        if cleared > 0 {
            debug!("swept {cleared} full row(s)");
        }
        cleared
    }
}
