//! Blockdrop — falling-block puzzle engine.
//!
//! The library holds the whole game core: the locked-cell [`Board`], the
//! seven-piece [`tetromino`] catalog, collision testing, the active piece
//! controller ([`Game`]) with rotation kicks, row sweeping and scoring. It
//! does no I/O except for the optional [`highscores`] store; rendering,
//! timing and key binding belong to the driver (see the `blockdrop` binary).
//!
//! ```
//! use blockdrop::{Command, Game, GameConfig, ScriptedSource, TetrominoKind};
//!
//! let mut game = Game::new(GameConfig::default(), ScriptedSource::new(vec![TetrominoKind::O]))?;
//! game.start_game("ada")?;
//! game.apply(Command::MoveLeft);
//! game.apply(Command::RotateCw);
//! assert_eq!(game.snapshot().score, 0);
//! # Ok::<(), blockdrop::GameError>(())
//! ```

pub mod board;
pub mod collision;
pub mod config;
pub mod error;
pub mod game;
pub mod highscores;
pub mod piece;
pub mod rng;
pub mod score;
pub mod sweep;
pub mod tetromino;

pub use board::{Board, Cell, EMPTY};
pub use collision::collides;
pub use config::GameConfig;
pub use error::{GameError, HighScoreError};
pub use game::{Command, Event, FinalScore, Game, Snapshot};
pub use highscores::{HighScoreEntry, HighScores};
pub use piece::{ActivePiece, Direction, Rotation};
pub use rng::{PieceSource, RandomSource, ScriptedSource};
pub use score::{POINTS_PER_ROW, ScoreTracker};
pub use sweep::LineSweeper;
pub use tetromino::{Shape, TetrominoKind};
