//! Game state: board, active piece, score, gravity counter and pause flag.
//!
//! [`Game`] is the single owner of all mutable state. A driver feeds it
//! elapsed time through [`Game::tick`] and player input through
//! [`Game::apply`]; both return an [`Event`] when a piece locks or the game
//! ends.

use crate::board::Board;
use crate::collision::collides;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::piece::{ActivePiece, Direction, Rotation};
use crate::rng::{PieceSource, RandomSource};
use crate::score::ScoreTracker;
use crate::sweep::LineSweeper;
use log::{debug, info, trace};

/// Smallest allowed board side; the I piece needs a 4x4 matrix.
pub const MIN_BOARD_SIDE: usize = 4;

/// Player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateCw,
    RotateCcw,
    TogglePause,
}

/// Name and score of a finished game, handed to the high-score store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalScore {
    pub name: String,
    pub score: u32,
}

/// Notable outcome of a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The piece locked and the next one spawned.
    Locked { rows_cleared: usize },
    /// The next piece could not spawn. Board and score have already been
    /// reset and a fresh piece is falling.
    GameOver(FinalScore),
}

/// Read-only view for renderers.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub board: &'a Board,
    pub piece: Option<&'a ActivePiece>,
    pub score: u32,
    pub lines: u32,
    pub paused: bool,
    pub player: &'a str,
}

#[derive(Debug, Clone)]
pub struct Game<S = RandomSource> {
    board: Board,
    /// `None` until `start_game`.
    piece: Option<ActivePiece>,
    score: ScoreTracker,
    source: S,
    player: String,
    paused: bool,
    drop_counter_ms: u64,
    drop_interval_ms: u64,
}

impl Game<RandomSource> {
    /// Game with uniform random pieces, seeded from `config.seed` if set.
    pub fn from_config(config: &GameConfig) -> Result<Self, GameError> {
        Self::new(config.clone(), RandomSource::new(config.seed))
    }
}

impl<S: PieceSource> Game<S> {
    pub fn new(config: GameConfig, source: S) -> Result<Self, GameError> {
        if config.rows < MIN_BOARD_SIDE || config.cols < MIN_BOARD_SIDE {
            return Err(GameError::BoardTooSmall {
                rows: config.rows,
                cols: config.cols,
                min: MIN_BOARD_SIDE,
            });
        }
        Ok(Self {
            board: Board::new(config.rows, config.cols),
            piece: None,
            score: ScoreTracker::new(),
            source,
            player: String::new(),
            paused: false,
            drop_counter_ms: 0,
            drop_interval_ms: config.drop_interval_ms,
        })
    }

    /// Begin (or restart) a game for `name`.
    pub fn start_game(&mut self, name: &str) -> Result<(), GameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::EmptyName);
        }
        self.player = name.to_string();
        self.board.clear();
        self.score.reset();
        self.paused = false;
        self.drop_counter_ms = 0;
        self.piece = None;
        info!("starting game for {:?}", self.player);
        // Cannot collide: the board was just cleared and is at least 4x4.
        let _ = self.spawn();
        Ok(())
    }

    pub fn apply(&mut self, command: Command) -> Option<Event> {
        match command {
            Command::MoveLeft => {
                self.move_horizontal(Direction::Left);
                None
            }
            Command::MoveRight => {
                self.move_horizontal(Direction::Right);
                None
            }
            Command::SoftDrop => self.soft_drop(),
            Command::RotateCw => {
                self.rotate(Rotation::Clockwise);
                None
            }
            Command::RotateCcw => {
                self.rotate(Rotation::CounterClockwise);
                None
            }
            Command::TogglePause => {
                self.toggle_pause();
                None
            }
        }
    }

    /// Advance gravity by `delta_ms`. Drops one row once the accumulated time
    /// exceeds the interval. Does nothing while paused or before start.
    pub fn tick(&mut self, delta_ms: u64) -> Option<Event> {
        if self.paused || self.piece.is_none() {
            return None;
        }
        self.drop_counter_ms = self.drop_counter_ms.saturating_add(delta_ms);
        if self.drop_counter_ms > self.drop_interval_ms {
            self.soft_drop()
        } else {
            None
        }
    }

    /// Shift the piece one column. Returns false if blocked.
    pub fn move_horizontal(&mut self, direction: Direction) -> bool {
        if self.paused {
            return false;
        }
        let Some(piece) = self.piece.as_mut() else {
            return false;
        };
        piece.x += direction.dx();
        if collides(&self.board, piece) {
            piece.x -= direction.dx();
            return false;
        }
        true
    }

    /// Move down one row, locking the piece if it cannot. Always restarts
    /// the gravity countdown.
    pub fn soft_drop(&mut self) -> Option<Event> {
        if self.paused {
            return None;
        }
        let piece = self.piece.as_mut()?;
        self.drop_counter_ms = 0;
        piece.y += 1;
        if !collides(&self.board, piece) {
            return None;
        }
        piece.y -= 1;
        let piece = self.piece.take()?;
        Some(self.lock(piece))
    }

    /// Rotate the piece, kicking sideways if the new orientation collides.
    /// On failure shape and position are left as they were.
    pub fn rotate(&mut self, rotation: Rotation) -> bool {
        if self.paused {
            return false;
        }
        let Some(piece) = self.piece.as_mut() else {
            return false;
        };
        let saved_shape = piece.shape.clone();
        let saved_x = piece.x;
        piece.shape.rotate(rotation);
        if !collides(&self.board, piece) {
            return true;
        }
        for offset in kick_offsets(piece.shape.width()) {
            piece.x += offset;
            if !collides(&self.board, piece) {
                trace!("{:?} rotation kicked to x={} (from {saved_x})", piece.kind, piece.x);
                return true;
            }
        }
        trace!("{:?} rotation blocked at x={saved_x}", piece.kind);
        piece.shape = saved_shape;
        piece.x = saved_x;
        false
    }

    /// Flip the pause flag; returns the new value.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        debug!("paused = {}", self.paused);
        self.paused
    }

    /// Merge, sweep, score, then bring in the next piece.
    fn lock(&mut self, piece: ActivePiece) -> Event {
        self.board.merge(&piece);
        let rows_cleared = LineSweeper::sweep(&mut self.board);
        self.score.add_rows(rows_cleared);
        debug!(
            "{:?} locked at ({}, {}), {} row(s) cleared, score {}",
            piece.kind,
            piece.x,
            piece.y,
            rows_cleared,
            self.score.score()
        );
        self.spawn().unwrap_or(Event::Locked { rows_cleared })
    }

    /// Place a new random piece at the top. If it collides the game is over:
    /// the final score is returned, board and score are reset and another
    /// piece is spawned on the empty board.
    fn spawn(&mut self) -> Option<Event> {
        let piece = ActivePiece::spawn(self.source.next_kind(), self.board.cols());
        if !collides(&self.board, &piece) {
            self.piece = Some(piece);
            return None;
        }
        let report = FinalScore {
            name: self.player.clone(),
            score: self.score.score(),
        };
        info!("game over for {:?}: score {}", report.name, report.score);
        self.board.clear();
        self.score.reset();
        self.drop_counter_ms = 0;
        self.piece = Some(ActivePiece::spawn(self.source.next_kind(), self.board.cols()));
        Some(Event::GameOver(report))
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            board: &self.board,
            piece: self.piece.as_ref(),
            score: self.score.score(),
            lines: self.score.lines(),
            paused: self.paused,
            player: &self.player,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn piece(&self) -> Option<&ActivePiece> {
        self.piece.as_ref()
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score.score()
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// True once a game has been started.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.piece.is_some()
    }
}

/// Sideways nudges tried after a blocked rotation, applied cumulatively:
/// +1, -2, +3, ... The search stops before the step whose follow-up would be
/// a rightward nudge wider than the shape, so a 4-wide piece tests only
/// +1, -2, +3 and a 2-wide piece only +1.
fn kick_offsets(width: usize) -> impl Iterator<Item = i32> {
    let width = width as i32;
    (1..)
        .take_while(move |&k| k % 2 == 1 || k < width)
        .map(|k| if k % 2 == 1 { k } else { -k })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::EMPTY;
    use crate::rng::ScriptedSource;
    use crate::tetromino::TetrominoKind;

    fn game_with(kinds: Vec<TetrominoKind>) -> Game<ScriptedSource> {
        let mut g = Game::new(GameConfig::default(), ScriptedSource::new(kinds)).unwrap();
        g.start_game("ada").unwrap();
        g
    }

    fn pos(g: &Game<ScriptedSource>) -> (i32, i32) {
        let p = g.piece().unwrap();
        (p.x, p.y)
    }

    #[test]
    fn test_kick_offsets_order() {
        assert_eq!(kick_offsets(4).collect::<Vec<_>>(), vec![1, -2, 3]);
        assert_eq!(kick_offsets(3).collect::<Vec<_>>(), vec![1, -2, 3]);
        assert_eq!(kick_offsets(2).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_board_too_small() {
        let config = GameConfig {
            rows: 3,
            ..GameConfig::default()
        };
        let err = Game::new(config, ScriptedSource::new(vec![])).unwrap_err();
        assert_eq!(err, GameError::BoardTooSmall { rows: 3, cols: 10, min: 4 });
    }

    #[test]
    fn test_start_requires_name() {
        let mut g = Game::new(GameConfig::default(), ScriptedSource::new(vec![])).unwrap();
        assert_eq!(g.start_game("   "), Err(GameError::EmptyName));
        assert!(!g.is_running());
        assert_eq!(g.apply(Command::SoftDrop), None);
        assert_eq!(g.tick(5000), None);
        assert!(g.piece().is_none());
        g.start_game("  bob ").unwrap();
        assert_eq!(g.snapshot().player, "bob");
        assert!(g.is_running());
    }

    #[test]
    fn test_o_piece_locks_on_floor_after_nineteen_drops() {
        let mut g = game_with(vec![TetrominoKind::O]);
        assert_eq!(pos(&g), (4, 0));
        for _ in 0..18 {
            assert_eq!(g.soft_drop(), None);
        }
        assert_eq!(pos(&g), (4, 18));
        assert_eq!(g.soft_drop(), Some(Event::Locked { rows_cleared: 0 }));
        for (row, col) in [(18, 4), (18, 5), (19, 4), (19, 5)] {
            assert_eq!(g.board().row(row)[col], 2);
        }
        let filled = g.board().iter_rows().flatten().filter(|&&c| c != EMPTY).count();
        assert_eq!(filled, 4);
        assert_eq!(pos(&g), (4, 0));
    }

    #[test]
    fn test_move_blocked_by_wall_is_reverted() {
        let mut g = game_with(vec![TetrominoKind::O]);
        for _ in 0..4 {
            assert!(g.move_horizontal(Direction::Left));
        }
        assert!(!g.move_horizontal(Direction::Left));
        assert_eq!(pos(&g), (0, 0));
        for _ in 0..8 {
            g.apply(Command::MoveRight);
        }
        assert_eq!(pos(&g), (8, 0));
    }

    #[test]
    fn test_move_blocked_by_locked_cell() {
        let mut g = game_with(vec![TetrominoKind::O]);
        g.board.set(6, 1, 3);
        assert!(!g.move_horizontal(Direction::Right));
        assert_eq!(pos(&g), (4, 0));
    }

    #[test]
    fn test_rotation_without_collision_keeps_position() {
        let mut g = game_with(vec![TetrominoKind::T]);
        let before = pos(&g);
        assert!(g.rotate(Rotation::Clockwise));
        assert_eq!(pos(&g), before);
        let mut expected = TetrominoKind::T.shape();
        expected.rotate(Rotation::Clockwise);
        assert_eq!(g.piece().unwrap().shape, expected);
    }

    #[test]
    fn test_rotation_kicks_right_off_left_wall() {
        let mut g = game_with(vec![TetrominoKind::I]);
        for _ in 0..4 {
            assert!(g.move_horizontal(Direction::Left));
        }
        assert!(!g.move_horizontal(Direction::Left));
        assert_eq!(pos(&g), (-1, 0));
        assert!(g.rotate(Rotation::Clockwise));
        assert_eq!(pos(&g), (0, 0));
    }

    #[test]
    fn test_rotation_kick_tries_minus_two_after_plus_one() {
        let mut g = game_with(vec![TetrominoKind::I]);
        // Horizontal I lands on row 1; block column 6 there.
        g.board.set(6, 1, 7);
        assert_eq!(pos(&g), (3, 0));
        assert!(g.rotate(Rotation::Clockwise));
        // 3 blocked, 3+1 blocked, 3+1-2 = 2 free.
        assert_eq!(pos(&g), (2, 0));
    }

    #[test]
    fn test_i_rotation_at_right_wall_is_refused() {
        let mut g = game_with(vec![TetrominoKind::I]);
        while g.move_horizontal(Direction::Right) {}
        assert_eq!(pos(&g), (8, 0));
        // 8, 9, 7 and 10 all collide; 6 is never tried.
        assert!(!g.rotate(Rotation::Clockwise));
        assert_eq!(pos(&g), (8, 0));
        assert_eq!(g.piece().unwrap().shape, TetrominoKind::I.shape());
    }

    #[test]
    fn test_t_rotation_gives_up_after_three_kicks() {
        let mut g = game_with(vec![TetrominoKind::T]);
        assert_eq!(pos(&g), (4, 0));
        // Rotated T blocked at x = 4, 5, 3 and 6; x = 2 would fit.
        for (x, y) in [(5, 0), (6, 2), (4, 2), (7, 2)] {
            g.board.set(x, y, 1);
        }
        assert!(!g.rotate(Rotation::Clockwise));
        assert_eq!(pos(&g), (4, 0));
        assert_eq!(g.piece().unwrap().shape, TetrominoKind::T.shape());
    }

    #[test]
    fn test_blocked_rotation_restores_shape_and_position() {
        let mut g = game_with(vec![TetrominoKind::I]);
        // Well at column 4 from row 8 down.
        for y in 8..20 {
            for x in 0..10 {
                if x != 4 {
                    g.board.set(x, y, 1);
                }
            }
        }
        for _ in 0..7 {
            assert_eq!(g.soft_drop(), None);
        }
        assert_eq!(pos(&g), (3, 7));
        let before = g.piece().cloned();
        assert!(!g.rotate(Rotation::Clockwise));
        assert!(!g.rotate(Rotation::CounterClockwise));
        assert_eq!(g.piece().cloned(), before);
        assert_eq!(g.piece().unwrap().shape, TetrominoKind::I.shape());
    }

    #[test]
    fn test_lock_clears_row_and_scores() {
        let mut g = game_with(vec![TetrominoKind::O]);
        for x in 0..10 {
            if x != 4 && x != 5 {
                g.board.set(x, 19, 1);
            }
        }
        let mut event = None;
        for _ in 0..19 {
            event = g.soft_drop();
        }
        assert_eq!(event, Some(Event::Locked { rows_cleared: 1 }));
        assert_eq!(g.score(), 10);
        assert_eq!(g.snapshot().lines, 1);
        assert_eq!(g.board().row(19), &[0, 0, 0, 0, 2, 2, 0, 0, 0, 0]);
        assert!(g.board().row(18).iter().all(|&c| c == EMPTY));
    }

    #[test]
    fn test_game_over_reports_once_and_resets() {
        let mut g = game_with(vec![TetrominoKind::O]);
        g.score.add_rows(3);
        g.board.set(4, 2, 1);
        g.board.set(5, 2, 1);
        let event = g.soft_drop();
        assert_eq!(
            event,
            Some(Event::GameOver(FinalScore {
                name: "ada".into(),
                score: 30,
            }))
        );
        assert_eq!(g.score(), 0);
        assert!(g.board().is_empty());
        assert_eq!(pos(&g), (4, 0));
        assert!(!collides(g.board(), g.piece().unwrap()));
        // The fresh game carries on normally.
        assert_eq!(g.soft_drop(), None);
        assert_eq!(g.snapshot().player, "ada");
    }

    #[test]
    fn test_gravity_needs_more_than_interval() {
        let mut g = game_with(vec![TetrominoKind::O]);
        assert_eq!(g.tick(1000), None);
        assert_eq!(pos(&g), (4, 0));
        g.tick(1);
        assert_eq!(pos(&g), (4, 1));
        // One drop per tick, however long the tick.
        g.tick(10_000);
        assert_eq!(pos(&g), (4, 2));
    }

    #[test]
    fn test_manual_drop_restarts_gravity_countdown() {
        let mut g = game_with(vec![TetrominoKind::O]);
        g.tick(900);
        g.apply(Command::SoftDrop);
        assert_eq!(pos(&g), (4, 1));
        g.tick(900);
        assert_eq!(pos(&g), (4, 1));
        g.tick(101);
        assert_eq!(pos(&g), (4, 2));
    }

    #[test]
    fn test_pause_freezes_gravity_and_input() {
        let mut g = game_with(vec![TetrominoKind::T]);
        g.tick(600);
        g.apply(Command::TogglePause);
        assert!(g.snapshot().paused);
        assert_eq!(g.tick(5000), None);
        g.apply(Command::MoveLeft);
        g.apply(Command::RotateCw);
        g.apply(Command::SoftDrop);
        assert_eq!(pos(&g), (4, 0));
        assert_eq!(g.piece().unwrap().shape, TetrominoKind::T.shape());
        assert!(!g.toggle_pause());
        // Counter kept its 600 ms; the paused 5000 ms never counted.
        g.tick(400);
        assert_eq!(pos(&g), (4, 0));
        g.tick(1);
        assert_eq!(pos(&g), (4, 1));
    }

    #[test]
    fn test_restart_clears_state() {
        let mut g = game_with(vec![TetrominoKind::O]);
        g.score.add_rows(2);
        g.board.set(0, 19, 4);
        g.toggle_pause();
        g.start_game("eve").unwrap();
        assert_eq!(g.score(), 0);
        assert!(g.board().is_empty());
        assert!(!g.is_paused());
        assert_eq!(g.snapshot().player, "eve");
    }

    #[test]
    fn test_seeded_games_match() {
        let config = GameConfig {
            seed: Some(99),
            ..GameConfig::default()
        };
        let mut a = Game::from_config(&config).unwrap();
        let mut b = Game::from_config(&config).unwrap();
        a.start_game("a").unwrap();
        b.start_game("b").unwrap();
        for _ in 0..200 {
            a.apply(Command::SoftDrop);
            b.apply(Command::SoftDrop);
        }
        assert_eq!(a.board(), b.board());
        assert_eq!(a.piece(), b.piece());
    }
}
