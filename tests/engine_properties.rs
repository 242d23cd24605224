//! Property tests for the engine core.
//!
//! Invariants covered:
//! - The active piece never overlaps locked cells or leaves the board.
//! - Every lock adds exactly the piece's four cells minus the swept rows.
//! - Score only grows within a game, in steps of 10, and is zero after game over.
//! - Four clockwise rotations in open space restore shape and position.

use blockdrop::{
    Command, Event, Game, GameConfig, POINTS_PER_ROW, Rotation, ScriptedSource, TetrominoKind,
    collides,
};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Step {
    Input(Command),
    Tick(u64),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        1 => Just(Step::Input(Command::MoveLeft)),
        1 => Just(Step::Input(Command::MoveRight)),
        1 => Just(Step::Input(Command::RotateCw)),
        1 => Just(Step::Input(Command::RotateCcw)),
        3 => Just(Step::Input(Command::SoftDrop)),
        1 => (0u64..1500).prop_map(Step::Tick),
    ]
}

fn filled(game: &Game) -> usize {
    game.board()
        .iter_rows()
        .flatten()
        .filter(|&&c| c != blockdrop::EMPTY)
        .count()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_play_keeps_invariants(
        seed in any::<u64>(),
        rows in 6usize..14,
        cols in 4usize..9,
        steps in prop::collection::vec(step_strategy(), 0..600),
    ) {
        let config = GameConfig { rows, cols, seed: Some(seed), ..GameConfig::default() };
        let mut game = Game::from_config(&config).unwrap();
        game.start_game("prop").unwrap();

        for step in steps {
            let score_before = game.score();
            let filled_before = filled(&game);
            let event = match step {
                Step::Input(command) => game.apply(command),
                Step::Tick(ms) => game.tick(ms),
            };
            match event {
                Some(Event::GameOver(result)) => {
                    prop_assert!(result.score >= score_before);
                    prop_assert_eq!(result.name.as_str(), "prop");
                    prop_assert_eq!(game.score(), 0);
                    prop_assert!(game.board().is_empty());
                }
                Some(Event::Locked { rows_cleared }) => {
                    prop_assert_eq!(filled(&game) + rows_cleared * cols, filled_before + 4);
                    prop_assert_eq!(
                        game.score() - score_before,
                        rows_cleared as u32 * POINTS_PER_ROW
                    );
                }
                None => {
                    prop_assert_eq!(game.score(), score_before);
                    prop_assert_eq!(filled(&game), filled_before);
                }
            }
            let piece = game.piece().unwrap();
            prop_assert!(!collides(game.board(), piece));
            prop_assert!(game.board().iter_rows().flatten().all(|&c| c <= 7));
            prop_assert_eq!(game.board().rows(), rows);
        }
    }

    #[test]
    fn four_rotations_in_open_space_are_identity(
        kind_index in 0usize..7,
        drops in 2usize..10,
        shift in -2i32..=2,
    ) {
        let kind = TetrominoKind::ALL[kind_index];
        let mut game = Game::new(GameConfig::default(), ScriptedSource::new(vec![kind])).unwrap();
        game.start_game("prop").unwrap();
        for _ in 0..drops {
            prop_assert_eq!(game.soft_drop(), None);
        }
        for _ in 0..shift.unsigned_abs() {
            game.apply(if shift < 0 { Command::MoveLeft } else { Command::MoveRight });
        }
        let before = game.piece().cloned().unwrap();
        for _ in 0..4 {
            prop_assert!(game.rotate(Rotation::Clockwise));
        }
        prop_assert_eq!(game.piece().cloned().unwrap(), before);
    }
}

#[test]
fn same_seed_same_game() {
    let config = GameConfig {
        seed: Some(2024),
        ..GameConfig::default()
    };
    let play = || {
        let mut game = Game::from_config(&config).unwrap();
        game.start_game("det").unwrap();
        let mut events = Vec::new();
        for i in 0..300 {
            let command = match i % 5 {
                0 => Command::MoveLeft,
                1 => Command::RotateCw,
                2 => Command::MoveRight,
                _ => Command::SoftDrop,
            };
            events.extend(game.apply(command));
        }
        (events, game.board().clone())
    };
    assert_eq!(play(), play());
}
