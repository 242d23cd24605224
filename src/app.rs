//! App: terminal init, frame loop, name entry, key handling and score saving.

use crate::Args;
use crate::input::{Action, key_to_action};
use crate::theme::Theme;
use anyhow::Result;
use blockdrop::{Command, Event as GameEvent, FinalScore, Game, GameConfig, HighScores};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{info, warn};
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tachyonfx::Effect;

/// Longest accepted player name.
const MAX_NAME_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    NameEntry,
    Playing,
}

/// Result of the most recent finished game, shown in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverNotice {
    pub result: FinalScore,
    /// Made it into the high score table.
    pub ranked: bool,
}

/// Name-entry prompt state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameEntry {
    pub input: String,
    pub error: Option<String>,
}

pub struct App {
    game: Game,
    theme: Theme,
    scores: HighScores,
    scores_path: PathBuf,
    screen: Screen,
    name_entry: NameEntry,
    last_game: Option<GameOverNotice>,
    /// Time of the previous gravity tick.
    last_tick: Instant,
    /// Sub-millisecond remainder not yet handed to the game.
    tick_carry: Duration,
    frame_interval: Duration,
    no_animation: bool,
    /// TachyonFX flash over the board after rows clear.
    line_clear_effect: Option<Effect>,
    /// Last time the flash was processed (for delta).
    line_clear_effect_process_time: Option<Instant>,
}

impl App {
    pub fn new(args: &Args, config: GameConfig, theme: Theme, scores_path: PathBuf) -> Result<Self> {
        let game = Game::from_config(&config)?;
        let scores = HighScores::load_or_default(&scores_path);
        let frame_rate = if args.frame_rate > 0.0 { args.frame_rate } else { 60.0 };
        let mut app = Self {
            game,
            theme,
            scores,
            scores_path,
            screen: Screen::NameEntry,
            name_entry: NameEntry::default(),
            last_game: None,
            last_tick: Instant::now(),
            tick_carry: Duration::ZERO,
            frame_interval: Duration::from_secs_f64(1.0 / frame_rate),
            no_animation: args.no_animation,
            line_clear_effect: None,
            line_clear_effect_process_time: None,
        };
        if let Some(name) = &args.name {
            app.name_entry.input = name.chars().take(MAX_NAME_LEN).collect();
            app.submit_name();
        }
        Ok(app)
    }

    /// Start a game with the typed name, or keep the prompt open with an error.
    fn submit_name(&mut self) {
        match self.game.start_game(&self.name_entry.input) {
            Ok(()) => {
                self.name_entry.error = None;
                self.screen = Screen::Playing;
                self.last_tick = Instant::now();
                self.tick_carry = Duration::ZERO;
            }
            Err(e) => self.name_entry.error = Some(e.to_string()),
        }
    }

    /// Returns false when the player asked to quit.
    fn handle_name_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers == KeyModifiers::CONTROL {
            return key.code != KeyCode::Char('c');
        }
        match key.code {
            KeyCode::Esc => return false,
            KeyCode::Enter => self.submit_name(),
            KeyCode::Backspace => {
                self.name_entry.input.pop();
            }
            KeyCode::Char(c) if !c.is_control() => {
                if self.name_entry.input.chars().count() < MAX_NAME_LEN {
                    self.name_entry.input.push(c);
                }
            }
            _ => {}
        }
        true
    }

    /// Returns false when the player asked to quit.
    fn handle_play_key(&mut self, key: KeyEvent) -> bool {
        match key_to_action(key) {
            Action::Quit => return false,
            Action::Game(command) => {
                let event = self.game.apply(command);
                if command == Command::TogglePause && !self.game.is_paused() {
                    // Resume: the paused interval must not count as gravity time.
                    self.last_tick = Instant::now();
                    self.tick_carry = Duration::ZERO;
                }
                self.on_game_event(event);
            }
            Action::None => {}
        }
        true
    }

    fn on_game_event(&mut self, event: Option<GameEvent>) {
        match event {
            Some(GameEvent::Locked { rows_cleared }) if rows_cleared > 0 => {
                if !self.no_animation {
                    self.line_clear_effect = Some(crate::ui::line_clear_flash(&self.theme));
                    self.line_clear_effect_process_time = None;
                }
            }
            Some(GameEvent::GameOver(result)) => {
                let ranked = self.scores.record(&result);
                info!("{} finished with {} (ranked: {ranked})", result.name, result.score);
                if let Err(e) = self.scores.save(&self.scores_path) {
                    warn!("could not save high scores to {}: {e}", self.scores_path.display());
                }
                self.last_game = Some(GameOverNotice { result, ranked });
                self.line_clear_effect = None;
                self.line_clear_effect_process_time = None;
            }
            _ => {}
        }
    }

    fn tick(&mut self) {
        let now = Instant::now();
        let delta = now.saturating_duration_since(self.last_tick) + self.tick_carry;
        self.last_tick = now;
        let (delta_ms, carry) = whole_millis(delta);
        self.tick_carry = carry;
        let event = self.game.tick(delta_ms);
        self.on_game_event(event);
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            execute,
            terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal =
            ratatui::DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;

        let result = self.run_loop(&mut terminal);

        // Restore
        let _ = terminal.show_cursor();
        execute!(std::io::stdout(), LeaveAlternateScreen)?;
        disable_raw_mode()?;

        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            let now = Instant::now();
            terminal.draw(|f| {
                crate::ui::draw(
                    f,
                    self.screen,
                    self.game.snapshot(),
                    &self.theme,
                    &self.scores,
                    &self.name_entry,
                    self.last_game.as_ref(),
                    &mut self.line_clear_effect,
                    &mut self.line_clear_effect_process_time,
                    now,
                )
            })?;

            if self.line_clear_effect.as_ref().is_some_and(|e| e.done()) {
                self.line_clear_effect = None;
                self.line_clear_effect_process_time = None;
            }

            let timeout = self.frame_interval.saturating_sub(now.elapsed());
            if event::poll(timeout)? {
                while event::poll(Duration::ZERO)? {
                    let Event::Key(key) = event::read()? else {
                        continue;
                    };
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    let keep_going = match self.screen {
                        Screen::NameEntry => self.handle_name_key(key),
                        Screen::Playing => self.handle_play_key(key),
                    };
                    if !keep_going {
                        return Ok(());
                    }
                }
            }

            if self.screen == Screen::Playing {
                self.tick();
            }
        }
    }
}

/// Split `delta` into whole milliseconds and the leftover below one ms.
fn whole_millis(delta: Duration) -> (u64, Duration) {
    let ms = u64::try_from(delta.as_millis()).unwrap_or(u64::MAX);
    let rest = delta.saturating_sub(Duration::from_millis(ms));
    (ms, rest)
}
