//! Blockdrop — falling-block puzzle game in the terminal.

mod app;
mod input;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::App;
use blockdrop::GameConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;
    let theme = theme::Theme::load(args.theme.as_deref(), args.palette).unwrap_or_default();
    let config = args.game_config();
    let scores_path = match &args.scores_file {
        Some(p) => p.clone(),
        None => blockdrop::highscores::default_path()?,
    };
    log::info!(
        "blockdrop {}x{} board, scores at {}",
        config.cols,
        config.rows,
        scores_path.display()
    );
    let mut app = App::new(&args, config, theme, scores_path)?;
    app.run()?;
    Ok(())
}

/// Logs go to a file (the terminal is taken by the game) and only when asked for.
fn init_logging(path: Option<&std::path::Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = std::fs::File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Falling-block puzzle game in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "blockdrop",
    version,
    about = "Falling-block puzzle in the terminal. Fill a row to clear it; 10 points per row.",
    long_about = "Blockdrop is a classic falling-block puzzle.\n\n\
        Pieces fall one row per second. Move and rotate them so they fill complete rows; \
        full rows are cleared and score 10 points each. The game ends when a new piece \
        cannot enter the board; your score is saved to the high score table and a new \
        game starts right away.\n\n\
        CONTROLS:\n  Left/Right  Move    Down       Soft drop\n  Up / W      Rotate CW   Q          Rotate CCW\n  P           Pause   Esc        Quit\n\n\
        CONTROLS (vim):\n  h/l         Move    j          Soft drop\n  k           Rotate CW   u          Rotate CCW"
)]
pub struct Args {
    /// Board height in rows.
    #[arg(long, default_value = "20", value_name = "ROWS")]
    pub rows: usize,

    /// Board width in columns.
    #[arg(long, default_value = "10", value_name = "COLS")]
    pub cols: usize,

    /// Gravity interval: the piece falls one row after this many ms.
    #[arg(long, default_value = "1000", value_name = "MS")]
    pub drop_interval_ms: u64,

    /// Seed for piece selection (same seed, same pieces).
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Player name; skips the name prompt.
    #[arg(short, long)]
    pub name: Option<String>,

    /// High scores file. Defaults to $XDG_CONFIG_HOME/blockdrop/highscores.json.
    #[arg(long, value_name = "FILE")]
    pub scores_file: Option<PathBuf>,

    /// Path to theme file (btop-style theme[key]=\"value\"). Uses the classic palette if not set.
    #[arg(short, long, value_name = "FILE")]
    pub theme: Option<PathBuf>,

    /// Colour palette: normal (theme), high-contrast, or colorblind.
    #[arg(long, default_value = "normal")]
    pub palette: Palette,

    /// Target render frames per second.
    #[arg(long, default_value = "60.0", value_name = "RATE")]
    pub frame_rate: f64,

    /// Disable the row-clear flash.
    #[arg(long)]
    pub no_animation: bool,

    /// Write logs to this file (level from RUST_LOG, default info).
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            rows: self.rows,
            cols: self.cols,
            drop_interval_ms: self.drop_interval_ms,
            seed: self.seed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Palette {
    #[default]
    Normal,

    #[value(alias = "highcontrast", alias = "contrast")]
    HighContrast,

    #[value(alias = "colourblind")]
    Colorblind,
}
