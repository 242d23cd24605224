//! Engine options fixed at construction time.

/// Canonical board height.
pub const DEFAULT_ROWS: usize = 20;
/// Canonical board width.
pub const DEFAULT_COLS: usize = 10;
/// Gravity interval in milliseconds: one automatic drop per second.
pub const DEFAULT_DROP_INTERVAL_MS: u64 = 1000;

/// Options that shape a game: board size, gravity speed and RNG seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    /// Gravity fires once the accumulated tick time exceeds this many ms.
    pub drop_interval_ms: u64,
    /// Seed for piece selection; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            drop_interval_ms: DEFAULT_DROP_INTERVAL_MS,
            seed: None,
        }
    }
}
