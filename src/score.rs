//! Score accumulation.

/// Points awarded for each cleared row.
pub const POINTS_PER_ROW: u32 = 10;

/// Running score and cleared-row count of the current game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreTracker {
    score: u32,
    lines: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Credit `rows` cleared rows.
    pub fn add_rows(&mut self, rows: usize) {
        let rows = u32::try_from(rows).unwrap_or(u32::MAX);
        self.score = self.score.saturating_add(rows.saturating_mul(POINTS_PER_ROW));
        self.lines = self.lines.saturating_add(rows);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
