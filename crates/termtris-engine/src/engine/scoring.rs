use std::time::Duration;

/// Score values for line clears, multiplied by the level.
///
/// Index corresponds to number of lines cleared simultaneously:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
pub const SCORE_TABLE: [usize; 5] = [0, 100, 300, 500, 800];

/// Number of lines needed to gain one level.
pub const LINES_PER_LEVEL: usize = 10;

/// Game ticks per gravity step. The tick interval is the drop interval divided by this.
pub const SUBTICKS_PER_DROP: u32 = 5;

/// Time between gravity steps at `level`.
///
/// | level | interval |
/// |-------|----------|
/// | 1–3   | 500 ms   |
/// | 4–6   | 300 ms   |
/// | 7–9   | 150 ms   |
/// | 10+   | 80 ms    |
#[must_use]
pub const fn drop_interval(level: usize) -> Duration {
    let millis = match level {
        0..=3 => 500,
        4..=6 => 300,
        7..=9 => 150,
        _ => 80,
    };
    Duration::from_millis(millis)
}

/// Result of scoring a single lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOutcome {
    pub cleared_lines: usize,
    pub points: usize,
    pub level_up: bool,
}

/// Game statistics tracking score, level, and lines cleared.
///
/// Points for a lock are `SCORE_TABLE[lines] * level`, using the level in
/// effect before the lock is counted. The level is `1 + lines / 10`.
///
/// # Example
///
/// ```
/// use termtris_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// let outcome = stats.record_lock(4);
///
/// assert_eq!(outcome.points, 800);
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.level(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    level: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by number of lines cleared (`[0]` to `[4]`).
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Time between gravity steps at the current level.
    #[must_use]
    pub const fn drop_interval(&self) -> Duration {
        drop_interval(self.level)
    }

    /// Time between game ticks at the current level.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.drop_interval() / SUBTICKS_PER_DROP
    }

    /// Updates statistics after a piece lock that cleared `cleared_lines` rows.
    ///
    /// # Panics
    ///
    /// Panics if `cleared_lines` is greater than 4.
    pub fn record_lock(&mut self, cleared_lines: usize) -> LockOutcome {
        let points = SCORE_TABLE[cleared_lines] * self.level;
        self.completed_pieces += 1;
        self.line_cleared_counter[cleared_lines] += 1;
        self.score += points;
        self.total_cleared_lines += cleared_lines;

        let level = 1 + self.total_cleared_lines / LINES_PER_LEVEL;
        let level_up = level > self.level;
        self.level = level;

        LockOutcome {
            cleared_lines,
            points,
            level_up,
        }
    }
}
