/// Number of scores kept in the table.
pub const MAX_HIGH_SCORES: usize = 10;

/// Persistent storage for the high-score table.
///
/// Implementations decide where the table lives. Both operations are
/// infallible from the game's point of view: a store that cannot be read
/// behaves like an empty table and a failed write is reported by the store
/// itself.
pub trait HighScoreStore {
    /// Returns the stored scores, best first.
    fn load(&self) -> Vec<usize>;

    /// Records `score`, persists the updated table, and returns it.
    fn save(&mut self, score: usize) -> Ranking;
}

/// The high-score table after inserting one score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking {
    scores: Vec<usize>,
    rank: usize,
    score: usize,
}

impl Ranking {
    /// Inserts `score` into `previous`, keeping the best [`MAX_HIGH_SCORES`] in
    /// descending order.
    ///
    /// The rank is the 1-based position of the first entry equal to `score`,
    /// or one past the end of the table if it did not make the cut.
    ///
    /// # Example
    ///
    /// ```
    /// use termtris_engine::Ranking;
    ///
    /// let ranking = Ranking::insert(vec![500, 100], 300);
    /// assert_eq!(ranking.scores(), &[500, 300, 100]);
    /// assert_eq!(ranking.rank(), 2);
    /// ```
    #[must_use]
    pub fn insert(previous: Vec<usize>, score: usize) -> Self {
        let mut scores = previous;
        scores.push(score);
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(MAX_HIGH_SCORES);
        let rank = scores
            .iter()
            .position(|&s| s == score)
            .map_or(scores.len() + 1, |i| i + 1);
        Self {
            scores,
            rank,
            score,
        }
    }

    /// Scores in the table, best first.
    #[must_use]
    pub fn scores(&self) -> &[usize] {
        &self.scores
    }

    /// 1-based rank of the recorded score.
    #[must_use]
    pub const fn rank(&self) -> usize {
        self.rank
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns true if the recorded score made it into the table.
    #[must_use]
    pub const fn is_ranked(&self) -> bool {
        self.rank <= self.scores.len()
    }

    /// Returns true if the table entry at `index` is the score just recorded.
    ///
    /// A zero score is never highlighted.
    #[must_use]
    pub const fn is_current(&self, index: usize) -> bool {
        self.score > 0 && index + 1 == self.rank
    }
}

/// A high-score store that lives only in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryHighScores {
    scores: Vec<usize>,
}

impl MemoryHighScores {
    #[must_use]
    pub fn new(scores: Vec<usize>) -> Self {
        Self { scores }
    }
}

impl HighScoreStore for MemoryHighScores {
    fn load(&self) -> Vec<usize> {
        self.scores.clone()
    }

    fn save(&mut self, score: usize) -> Ranking {
        let ranking = Ranking::insert(self.load(), score);
        self.scores = ranking.scores().to_vec();
        ranking
    }
}
