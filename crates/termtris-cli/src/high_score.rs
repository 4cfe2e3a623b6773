use std::{
    fs,
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use log::{error, info, warn};
use termtris_engine::{HighScoreStore, MAX_HIGH_SCORES, Ranking};

/// High-score table stored as whitespace-separated integers in a text file.
///
/// The file is written one score per line, best first.
#[derive(Debug, Clone)]
pub struct HighScoreFile {
    path: PathBuf,
}

impl HighScoreFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Reads the table. A missing file is an empty table.
    pub fn read(&self) -> anyhow::Result<Vec<usize>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("failed to read high score file: {}", self.path.display())
                });
            }
        };
        Ok(parse_scores(&text))
    }

    pub fn write(&self, scores: &[usize]) -> anyhow::Result<()> {
        let mut file = fs::File::create(&self.path).with_context(|| {
            format!("failed to create high score file: {}", self.path.display())
        })?;
        for score in scores {
            writeln!(file, "{score}").with_context(|| {
                format!("failed to write high score file: {}", self.path.display())
            })?;
        }
        Ok(())
    }
}

fn parse_scores(text: &str) -> Vec<usize> {
    let mut scores: Vec<usize> = text
        .split_whitespace()
        .filter_map(|token| match token.parse() {
            Ok(score) => Some(score),
            Err(e) => {
                warn!("skipping invalid high score entry {token:?}: {e}");
                None
            }
        })
        .collect();
    scores.sort_unstable_by(|a, b| b.cmp(a));
    scores.truncate(MAX_HIGH_SCORES);
    scores
}

impl HighScoreStore for HighScoreFile {
    fn load(&self) -> Vec<usize> {
        self.read().unwrap_or_else(|e| {
            warn!("{e:#}");
            vec![]
        })
    }

    fn save(&mut self, score: usize) -> Ranking {
        let ranking = Ranking::insert(self.load(), score);
        match self.write(ranking.scores()) {
            Ok(()) => info!(
                "saved score {score} (rank {}) to {}",
                ranking.rank(),
                self.path.display()
            ),
            Err(e) => error!("{e:#}"),
        }
        ranking
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "termtris-test-{}-{name}.txt",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn test_parse_skips_invalid_entries() {
        assert_eq!(parse_scores("100\nabc\n300 -5\n\n200\n"), vec![300, 200, 100]);
    }

    #[test]
    fn test_parse_keeps_top_ten() {
        let text: String = (1..=12).map(|n| format!("{}\n", n * 10)).collect();
        let scores = parse_scores(&text);
        assert_eq!(scores.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.first(), Some(&120));
        assert_eq!(scores.last(), Some(&30));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let file = HighScoreFile::new(temp_path("missing"));
        assert!(file.read().unwrap().is_empty());
        assert!(file.load().is_empty());
    }

    #[test]
    fn test_save_persists_ranking() {
        let path = temp_path("save");
        let mut file = HighScoreFile::new(&path);
        file.save(500);
        file.save(1500);
        let ranking = file.save(800);
        assert_eq!(ranking.scores(), &[1500, 800, 500]);
        assert_eq!(ranking.rank(), 2);

        assert_eq!(fs::read_to_string(&path).unwrap(), "1500\n800\n500\n");
        assert_eq!(HighScoreFile::new(&path).read().unwrap(), vec![1500, 800, 500]);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_failed_write_still_ranks() {
        // A directory cannot be opened as a file.
        let mut file = HighScoreFile::new(std::env::temp_dir());
        let ranking = file.save(42);
        assert_eq!(ranking.rank(), 1);
        assert_eq!(ranking.scores(), &[42]);
    }
}
