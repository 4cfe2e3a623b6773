use anyhow::Context as _;
use serde::Serialize;

use crate::{command::HighScoreArg, high_score::HighScoreFile};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ScoresArg {
    #[clap(flatten)]
    high_score: HighScoreArg,
    /// Print the table as JSON
    #[clap(long)]
    json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct ScoreEntry {
    rank: usize,
    score: usize,
}

fn entries(scores: &[usize]) -> Vec<ScoreEntry> {
    scores
        .iter()
        .enumerate()
        .map(|(i, &score)| ScoreEntry {
            rank: i + 1,
            score,
        })
        .collect()
}

pub(crate) fn run(arg: &ScoresArg) -> anyhow::Result<()> {
    let ScoresArg { high_score, json } = arg;

    let file = HighScoreFile::new(&high_score.high_score_file);
    let entries = entries(&file.read()?);

    if *json {
        let text = serde_json::to_string_pretty(&entries)
            .context("failed to serialize high scores")?;
        println!("{text}");
        return Ok(());
    }

    if entries.is_empty() {
        println!("No high scores yet.");
        return Ok(());
    }
    for ScoreEntry { rank, score } in entries {
        println!("{rank:>2}. {score:>8}");
    }
    Ok(())
}
