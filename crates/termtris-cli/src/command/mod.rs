use std::path::PathBuf;

use clap::{Parser, Subcommand};

use self::{play::PlayArg, scores::ScoresArg};
use crate::logging;

mod play;
mod scores;

/// File the high-score table is kept in unless `--high-score-file` says otherwise.
const DEFAULT_HIGH_SCORE_FILE: &str = "highscores.txt";

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Write log messages to this file (set the level with `TERMTRIS_LOG`)
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play the game (default)
    Play(#[clap(flatten)] PlayArg),
    /// Print the stored high scores
    Scores(#[clap(flatten)] ScoresArg),
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct HighScoreArg {
    /// Path of the high-score file
    #[clap(long, default_value = DEFAULT_HIGH_SCORE_FILE)]
    high_score_file: PathBuf,
}

impl Default for HighScoreArg {
    fn default() -> Self {
        Self {
            high_score_file: PathBuf::from(DEFAULT_HIGH_SCORE_FILE),
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    if let Some(path) = &args.log_file {
        logging::init(path)?;
    }
    match args.mode.unwrap_or_else(|| Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Scores(arg) => scores::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_no_subcommand() {
        let args = CommandArgs::try_parse_from(["termtris"]).unwrap();
        assert!(args.mode.is_none());
        assert!(args.log_file.is_none());
    }

    #[test]
    fn test_log_file_is_global() {
        let args =
            CommandArgs::try_parse_from(["termtris", "scores", "--log-file", "out.log"]).unwrap();
        assert_eq!(args.log_file, Some(PathBuf::from("out.log")));
        assert!(matches!(args.mode, Some(Mode::Scores(_))));
    }
}
