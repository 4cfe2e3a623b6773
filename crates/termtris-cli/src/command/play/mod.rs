use log::info;
use termtris_engine::{Game, RandomPieces};

use self::app::PlayApp;
use crate::{command::HighScoreArg, high_score::HighScoreFile, sound::SoundCues, tui::Tui};

mod app;
mod keymap;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    high_score: HighScoreArg,
    /// Start with the landing preview hidden (toggle in game with G)
    #[clap(long)]
    no_ghost: bool,
    /// Seed for the piece sequence
    #[clap(long)]
    seed: Option<u64>,
    /// Do not ring the terminal bell
    #[clap(long)]
    mute: bool,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        high_score,
        no_ghost,
        seed,
        mute,
    } = arg;

    let pieces = seed.map_or_else(RandomPieces::new, RandomPieces::with_seed);
    let mut game = Game::with_source(pieces);
    game.set_ghost_enabled(!no_ghost);

    let high_scores = HighScoreFile::new(&high_score.high_score_file);
    let mut app = PlayApp::new(game, high_scores, SoundCues::new(*mute));

    Tui::new().run(&mut app)?;

    let stats = app.game().stats();
    info!(
        "exiting: score {}, level {}, lines {}",
        stats.score(),
        stats.level(),
        stats.total_cleared_lines()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser as _;

    use crate::command::{CommandArgs, Mode};

    use super::*;

    fn parse_play(args: &[&str]) -> PlayArg {
        let args = CommandArgs::try_parse_from(args).unwrap();
        let Some(Mode::Play(arg)) = args.mode else {
            panic!("expected play mode");
        };
        arg
    }

    #[test]
    fn test_play_defaults() {
        let arg = parse_play(&["termtris", "play"]);
        assert_eq!(arg.high_score.high_score_file, PathBuf::from("highscores.txt"));
        assert!(!arg.no_ghost);
        assert!(!arg.mute);
        assert_eq!(arg.seed, None);
        assert_eq!(
            PlayArg::default().high_score.high_score_file,
            arg.high_score.high_score_file
        );
    }

    #[test]
    fn test_play_options() {
        let arg = parse_play(&[
            "termtris",
            "play",
            "--high-score-file",
            "/tmp/scores.txt",
            "--no-ghost",
            "--seed",
            "42",
            "--mute",
        ]);
        assert_eq!(arg.high_score.high_score_file, PathBuf::from("/tmp/scores.txt"));
        assert!(arg.no_ghost);
        assert!(arg.mute);
        assert_eq!(arg.seed, Some(42));
    }
}
