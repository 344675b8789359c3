use clap::{Parser, Subcommand};

use self::{play::PlayArg, show_high_score::ShowHighScoreArg};

mod play;
mod show_high_score;

/// Default location of the high-score file.
const DEFAULT_HIGH_SCORE_FILE: &str = "high_score.txt";

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in (defaults to `play`)
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play the game in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Print the saved high score
    HighScore(#[clap(flatten)] ShowHighScoreArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::HighScore(arg) => show_high_score::run(&arg)?,
    }
    Ok(())
}
