use std::path::PathBuf;

use crate::high_score;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ShowHighScoreArg {
    /// File the high score is stored in
    #[clap(long, default_value = super::DEFAULT_HIGH_SCORE_FILE)]
    pub(super) high_score_file: PathBuf,
}

pub(crate) fn run(arg: &ShowHighScoreArg) -> anyhow::Result<()> {
    let high_score = high_score::load(&arg.high_score_file)?;
    println!("{high_score}");
    Ok(())
}
