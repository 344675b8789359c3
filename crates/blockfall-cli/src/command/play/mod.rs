use std::path::{Path, PathBuf};

use blockfall_engine::{GameSession, PieceSeed, SessionConfig};

use crate::{command::play::app::PlayApp, high_score, tui::Tui};

mod app;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Gravity steps per second
    #[clap(long, default_value_t = SessionConfig::DEFAULT_TICK_RATE, value_parser = parse_tick_rate)]
    tick_rate: f64,
    /// Seconds the game-over screen stays up before the game exits
    #[clap(long, default_value_t = SessionConfig::DEFAULT_GAME_OVER_DELAY, value_parser = parse_delay)]
    game_over_delay: f64,
    /// File the high score is loaded from and saved to
    #[clap(long, default_value = super::DEFAULT_HIGH_SCORE_FILE)]
    high_score_file: PathBuf,
    /// Piece seed as 32 hex characters (random if omitted)
    #[clap(long)]
    seed: Option<PieceSeed>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            tick_rate: SessionConfig::DEFAULT_TICK_RATE,
            game_over_delay: SessionConfig::DEFAULT_GAME_OVER_DELAY,
            high_score_file: PathBuf::from(super::DEFAULT_HIGH_SCORE_FILE),
            seed: None,
        }
    }
}

fn parse_tick_rate(s: &str) -> Result<f64, String> {
    let rate: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if !rate.is_finite() || rate <= 0.0 {
        return Err(format!("tick rate must be a positive number, got {s}"));
    }
    Ok(rate)
}

fn parse_delay(s: &str) -> Result<f64, String> {
    let delay: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if !delay.is_finite() || delay < 0.0 {
        return Err(format!("delay must be zero or a positive number, got {s}"));
    }
    Ok(delay)
}

/// Loads the starting high score and decides where the final one is saved.
///
/// A file that exists but cannot be read is never saved over, since it may
/// hold a larger score than this session will reach.
fn load_initial_high_score(path: &Path) -> (usize, Option<&Path>) {
    match high_score::load(path) {
        Ok(high_score) => (high_score, Some(path)),
        Err(err) => {
            eprintln!("Ignoring high score file, it will not be updated: {err:#}");
            (0, None)
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        tick_rate,
        game_over_delay,
        high_score_file,
        seed,
    } = arg;

    // The terminal is not taken over yet, so this is still visible.
    let (initial_high_score, save_path) = load_initial_high_score(high_score_file);

    let config = SessionConfig::from_tick_rate(*tick_rate, *game_over_delay);
    let session = match seed {
        Some(seed) => GameSession::with_seed(initial_high_score, config, *seed),
        None => GameSession::new(initial_high_score, config),
    };

    let mut app = PlayApp::new(session, *tick_rate);
    let result = Tui::new().run(&mut app);

    // Persist even if the terminal failed mid-game.
    let session = app.session();
    if let Some(path) = save_path {
        high_score::save(path, session.final_high_score())?;
    }
    result?;

    eprintln!("Score: {}", session.score());
    match save_path {
        Some(path) => eprintln!(
            "High score: {} (saved to {})",
            session.final_high_score(),
            path.display()
        ),
        None => eprintln!("High score: {} (not saved)", session.final_high_score()),
    }
    eprintln!("Seed: {}", session.seed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("blockfall_play_test_{name}_{nanos}.txt"))
    }

    #[test]
    fn test_readable_high_score_file_is_saved_back() {
        let path = temp_path("readable");
        fs::write(&path, "17").unwrap();
        assert_eq!(load_initial_high_score(&path), (17, Some(path.as_path())));
        fs::remove_file(&path).unwrap();

        let missing = temp_path("missing");
        assert_eq!(load_initial_high_score(&missing), (0, Some(missing.as_path())));
    }

    #[test]
    fn test_unreadable_high_score_file_is_not_saved_over() {
        // A directory exists but cannot be read as a file.
        let path = temp_path("unreadable");
        fs::create_dir(&path).unwrap();
        assert_eq!(load_initial_high_score(&path), (0, None));
        fs::remove_dir(&path).unwrap();
    }

    #[test]
    fn test_parse_tick_rate() {
        assert_eq!(parse_tick_rate("3").map(f64::to_bits), Ok(3.0_f64.to_bits()));
        assert_eq!(parse_tick_rate("0.5").map(f64::to_bits), Ok(0.5_f64.to_bits()));
        assert!(parse_tick_rate("0").is_err());
        assert!(parse_tick_rate("-1").is_err());
        assert!(parse_tick_rate("inf").is_err());
        assert!(parse_tick_rate("fast").is_err());
    }

    #[test]
    fn test_parse_delay() {
        assert_eq!(parse_delay("0").map(f64::to_bits), Ok(0.0_f64.to_bits()));
        assert_eq!(parse_delay("2.5").map(f64::to_bits), Ok(2.5_f64.to_bits()));
        assert!(parse_delay("-0.1").is_err());
        assert!(parse_delay("NaN").is_err());
    }

    #[test]
    fn test_default_matches_clap_defaults() {
        use clap::Parser;

        #[derive(Debug, Parser)]
        struct Wrapper {
            #[clap(flatten)]
            arg: PlayArg,
        }

        let parsed = Wrapper::try_parse_from(["blockfall"]).unwrap().arg;
        let default = PlayArg::default();
        assert_eq!(parsed.tick_rate.to_bits(), default.tick_rate.to_bits());
        assert_eq!(
            parsed.game_over_delay.to_bits(),
            default.game_over_delay.to_bits()
        );
        assert_eq!(parsed.high_score_file, default.high_score_file);
        assert_eq!(parsed.seed, default.seed);
    }

    #[test]
    fn test_parse_seed() {
        use clap::Parser;

        #[derive(Debug, Parser)]
        struct Wrapper {
            #[clap(flatten)]
            arg: PlayArg,
        }

        let parsed = Wrapper::try_parse_from([
            "blockfall",
            "--seed",
            "0123456789abcdeffedcba9876543210",
        ])
        .unwrap();
        assert_eq!(
            parsed.arg.seed.map(|s| s.to_string()).as_deref(),
            Some("0123456789abcdeffedcba9876543210")
        );

        assert!(Wrapper::try_parse_from(["blockfall", "--seed", "xyz"]).is_err());
    }
}
