//! Runner configuration.
//!
//! Settings are layered: built-in defaults, then an optional JSON file, then command-line flags
//! (several of which can also come from `PUZZLETRIS_*` environment variables).

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::core::{BoardSize, SessionConfig};
use crate::types::{ShapeKind, MAX_BOARD_DIM, MIN_BOARD_HEIGHT, MIN_BOARD_WIDTH};

#[derive(Debug, Parser)]
#[command(name = "puzzletris", about = "Falling-block puzzle in the terminal")]
pub struct Cli {
    #[arg(short = 'c', long, env = "PUZZLETRIS_CONFIG", help = "Path to a JSON config file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Board width in cells (even, 6-64)")]
    pub width: Option<u8>,

    #[arg(long, help = "Board height in cells (even, 4-64)")]
    pub height: Option<u8>,

    #[arg(long, help = "Gravity interval in milliseconds")]
    pub gravity_ms: Option<u64>,

    #[arg(long, env = "PUZZLETRIS_SEED", help = "Seed for random shape draws")]
    pub seed: Option<u32>,

    #[arg(long, value_delimiter = ',', help = "Scripted shape order, e.g. P,T,I")]
    pub sequence: Option<Vec<String>>,

    #[arg(long, help = "Draw shapes at random instead of from the script")]
    pub random: bool,

    #[arg(long, help = "Repeat the last scripted shape instead of looping")]
    pub hold_last: bool,

    #[arg(long, help = "Start from an empty board instead of the puzzle preset")]
    pub empty_board: bool,

    #[arg(long, help = "Hide the key help in the side panel")]
    pub no_key_help: bool,

    #[arg(long, env = "PUZZLETRIS_LOG", help = "Write logs to this file")]
    pub log_file: Option<PathBuf>,

    #[arg(short = 'v', long, action = clap::ArgAction::Count, help = "Increase log verbosity (default INFO, -v = DEBUG, -vv = TRACE)")]
    pub verbose: u8,
}

/// On-disk settings. Every field is optional and overrides the default it names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub width: Option<u8>,
    pub height: Option<u8>,
    pub gravity_ms: Option<u64>,
    pub sequence: Option<Vec<String>>,
    pub use_sequence: Option<bool>,
    pub loop_sequence: Option<bool>,
    pub seed: Option<u32>,
    /// Rows top first, `#` occupied.
    pub preset: Option<Vec<String>>,
    /// `false` starts from an empty board.
    pub use_preset: Option<bool>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parse config file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Overlay these settings onto `config`.
    pub fn apply(&self, config: &mut SessionConfig) -> Result<()> {
        apply_board(config, self.width, self.height)?;
        if let Some(ms) = self.gravity_ms {
            config.gravity = gravity(ms)?;
        }
        if let Some(names) = &self.sequence {
            config.sequence.shapes = parse_shapes(names)?;
        }
        if let Some(use_sequence) = self.use_sequence {
            config.sequence.use_sequence = use_sequence;
        }
        if let Some(loop_sequence) = self.loop_sequence {
            config.sequence.loop_sequence = loop_sequence;
        }
        if let Some(seed) = self.seed {
            config.sequence.seed = seed;
        }
        if let Some(rows) = &self.preset {
            config.preset = Some(rows.clone());
        }
        if self.use_preset == Some(false) {
            config.preset = None;
        }
        Ok(())
    }
}

impl Cli {
    /// Defaults, then the config file, then flags.
    pub fn session_config(&self) -> Result<SessionConfig> {
        let mut config = SessionConfig::default();

        if let Some(path) = &self.config {
            FileConfig::load(path)?.apply(&mut config)?;
        }

        apply_board(&mut config, self.width, self.height)?;
        if let Some(ms) = self.gravity_ms {
            config.gravity = gravity(ms)?;
        }
        if let Some(seed) = self.seed {
            config.sequence.seed = seed;
        }
        if let Some(names) = &self.sequence {
            config.sequence.shapes = parse_shapes(names)?;
            config.sequence.use_sequence = true;
        }
        if self.random {
            config.sequence.use_sequence = false;
        }
        if self.hold_last {
            config.sequence.loop_sequence = false;
        }
        if self.empty_board {
            config.preset = None;
        }

        Ok(config)
    }

    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

fn apply_board(config: &mut SessionConfig, width: Option<u8>, height: Option<u8>) -> Result<()> {
    if width.is_none() && height.is_none() {
        return Ok(());
    }
    let width = width.unwrap_or(config.board.width());
    let height = height.unwrap_or(config.board.height());
    config.board = BoardSize::new(width, height).ok_or_else(|| {
        anyhow!(
            "invalid board size {}x{}: both sides must be even, width {}-{}, height {}-{}",
            width,
            height,
            MIN_BOARD_WIDTH,
            MAX_BOARD_DIM,
            MIN_BOARD_HEIGHT,
            MAX_BOARD_DIM
        )
    })?;
    Ok(())
}

fn gravity(ms: u64) -> Result<Duration> {
    if ms == 0 {
        bail!("gravity interval must be at least 1ms");
    }
    Ok(Duration::from_millis(ms))
}

/// Parse shape letters, rejecting anything unknown.
pub fn parse_shapes<S: AsRef<str>>(names: &[S]) -> Result<Vec<ShapeKind>> {
    names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            ShapeKind::from_str(name).ok_or_else(|| anyhow!("unknown shape {:?}", name))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("puzzletris").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_flags_gives_defaults() {
        let config = cli(&[]).session_config().unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn flags_override_defaults() {
        let config = cli(&[
            "--width",
            "12",
            "--gravity-ms",
            "250",
            "--sequence",
            "i,o,p",
            "--hold-last",
            "--empty-board",
        ])
        .session_config()
        .unwrap();

        assert_eq!(config.board, BoardSize::new(12, 20).unwrap());
        assert_eq!(config.gravity, Duration::from_millis(250));
        assert_eq!(
            config.sequence.shapes,
            vec![ShapeKind::I, ShapeKind::O, ShapeKind::P]
        );
        assert!(!config.sequence.loop_sequence);
        assert!(config.preset.is_none());
    }

    #[test]
    fn random_flag_disables_script() {
        let config = cli(&["--random", "--seed", "42"]).session_config().unwrap();
        assert!(!config.sequence.use_sequence);
        assert_eq!(config.sequence.seed, 42);
    }

    #[test]
    fn invalid_values_are_errors() {
        assert!(cli(&["--width", "11"]).session_config().is_err());
        assert!(cli(&["--gravity-ms", "0"]).session_config().is_err());
        assert!(cli(&["--sequence", "I,X"]).session_config().is_err());
    }

    #[test]
    fn boards_too_small_for_every_shape_are_rejected() {
        let err = cli(&["--width", "4"]).session_config().unwrap_err();
        assert!(err.to_string().contains("4x20"));
        assert!(cli(&["--height", "2"]).session_config().is_err());
        assert!(cli(&["--width", "6", "--height", "4"]).session_config().is_ok());
    }

    #[test]
    fn file_config_applies_over_defaults() {
        let file = FileConfig::parse(
            r#"{ "width": 6, "height": 8, "sequence": ["T"], "loop_sequence": false, "use_preset": false }"#,
        )
        .unwrap();
        let mut config = SessionConfig::default();
        file.apply(&mut config).unwrap();

        assert_eq!(config.board, BoardSize::new(6, 8).unwrap());
        assert_eq!(config.sequence.shapes, vec![ShapeKind::T]);
        assert!(!config.sequence.loop_sequence);
        assert!(config.preset.is_none());
    }

    #[test]
    fn file_config_rejects_unknown_fields() {
        assert!(FileConfig::parse(r#"{ "colour": "red" }"#).is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = FileConfig::load(Path::new("/nonexistent/puzzletris.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/puzzletris.json"));
    }

    #[test]
    fn key_help_is_shown_unless_disabled() {
        assert!(!cli(&[]).no_key_help);
        assert!(cli(&["--no-key-help"]).no_key_help);
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(cli(&[]).log_level(), Level::INFO);
        assert_eq!(cli(&["-v"]).log_level(), Level::DEBUG);
        assert_eq!(cli(&["-vvv"]).log_level(), Level::TRACE);
    }
}
