//! Command-line configuration and logging setup

use crate::interpreter::constants::DEFAULT_STACK_LIMIT;
use clap::Parser;
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

/// Terminal editor and stepper for a two-dimensional Befunge-style language
#[derive(Debug, Clone, Parser)]
#[command(name = "fungeputer", version, about)]
pub struct Config {
    /// Program image to load at startup and to save to
    #[arg(default_value = "prog")]
    pub program: PathBuf,

    /// Start from a plain-text source file instead of the program image
    #[arg(long, value_name = "FILE")]
    pub import: Option<PathBuf>,

    /// Delay between autoplay steps, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 50)]
    pub interval_ms: u64,

    /// Seed for the `?` instruction (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum operand stack depth
    #[arg(long, value_name = "N", default_value_t = DEFAULT_STACK_LIMIT)]
    pub stack_limit: usize,

    /// Give up on a save or load after this many milliseconds
    #[arg(long, value_name = "MS", default_value_t = 2000)]
    pub storage_timeout_ms: u64,

    /// Do not load the program image at startup
    #[arg(long)]
    pub no_autoload: bool,

    /// Write logs to this file (the terminal is taken by the UI)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Most verbose level to log: error, warn, info, debug or trace
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: tracing::Level,
}

impl Config {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }

    pub fn storage_timeout(&self) -> Duration {
        Duration::from_millis(self.storage_timeout_ms)
    }
}

/// Install the global log subscriber if a log file was requested
pub fn init_logging(config: &Config) -> io::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(config.log_level)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse_from(["fungeputer"]);
        assert_eq!(config.program, PathBuf::from("prog"));
        assert_eq!(config.interval(), Duration::from_millis(50));
        assert_eq!(config.stack_limit, DEFAULT_STACK_LIMIT);
        assert!(!config.no_autoload);
        assert_eq!(config.log_level, tracing::Level::INFO);
    }

    #[test]
    fn test_overrides() {
        let config = Config::parse_from([
            "fungeputer",
            "demo.bfg",
            "--interval-ms",
            "200",
            "--seed",
            "7",
            "--log-level",
            "debug",
        ]);
        assert_eq!(config.program, PathBuf::from("demo.bfg"));
        assert_eq!(config.interval(), Duration::from_millis(200));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.log_level, tracing::Level::DEBUG);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let config = Config::parse_from(["fungeputer", "--interval-ms", "0"]);
        assert_eq!(config.interval(), Duration::from_millis(1));
    }
}
