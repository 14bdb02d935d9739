//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "focus-time")]
#[command(about = "A focus timer with lap tracking")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Directory holding the task list and lap history documents
    #[arg(short, long, default_value = "focus-time-data")]
    pub data_dir: PathBuf,

    /// Timer refresh cadence in milliseconds
    #[arg(long, default_value = "100", value_parser = clap::value_parser!(u64).range(10..))]
    pub tick_ms: u64,

    /// Print the timer every time the displayed seconds change
    #[arg(short, long)]
    pub live: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["focus-time"]).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("focus-time-data"));
        assert_eq!(config.tick_period(), Duration::from_millis(100));
        assert!(!config.live);
        assert_eq!(config.log_level(), "warn");
    }

    #[test]
    fn overrides() {
        let args = [
            "focus-time", "--data-dir", "/tmp/ft", "--tick-ms", "250", "-l", "-v",
        ];
        let config = Config::try_parse_from(args).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/ft"));
        assert_eq!(config.tick_ms, 250);
        assert!(config.live);
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn rejects_tiny_tick() {
        assert!(Config::try_parse_from(["focus-time", "--tick-ms", "1"]).is_err());
    }
}
