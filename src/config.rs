//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

use crate::schedule::{Schedule, ScheduleBlock, ScheduleError};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "interval-timer")]
#[command(about = "An interval-training timer with work/rest schedules")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Schedule block as WORK:REST:DURATION in seconds; repeat for more blocks
    #[arg(short, long = "block", value_name = "WORK:REST:DURATION", default_value = "7:4:20")]
    pub blocks: Vec<ScheduleBlock>,

    /// Milliseconds between timer reconciliations
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(10..))]
    pub tick_ms: u64,

    /// Start the timer as soon as the server is up
    #[arg(long)]
    pub autostart: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Build the session schedule from the configured blocks
    pub fn schedule(&self) -> Result<Schedule, ScheduleError> {
        let schedule = Schedule::new(self.blocks.clone());
        schedule.ensure_usable()?;
        Ok(schedule)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_single_block() {
        let config = Config::try_parse_from(["interval-timer"]).unwrap();
        assert_eq!(config.port, 20554);
        assert_eq!(config.address(), "0.0.0.0:20554");
        assert_eq!(config.tick_period(), Duration::from_secs(1));
        assert!(!config.autostart);
        assert_eq!(config.log_level(), "info");

        let schedule = config.schedule().unwrap();
        assert_eq!(schedule.blocks(), &[ScheduleBlock::new(7.0, 4.0, 20.0).unwrap()]);
    }

    #[test]
    fn repeated_blocks_keep_order() {
        let config = Config::try_parse_from([
            "interval-timer", "-b", "30:10:120", "--block", "20:0:60", "--autostart", "-v",
        ])
        .unwrap();
        let schedule = config.schedule().unwrap();
        assert_eq!(schedule.session_duration(), 180.0);
        assert_eq!(schedule.blocks()[1].rest(), 0.0);
        assert!(config.autostart);
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn rejects_invalid_blocks() {
        assert!(Config::try_parse_from(["interval-timer", "-b", "0:4:20"]).is_err());
        assert!(Config::try_parse_from(["interval-timer", "-b", "7-4-20"]).is_err());
        assert!(Config::try_parse_from(["interval-timer", "--tick-ms", "0"]).is_err());
    }
}
