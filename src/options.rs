//! Plugin option string parsing.
//!
//! Hosts hand every plugin a single string of whitespace-separated tokens,
//! parsed like a command line:
//!
//! ```text
//! --turn-time 0.25
//! -t 1
//! ```

use std::time::Duration;

use clap::Parser;

/// Default pause after each turn, in seconds.
pub const DEFAULT_TURN_TIME: f64 = 0.1;

/// Options shared by every visualizer plugin.
#[derive(Parser, Debug, Clone, Copy, PartialEq)]
#[command(name = "visualizer", no_binary_name = true, disable_version_flag = true)]
pub struct PluginOptions {
    /// Delay between turns in seconds
    #[arg(short = 't', long = "turn-time", default_value_t = DEFAULT_TURN_TIME, value_parser = parse_turn_time)]
    pub turn_time: f64,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            turn_time: DEFAULT_TURN_TIME,
        }
    }
}

impl PluginOptions {
    /// Parse an option string, exiting the process on malformed input.
    ///
    /// Usage errors print the usage message to stderr and exit with code 2;
    /// `--help` prints help and exits with code 0.
    #[must_use]
    pub fn parse(args: &str) -> Self {
        Self::try_parse(args).unwrap_or_else(|e| e.exit())
    }

    /// Parse an option string without terminating the process.
    ///
    /// # Errors
    ///
    /// Returns the clap error describing the malformed token.
    pub fn try_parse(args: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(args.split_whitespace())
    }

    /// Pause applied after each turn.
    #[must_use]
    pub fn turn_delay(self) -> Duration {
        Duration::try_from_secs_f64(self.turn_time).unwrap_or(Duration::MAX)
    }
}

fn parse_turn_time(s: &str) -> Result<f64, String> {
    let secs: f64 = s.parse().map_err(|_| format!("invalid float value: '{s}'"))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(format!("turn time must be a non-negative number of seconds, got {s}"));
    }
    Ok(secs)
}
