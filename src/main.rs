//! Turnview CLI - run the demo game with a turn-end visualizer attached.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use turnview::sandbox::{MAX_BOARD_SIDE, MAX_PLAYERS, MIN_BOARD_SIDE, MIN_PLAYERS};

/// Turnview - turn-end visualizers for grid strategy games
#[derive(Parser, Debug)]
#[command(name = "turnview")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the demo game and watch it turn by turn
    Watch {
        /// Visualizer to attach
        #[arg(short, long, value_enum, default_value = "window")]
        visualizer: cli::VisualizerKind,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Maximum turns (default: 500)
        #[arg(long, default_value = "500")]
        turns: u64,

        /// Number of players
        #[arg(short, long, default_value = "2", value_parser = parse_players)]
        players: usize,

        /// Board width in cells
        #[arg(long, default_value = "16",
              value_parser = clap::value_parser!(u16).range(i64::from(MIN_BOARD_SIDE)..=i64::from(MAX_BOARD_SIDE)))]
        width: u16,

        /// Board height in cells
        #[arg(long, default_value = "12",
              value_parser = clap::value_parser!(u16).range(i64::from(MIN_BOARD_SIDE)..=i64::from(MAX_BOARD_SIDE)))]
        height: u16,

        /// Option string handed to the visualizer, e.g. "-t 0.2"
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        plugin_args: String,

        /// Write logs to this file
        #[arg(long)]
        log_file: Option<std::path::PathBuf>,

        /// Log debug events
        #[arg(long)]
        verbose: bool,
    },
}

fn parse_players(s: &str) -> Result<usize, String> {
    let count: usize = s.parse().map_err(|_| format!("invalid player count: '{s}'"))?;
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
        return Err(format!("{count} is not in {MIN_PLAYERS}..={MAX_PLAYERS}"));
    }
    Ok(count)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Watch {
            visualizer,
            seed,
            turns,
            players,
            width,
            height,
            plugin_args,
            log_file,
            verbose,
        } => cli::watch::execute(cli::watch::WatchArgs {
            visualizer,
            seed,
            turns,
            players,
            width,
            height,
            plugin_args,
            log_file,
            verbose,
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_count_range() {
        assert_eq!(parse_players("2"), Ok(2));
        assert_eq!(parse_players("4"), Ok(4));
        assert!(parse_players("1").is_err());
        assert!(parse_players("5").is_err());
        assert!(parse_players("two").is_err());
    }
}
