//! Watch command implementation - runs the demo host with a visualizer.

#![allow(clippy::needless_pass_by_value)]

use std::path::PathBuf;

use turnview::sandbox::{RunOutcome, Sandbox, SandboxConfig};
use turnview::{Game, JsonLinesRecorder, TerminalVisualizer, WindowedVisualizer};

use super::{CliError, VisualizerKind, logging};

/// Settings for one watch session.
#[derive(Debug, Clone)]
pub(crate) struct WatchArgs {
    pub(crate) visualizer: VisualizerKind,
    pub(crate) seed: Option<u64>,
    pub(crate) turns: u64,
    pub(crate) players: usize,
    pub(crate) width: u16,
    pub(crate) height: u16,
    pub(crate) plugin_args: String,
    pub(crate) log_file: Option<PathBuf>,
    pub(crate) verbose: bool,
}

/// Execute the watch command.
///
/// # Errors
///
/// Returns an error if the game cannot be set up or a visualizer fails.
pub(crate) fn execute(args: WatchArgs) -> Result<(), CliError> {
    logging::init(args.visualizer, args.log_file.as_deref(), args.verbose)?;

    // Generate seed if not provided
    let seed = args.seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(42)
    });

    let config = SandboxConfig {
        width: args.width,
        height: args.height,
        players: args.players,
        max_turns: args.turns,
        seed,
    };
    let mut game = Sandbox::new(&config)?;
    tracing::info!(
        seed,
        width = config.width,
        height = config.height,
        players = config.players,
        visualizer = ?args.visualizer,
        "starting game"
    );

    match args.visualizer {
        VisualizerKind::Window => WindowedVisualizer::attach(&mut game, &args.plugin_args)?,
        VisualizerKind::Terminal => TerminalVisualizer::attach(&mut game, &args.plugin_args)?,
        VisualizerKind::Json => JsonLinesRecorder::attach(&mut game, &args.plugin_args),
    }

    let result = game.run();
    // Restores the console before anything is printed.
    game.clear_turn_end_handlers();
    let outcome = result?;

    tracing::info!(?outcome, "game over");
    report(&game, outcome);
    Ok(())
}

/// Print the result summary to stderr, keeping stdout for recordings.
fn report(game: &Sandbox, outcome: RunOutcome) {
    match outcome {
        RunOutcome::Finished {
            turns,
            winner: Some(winner),
        } => {
            let name = &game.players()[winner].name;
            eprintln!("Game over after {turns} turns: {name} wins");
        }
        RunOutcome::Finished {
            turns,
            winner: None,
        } => {
            eprintln!("Game over after {turns} turns: no winner");
        }
        RunOutcome::VisualizersClosed { turns } => {
            eprintln!("Visualizer closed after {turns} turns");
        }
    }
    for player in game.players() {
        let status = if player.alive { "alive" } else { "out" };
        eprintln!(
            "  {:<8} money {:>6}  warriors {:>3}  buildings {:>3}  {status}",
            player.name, player.money, player.warriors, player.buildings
        );
    }
}
