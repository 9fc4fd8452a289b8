//! Log subscriber setup.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;

use super::{CliError, VisualizerKind};

/// Install the global fmt subscriber.
///
/// The terminal visualizer owns the console, so it only logs when a file is
/// given. Everything else logs to stderr unless a file is given.
///
/// # Errors
///
/// Returns an error if the log file cannot be created.
pub(crate) fn init(
    visualizer: VisualizerKind,
    log_file: Option<&Path>,
    verbose: bool,
) -> Result<(), CliError> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let builder = tracing_subscriber::fmt().with_max_level(level);

    match log_file {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                CliError::new(format!("Failed to create {}: {e}", path.display()))
            })?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| CliError::new(e.to_string()))
        }
        None if visualizer == VisualizerKind::Terminal => Ok(()),
        None => builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| CliError::new(e.to_string())),
    }
}
