//! CLI command implementations for Turnview.

pub(crate) mod logging;
pub(crate) mod watch;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;

/// Visualizer attached by the `watch` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum VisualizerKind {
    /// Pan/zoom window with a stats table.
    Window,
    /// Colored ASCII board in the console.
    Terminal,
    /// One JSON snapshot per turn on stdout.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<turnview::SandboxError> for CliError {
    fn from(e: turnview::SandboxError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<turnview::VisualizerError> for CliError {
    fn from(e: turnview::VisualizerError) -> Self {
        Self::new(e.to_string())
    }
}
