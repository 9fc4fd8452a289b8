//! Error types shared by every visualizer.

use std::fmt;
use std::io;

/// Errors a visualizer can hand back to the host from a turn-end callback.
#[derive(Debug)]
pub enum VisualizerError {
    /// The render driver has exited (the user closed the window).
    ///
    /// This is the normal way a windowed session ends. The host should stop
    /// invoking the handler that returned it.
    Closed,
    /// Drawing to the console or writing a recording failed.
    Io(io::Error),
    /// The render-driver thread could not be started or never became ready.
    Spawn(String),
}

impl VisualizerError {
    /// Whether this error only signals that the visualizer went away.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl fmt::Display for VisualizerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "visualizer closed"),
            Self::Io(e) => write!(f, "visualizer I/O error: {e}"),
            Self::Spawn(reason) => write!(f, "render driver failed to start: {reason}"),
        }
    }
}

impl std::error::Error for VisualizerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Closed | Self::Spawn(_) => None,
        }
    }
}

impl From<io::Error> for VisualizerError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Result type for turn-end callbacks.
pub type VisualizerResult<T> = Result<T, VisualizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_display() {
        let err = VisualizerError::Closed;
        assert!(err.is_closed());
        assert_eq!(err.to_string(), "visualizer closed");
    }

    #[test]
    fn test_io_error_source() {
        let err = VisualizerError::from(io::Error::other("broken pipe"));
        assert!(!err.is_closed());
        assert!(err.to_string().contains("broken pipe"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
