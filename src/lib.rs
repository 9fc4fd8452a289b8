// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Turnview: turn-end visualizers for grid strategy game engines.
//!
//! A host engine calls back into a visualizer once per turn. Two
//! visualizers are provided, plus a headless recorder:
//! - [`WindowedVisualizer`] opens a pan/zoom window with health bars and a
//!   player statistics table, drawn by its own render thread.
//! - [`TerminalVisualizer`] draws a colored ASCII board in the console.
//! - [`JsonLinesRecorder`] writes one JSON snapshot per turn.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Host engine (e.g. Sandbox)        │
//! ├─────────────────────────────────────┤
//! │   TurnEndHandler callbacks          │
//! ├──────────────┬──────────┬───────────┤
//! │ window       │ terminal │ record    │
//! │ (egui thread)│ (ratatui)│ (JSON)    │
//! └──────────────┴──────────┴───────────┘
//! ```

pub mod error;
pub mod host;
pub mod options;
pub mod record;
pub mod sandbox;
pub mod snapshot;
pub mod terminal;
pub mod window;

pub use error::{VisualizerError, VisualizerResult};
pub use host::{
    BoardSize, Cell, EntityKind, Game, Health, PlayerIndex, PlayerStat, PlayerView, Renderable,
    TurnEndHandler,
};
pub use options::PluginOptions;
pub use record::JsonLinesRecorder;
pub use sandbox::{RunOutcome, Sandbox, SandboxConfig, SandboxError};
pub use snapshot::{GameSnapshot, SharedSnapshot};
pub use terminal::TerminalVisualizer;
pub use window::WindowedVisualizer;
