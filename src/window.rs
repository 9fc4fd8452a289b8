//! Windowed visualizer: a pan/zoom board view plus a player stat table.
//!
//! # Threads
//!
//! ```text
//!  engine thread                         render-driver thread
//!  ─────────────                         ────────────────────
//!  on_turn_end
//!    ├─ capture snapshot ──► SharedSnapshot ◄── load on wake
//!    ├─ notify ──────────► FrameReady ──────► egui event loop ─► repaint
//!    ├─ sleep(turn time)
//!    └─ driver exited? ──► Err(Closed)
//! ```
//!
//! The render driver owns the window, the view transform and the stat table.
//! The engine thread only blocks once, at startup, until the window is up.

mod app;
mod driver;
mod scene;
mod stats;
mod view;

pub use app::WINDOW_TITLE;
pub use driver::{ChannelWake, FrameNotifier, FrameReady, ReadyLatch, RenderDriver, RepaintSignal};
pub use scene::{
    BACKGROUND_COLOR, BOARD_COLOR, CELL_SIZE, GLYPH_SIZE, HEALTH_BAR_BORDER, HEALTH_BAR_HEIGHT,
    HEALTH_LEFT_COLOR, HEALTH_LOST_COLOR, HEALTH_OUTLINE_COLOR, NEUTRAL_COLOR, PLAYER_COLORS, Primitive, build_scene,
    building_fill, cell_rect, glyph_color, health_bar, owner_color,
};
pub use stats::PlayerStatTable;
pub use view::{
    DEFAULT_ZOOM_EXP, MAX_ZOOM_EXP, MIN_ZOOM_EXP, ViewTransform, WHEEL_STEP, ZOOM_BASE, zoom_factor,
};

use crossbeam_channel::Receiver;

use crate::error::{VisualizerError, VisualizerResult};
use crate::host::{Game, TurnEndHandler};
use crate::options::PluginOptions;
use crate::snapshot::{GameSnapshot, SharedSnapshot};

/// Name of the render-driver thread.
const DRIVER_THREAD_NAME: &str = "turnview-render";

/// Turn-end handler that feeds the windowed render driver.
#[derive(Debug)]
pub struct WindowedVisualizer {
    options: PluginOptions,
    shared: SharedSnapshot,
    notifier: FrameNotifier,
    driver: RenderDriver,
}

impl WindowedVisualizer {
    /// Parse `args`, open the window and register with the game.
    ///
    /// Malformed `args` print usage and exit the process with code 2.
    ///
    /// # Errors
    ///
    /// Returns [`VisualizerError::Spawn`] if the window cannot be opened.
    pub fn attach<G: Game>(game: &mut G, args: &str) -> VisualizerResult<()> {
        let options = PluginOptions::parse(args);
        let visualizer = Self::open(game, options)?;
        game.register_turn_end_handler(Box::new(visualizer));
        Ok(())
    }

    /// Open the window for a game without registering.
    ///
    /// Blocks until the render driver reports ready.
    ///
    /// # Errors
    ///
    /// Returns [`VisualizerError::Spawn`] if the window cannot be opened.
    pub fn open<G: Game + ?Sized>(game: &G, options: PluginOptions) -> VisualizerResult<Self> {
        Self::with_driver(game, options, app::run_window)
    }

    /// Start with a custom render-driver body.
    ///
    /// `body` owns the render loop: it must trip the [`ReadyLatch`], then
    /// reload `SharedSnapshot` whenever a [`FrameReady`] arrives. Returning
    /// from it ends the session.
    ///
    /// # Errors
    ///
    /// Returns [`VisualizerError::Spawn`] if the driver never becomes ready.
    pub fn with_driver<G, F>(game: &G, options: PluginOptions, body: F) -> VisualizerResult<Self>
    where
        G: Game + ?Sized,
        F: FnOnce(SharedSnapshot, Receiver<FrameReady>, ReadyLatch) + Send + 'static,
    {
        let shared = SharedSnapshot::new(GameSnapshot::capture(game));
        let driver_snapshot = shared.clone();
        let (driver, notifier) = RenderDriver::spawn(DRIVER_THREAD_NAME, move |frames, ready| {
            body(driver_snapshot, frames, ready);
        })?;
        Ok(Self {
            options,
            shared,
            notifier,
            driver,
        })
    }

    /// The snapshot the renderer currently draws from.
    #[must_use]
    pub fn snapshot(&self) -> &SharedSnapshot {
        &self.shared
    }

    /// Whether the render driver has exited.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.driver.is_finished()
    }
}

impl<G: Game + ?Sized> TurnEndHandler<G> for WindowedVisualizer {
    fn on_turn_end(&mut self, game: &G) -> VisualizerResult<()> {
        self.shared.store(GameSnapshot::capture(game));
        let delivered = self.notifier.notify();

        std::thread::sleep(self.options.turn_delay());

        if !delivered || self.is_closed() {
            tracing::info!(turn = game.turn(), "visualizer window closed");
            return Err(VisualizerError::Closed);
        }
        Ok(())
    }
}
