//! Terminal visualizer: colored ASCII board drawn in the console.
//!
//! Everything runs on the engine's thread. The turn-end callback draws the
//! whole frame, then sleeps for the turn time, and only then returns.

mod render;
mod session;

pub use render::{
    ColorPair, ConsoleLayout, EMPTY_GLYPH, cell_appearance, log_marker, money_column,
    render_field, render_log, render_players,
};
pub use session::TerminalSession;

use std::io::{self, Stdout};

use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};

use crate::error::VisualizerResult;
use crate::host::{Game, TurnEndHandler};
use crate::options::PluginOptions;

/// Turn-end handler that redraws the console.
#[derive(Debug)]
pub struct TerminalVisualizer<B: Backend = CrosstermBackend<Stdout>> {
    // Field order matters: the terminal must be dropped before the session
    // restores the screen.
    terminal: Terminal<B>,
    session: Option<TerminalSession>,
    options: PluginOptions,
    layout: ConsoleLayout,
    frames_drawn: usize,
}

impl TerminalVisualizer {
    /// Parse `args`, take over the console and register with the game.
    ///
    /// Malformed `args` print usage and exit the process with code 2.
    ///
    /// # Errors
    ///
    /// Returns an error if the console cannot be switched to drawing mode.
    pub fn attach<G: Game>(game: &mut G, args: &str) -> VisualizerResult<()> {
        let options = PluginOptions::parse(args);
        let visualizer = Self::open(game, options)?;
        game.register_turn_end_handler(Box::new(visualizer));
        Ok(())
    }

    /// Take over the console for a game without registering.
    ///
    /// # Errors
    ///
    /// Returns an error if the console cannot be switched to drawing mode.
    pub fn open<G: Game + ?Sized>(game: &G, options: PluginOptions) -> io::Result<Self> {
        let session = TerminalSession::acquire()?;
        let terminal = session.terminal()?;
        let mut visualizer = Self::with_terminal(terminal, game, options);
        visualizer.session = Some(session);
        visualizer.terminal.clear()?;
        Ok(visualizer)
    }
}

impl<B: Backend> TerminalVisualizer<B> {
    /// Draw through an existing ratatui terminal. The caller keeps
    /// responsibility for the console mode.
    #[must_use]
    pub fn with_terminal<G: Game + ?Sized>(
        terminal: Terminal<B>,
        game: &G,
        options: PluginOptions,
    ) -> Self {
        Self {
            terminal,
            session: None,
            options,
            layout: ConsoleLayout::new(game.board_size(), game.players().len()),
            frames_drawn: 0,
        }
    }

    /// Region layout, fixed for the session.
    #[must_use]
    pub const fn layout(&self) -> ConsoleLayout {
        self.layout
    }

    /// The underlying ratatui terminal.
    #[must_use]
    pub const fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Draw the field, the player stats and the log marker.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the console fails.
    pub fn draw<G: Game + ?Sized>(&mut self, game: &G) -> io::Result<()> {
        let layout = self.layout;
        let frame_no = self.frames_drawn;
        self.terminal.draw(|frame| {
            render_field(frame, layout.field, game);
            render_players(frame, layout.players, game);
            render_log(frame, layout.log, frame_no);
        })?;
        self.frames_drawn += 1;
        Ok(())
    }
}

impl<G: Game + ?Sized, B: Backend> TurnEndHandler<G> for TerminalVisualizer<B> {
    fn on_turn_end(&mut self, game: &G) -> VisualizerResult<()> {
        self.draw(game)?;
        std::thread::sleep(self.options.turn_delay());
        Ok(())
    }
}
