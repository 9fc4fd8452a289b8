//! Headless visualizer that records every turn as a JSON line.
//!
//! Each line is one [`GameSnapshot`]:
//!
//! ```text
//! {"turn":1,"board":{"width":16,"height":12},"objects":[...],"players":[...]}
//! {"turn":2,...}
//! ```

use std::io::{self, Write};

use crate::error::VisualizerResult;
use crate::host::{Game, TurnEndHandler};
use crate::options::PluginOptions;
use crate::snapshot::GameSnapshot;

/// Turn-end handler that writes snapshots to a sink.
#[derive(Debug)]
pub struct JsonLinesRecorder<W: Write> {
    sink: W,
    options: PluginOptions,
    lines_written: u64,
}

impl JsonLinesRecorder<io::Stdout> {
    /// Parse `args` and record to stdout.
    ///
    /// Malformed `args` print usage and exit the process with code 2.
    pub fn attach<G: Game>(game: &mut G, args: &str) {
        let options = PluginOptions::parse(args);
        game.register_turn_end_handler(Box::new(Self::new(io::stdout(), options)));
    }
}

impl<W: Write> JsonLinesRecorder<W> {
    /// Record into any writer.
    #[must_use]
    pub const fn new(sink: W, options: PluginOptions) -> Self {
        Self {
            sink,
            options,
            lines_written: 0,
        }
    }

    /// Number of turns recorded.
    #[must_use]
    pub const fn lines_written(&self) -> u64 {
        self.lines_written
    }

    /// Give back the sink.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Write one snapshot line.
    ///
    /// # Errors
    ///
    /// Returns an error if serializing or writing fails.
    pub fn record(&mut self, snapshot: &GameSnapshot) -> io::Result<()> {
        serde_json::to_writer(&mut self.sink, snapshot)?;
        self.sink.write_all(b"\n")?;
        self.sink.flush()?;
        self.lines_written += 1;
        Ok(())
    }
}

impl<G: Game + ?Sized, W: Write> TurnEndHandler<G> for JsonLinesRecorder<W> {
    fn on_turn_end(&mut self, game: &G) -> VisualizerResult<()> {
        self.record(&GameSnapshot::capture(game))?;
        std::thread::sleep(self.options.turn_delay());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::BoardSize;

    #[test]
    fn test_one_line_per_snapshot() {
        let mut recorder = JsonLinesRecorder::new(Vec::new(), PluginOptions::default());
        let mut snapshot = GameSnapshot::empty(BoardSize::new(3, 2));
        recorder.record(&snapshot).unwrap();
        snapshot.turn = 1;
        recorder.record(&snapshot).unwrap();

        assert_eq!(recorder.lines_written(), 2);
        let text = String::from_utf8(recorder.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let value: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(value["turn"], 1);
        assert_eq!(value["board"]["width"], 3);
    }
}
