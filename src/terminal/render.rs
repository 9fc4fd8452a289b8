//! Console layout and drawing for the terminal visualizer.
//!
//! Three fixed regions, stacked from the top-left corner:
//!
//! ```text
//! ┌ field ─────────┐  (height + 1) rows × (width + 1) columns
//! │ C.........     │
//! │ Fw........     │
//! ├ players ───────┤  (players + 1) rows × 80 columns
//! │ name   money   │
//! │ alice  120     │
//! ├ log ───────────┤  2 rows × 10 columns
//! │ >              │
//! └────────────────┘
//! ```

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::host::{BoardSize, Game, PlayerIndex, PlayerView, Renderable};

/// Width of the player stats region.
const PLAYERS_WIDTH: u16 = 80;
/// Size of the log region.
const LOG_WIDTH: u16 = 10;
const LOG_HEIGHT: u16 = 2;
/// Glyph for an empty cell.
pub const EMPTY_GLYPH: char = '.';
/// Log marker frames, advanced once per turn.
const LOG_MARKERS: [char; 4] = ['>', '-', '<', '-'];

/// A foreground color on black, numbered like curses color pairs.
///
/// Pair 0 is the terminal's default colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorPair(pub u8);

impl ColorPair {
    /// Terminal default colors.
    pub const DEFAULT: Self = Self(0);
    /// Neutral objects.
    pub const NEUTRAL: Self = Self(1);

    /// Pair used for an owner. Players without a pair of their own fall back
    /// to [`ColorPair::DEFAULT`].
    #[must_use]
    pub const fn for_owner(owner: Option<PlayerIndex>) -> Self {
        match owner {
            None => Self::NEUTRAL,
            Some(0) => Self(2),
            Some(1) => Self(3),
            Some(2) => Self(4),
            Some(3) => Self(5),
            Some(_) => Self::DEFAULT,
        }
    }

    /// Foreground color of the pair, in curses color order.
    #[must_use]
    pub const fn foreground(self) -> Option<Color> {
        match self.0 {
            1 => Some(Color::Red),
            2 => Some(Color::Green),
            3 => Some(Color::Yellow),
            4 => Some(Color::Blue),
            5 => Some(Color::Magenta),
            6 => Some(Color::Cyan),
            7 => Some(Color::White),
            _ => None,
        }
    }

    /// Style for text drawn in this pair.
    #[must_use]
    pub fn style(self) -> Style {
        match self.foreground() {
            Some(fg) => Style::default().fg(fg).bg(Color::Black),
            None => Style::default(),
        }
    }
}

/// Character and color of one board cell.
#[must_use]
pub fn cell_appearance<R: Renderable + ?Sized>(object: Option<&R>) -> (char, ColorPair) {
    match object {
        None => (EMPTY_GLYPH, ColorPair::DEFAULT),
        Some(o) => (o.glyph(), ColorPair::for_owner(o.owner())),
    }
}

/// Fixed screen regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleLayout {
    /// Board region.
    pub field: Rect,
    /// Player stats region.
    pub players: Rect,
    /// Log region.
    pub log: Rect,
}

impl ConsoleLayout {
    /// Lay out the regions for a board and player count.
    #[must_use]
    pub fn new(board: BoardSize, player_count: usize) -> Self {
        let field_height = board.height.saturating_add(1);
        let field = Rect::new(0, 0, board.width.saturating_add(1), field_height);
        let players_height = u16::try_from(player_count)
            .unwrap_or(u16::MAX)
            .saturating_add(1);
        let players = Rect::new(0, field_height, PLAYERS_WIDTH, players_height);
        let log = Rect::new(
            0,
            field_height.saturating_add(players_height),
            LOG_WIDTH,
            LOG_HEIGHT,
        );
        Self {
            field,
            players,
            log,
        }
    }
}

/// Objects indexed by `y * width + x`. The first object on a cell wins and
/// objects off the board are skipped.
fn occupancy<G: Game + ?Sized>(game: &G, board: BoardSize) -> Vec<Option<&G::Object>> {
    let width = usize::from(board.width);
    let mut grid = vec![None; width * usize::from(board.height)];
    for object in game.objects() {
        let cell = object.cell();
        if board.contains(cell) {
            grid[usize::from(cell.y) * width + usize::from(cell.x)].get_or_insert(object);
        }
    }
    grid
}

/// Draw the board grid.
pub fn render_field<G: Game + ?Sized>(frame: &mut Frame<'_>, area: Rect, game: &G) {
    let board = game.board_size();
    let width = usize::from(board.width);
    let grid = occupancy(game, board);
    let lines: Vec<Line<'_>> = (0..usize::from(board.height))
        .map(|y| {
            let spans: Vec<Span<'_>> = grid[y * width..(y + 1) * width]
                .iter()
                .map(|object| {
                    let (glyph, pair) = cell_appearance(*object);
                    Span::styled(glyph.to_string(), pair.style())
                })
                .collect();
            Line::from(spans)
        })
        .collect();
    render_clipped(frame, area, Paragraph::new(lines));
}

/// Column where the money column starts.
#[must_use]
pub fn money_column<P: PlayerView>(players: &[P]) -> usize {
    let longest = players.iter().map(|p| p.name().chars().count()).max().unwrap_or(0);
    longest.max("name".len()) + 2
}

/// Draw the header row and one colored row per player.
pub fn render_players<G: Game + ?Sized>(frame: &mut Frame<'_>, area: Rect, game: &G) {
    let players = game.players();
    let money_start = money_column(players);

    let mut lines = Vec::with_capacity(players.len() + 1);
    lines.push(Line::from(format!("{:<money_start$}money", "name")));
    for (index, player) in players.iter().enumerate() {
        let style = ColorPair::for_owner(Some(index)).style();
        lines.push(Line::from(vec![
            Span::styled(format!("{:<money_start$}", player.name()), style),
            Span::styled(player.money().to_string(), style),
        ]));
    }
    render_clipped(frame, area, Paragraph::new(lines));
}

/// Marker shown in the log region on a given frame.
#[must_use]
pub const fn log_marker(frame_no: usize) -> char {
    LOG_MARKERS[frame_no % LOG_MARKERS.len()]
}

/// Draw the log region.
pub fn render_log(frame: &mut Frame<'_>, area: Rect, frame_no: usize) {
    render_clipped(
        frame,
        area,
        Paragraph::new(Line::from(log_marker(frame_no).to_string())),
    );
}

fn render_clipped(frame: &mut Frame<'_>, area: Rect, widget: Paragraph<'_>) {
    let visible = area.intersection(frame.area());
    if visible.is_empty() {
        return;
    }
    frame.render_widget(widget, visible);
}
