//! Contract between a host game engine and the visualizers.
//!
//! The engine owns the simulation. Visualizers only read it through these
//! traits, and only from inside a [`TurnEndHandler`] callback that the engine
//! invokes synchronously once per turn.

use serde::{Deserialize, Serialize};

use crate::error::VisualizerResult;

/// Index of a player in [`Game::players`].
pub type PlayerIndex = usize;

/// A board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Column.
    pub x: u16,
    /// Row.
    pub y: u16,
}

impl Cell {
    /// Create a new cell coordinate.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Board dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSize {
    /// Number of columns.
    pub width: u16,
    /// Number of rows.
    pub height: u16,
}

impl BoardSize {
    /// Create a new board size.
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Check if a cell lies on the board.
    #[must_use]
    pub const fn contains(self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// Iterate all cells in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Cell::new(x, y)))
    }
}

/// What kind of thing an object on the board is.
///
/// Every object carries exactly one tag, so glyph and style lookups never
/// have to choose between overlapping matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A player's seat of power.
    Castle,
    /// Trains warriors.
    Barracks,
    /// Produces income.
    Farm,
    /// Impassable obstacle.
    Wall,
    /// Mobile fighting unit.
    Warrior,
}

impl EntityKind {
    /// All kinds, in display-legend order.
    pub const ALL: [Self; 5] = [
        Self::Castle,
        Self::Barracks,
        Self::Farm,
        Self::Wall,
        Self::Warrior,
    ];

    /// Buildings get an outlined footprint in the windowed view.
    #[must_use]
    pub const fn is_building(self) -> bool {
        !matches!(self, Self::Warrior)
    }

    /// Default single-character representation.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Castle => 'C',
            Self::Barracks => 'B',
            Self::Farm => 'F',
            Self::Wall => '#',
            Self::Warrior => 'w',
        }
    }
}

/// Current and maximum hitpoints of an object that takes damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Remaining hitpoints.
    pub hitpoints: u32,
    /// Hitpoints when undamaged.
    pub max_hitpoints: u32,
}

impl Health {
    /// Create a health value.
    #[must_use]
    pub const fn new(hitpoints: u32, max_hitpoints: u32) -> Self {
        Self {
            hitpoints,
            max_hitpoints,
        }
    }

    /// Remaining fraction in `[0, 1]`. A zero maximum counts as empty.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(self) -> f32 {
        if self.max_hitpoints == 0 {
            return 0.0;
        }
        (self.hitpoints.min(self.max_hitpoints) as f32) / (self.max_hitpoints as f32)
    }
}

/// One attribute row of a player's statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStat {
    /// Attribute name, e.g. `money`.
    pub name: String,
    /// Display value.
    pub value: String,
}

impl PlayerStat {
    /// Create a stat entry.
    #[must_use]
    pub fn new(name: impl Into<String>, value: &(impl ToString + ?Sized)) -> Self {
        Self {
            name: name.into(),
            value: value.to_string(),
        }
    }
}

/// An engine object that can be drawn.
pub trait Renderable {
    /// Cell the object occupies.
    fn cell(&self) -> Cell;

    /// Owning player, `None` for neutral objects.
    fn owner(&self) -> Option<PlayerIndex>;

    /// Type tag.
    fn kind(&self) -> EntityKind;

    /// Hitpoints, present only for objects that take damage.
    fn health(&self) -> Option<Health>;

    /// Character drawn for the object.
    fn glyph(&self) -> char {
        self.kind().glyph()
    }
}

/// Read access to a player.
pub trait PlayerView {
    /// Display name.
    fn name(&self) -> &str;

    /// Current money.
    fn money(&self) -> i64;

    /// Ordered attribute list. Every player of a game must report the same
    /// attributes in the same order.
    fn stats(&self) -> Vec<PlayerStat> {
        vec![
            PlayerStat::new("name", self.name()),
            PlayerStat::new("money", &self.money()),
        ]
    }
}

/// Callback invoked by the host at the end of every turn.
pub trait TurnEndHandler<G: ?Sized> {
    /// Observe the game after a turn has been applied.
    ///
    /// # Errors
    ///
    /// [`VisualizerError::Closed`](crate::VisualizerError::Closed) asks the
    /// host to stop calling this handler. Other errors are failures.
    fn on_turn_end(&mut self, game: &G) -> VisualizerResult<()>;
}

/// The host engine as seen by a visualizer.
pub trait Game {
    /// Object type stored on the board.
    type Object: Renderable;
    /// Player type.
    type Player: PlayerView;

    /// Board dimensions.
    fn board_size(&self) -> BoardSize;

    /// Number of turns played so far.
    fn turn(&self) -> u64;

    /// Every renderable object currently alive.
    fn objects(&self) -> &[Self::Object];

    /// Every player, indexed by [`PlayerIndex`].
    fn players(&self) -> &[Self::Player];

    /// The object occupying a board cell, if any.
    fn object_at(&self, cell: Cell) -> Option<&Self::Object> {
        self.objects().iter().find(|o| o.cell() == cell)
    }

    /// Install a handler to be invoked after every turn.
    fn register_turn_end_handler(&mut self, handler: Box<dyn TurnEndHandler<Self>>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_building() {
        assert!(EntityKind::Castle.is_building());
        assert!(EntityKind::Wall.is_building());
        assert!(!EntityKind::Warrior.is_building());
    }

    #[test]
    fn test_kind_glyphs_distinct() {
        let mut glyphs: Vec<char> = EntityKind::ALL.iter().map(|k| k.glyph()).collect();
        glyphs.sort_unstable();
        glyphs.dedup();
        assert_eq!(glyphs.len(), EntityKind::ALL.len());
    }

    #[test]
    fn test_health_fraction() {
        assert!((Health::new(50, 100).fraction() - 0.5).abs() < f32::EPSILON);
        assert!((Health::new(100, 100).fraction() - 1.0).abs() < f32::EPSILON);
        assert!(Health::new(0, 100).fraction().abs() < f32::EPSILON);
        assert!(Health::new(5, 0).fraction().abs() < f32::EPSILON);
    }

    #[test]
    fn test_board_cells_row_major() {
        let cells: Vec<Cell> = BoardSize::new(2, 2).cells().collect();
        assert_eq!(
            cells,
            vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(0, 1), Cell::new(1, 1)]
        );
        assert!(BoardSize::new(2, 2).contains(Cell::new(1, 1)));
        assert!(!BoardSize::new(2, 2).contains(Cell::new(2, 0)));
    }
}
