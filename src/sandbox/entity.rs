//! Objects and players of the demo host.

use crate::host::{BoardSize, Cell, EntityKind, Health, PlayerIndex, PlayerStat, PlayerView, Renderable};

/// Unique identifier for an object.
pub type EntityId = u32;

/// Starting hitpoints per kind. Zero means indestructible.
#[must_use]
pub const fn max_hitpoints(kind: EntityKind) -> u32 {
    match kind {
        EntityKind::Castle => 200,
        EntityKind::Barracks => 120,
        EntityKind::Farm => 80,
        EntityKind::Wall => 0,
        EntityKind::Warrior => 30,
    }
}

/// Something standing on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// Occupied cell.
    pub cell: Cell,
    /// Owning player, `None` = neutral.
    pub owner: Option<PlayerIndex>,
    /// Type tag.
    pub kind: EntityKind,
    /// Remaining hitpoints.
    pub hitpoints: u32,
}

impl Entity {
    /// Create an undamaged entity.
    #[must_use]
    pub const fn new(id: EntityId, cell: Cell, owner: Option<PlayerIndex>, kind: EntityKind) -> Self {
        Self {
            id,
            cell,
            owner,
            kind,
            hitpoints: max_hitpoints(kind),
        }
    }

    /// Whether attacks can hurt this entity.
    #[must_use]
    pub const fn takes_damage(&self) -> bool {
        max_hitpoints(self.kind) > 0
    }

    /// Whether the entity has been destroyed.
    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.takes_damage() && self.hitpoints == 0
    }

    /// Apply damage.
    pub fn damage(&mut self, amount: u32) {
        if self.takes_damage() {
            self.hitpoints = self.hitpoints.saturating_sub(amount);
        }
    }

    /// Whether `other` belongs to a different player.
    ///
    /// Neutral entities are nobody's enemy.
    #[must_use]
    pub fn is_enemy_of(&self, other: &Self) -> bool {
        matches!((self.owner, other.owner), (Some(a), Some(b)) if a != b)
    }
}

impl Renderable for Entity {
    fn cell(&self) -> Cell {
        self.cell
    }

    fn owner(&self) -> Option<PlayerIndex> {
        self.owner
    }

    fn kind(&self) -> EntityKind {
        self.kind
    }

    fn health(&self) -> Option<Health> {
        self.takes_damage()
            .then(|| Health::new(self.hitpoints, max_hitpoints(self.kind)))
    }
}

/// State for a single player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Display name.
    pub name: String,
    /// Treasury.
    pub money: i64,
    /// Whether the player still has a castle.
    pub alive: bool,
    /// Money earned last turn.
    pub income: i64,
    /// Warriors on the board.
    pub warriors: u32,
    /// Buildings on the board.
    pub buildings: u32,
}

impl Player {
    /// Create a new player.
    #[must_use]
    pub fn new(name: impl Into<String>, money: i64) -> Self {
        Self {
            name: name.into(),
            money,
            alive: true,
            income: 0,
            warriors: 0,
            buildings: 0,
        }
    }

    /// Eliminate this player.
    pub fn eliminate(&mut self) {
        self.alive = false;
        self.income = 0;
    }
}

impl PlayerView for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn money(&self) -> i64 {
        self.money
    }

    fn stats(&self) -> Vec<PlayerStat> {
        vec![
            PlayerStat::new("name", &self.name),
            PlayerStat::new("money", &self.money),
            PlayerStat::new("income", &self.income),
            PlayerStat::new("warriors", &self.warriors),
            PlayerStat::new("buildings", &self.buildings),
            PlayerStat::new("alive", if self.alive { "yes" } else { "no" }),
        ]
    }
}

/// Get adjacent cells (up, down, left, right).
///
/// Returns a fixed-size array and count to avoid heap allocation.
/// The array contains valid cells in indices 0..count.
#[must_use]
pub fn adjacent(cell: Cell, board: BoardSize) -> ([Cell; 4], usize) {
    let mut result = [cell; 4];
    let mut count = 0;

    if cell.y > 0 {
        result[count] = Cell::new(cell.x, cell.y - 1);
        count += 1;
    }
    if cell.y + 1 < board.height {
        result[count] = Cell::new(cell.x, cell.y + 1);
        count += 1;
    }
    if cell.x > 0 {
        result[count] = Cell::new(cell.x - 1, cell.y);
        count += 1;
    }
    if cell.x + 1 < board.width {
        result[count] = Cell::new(cell.x + 1, cell.y);
        count += 1;
    }

    (result, count)
}

/// Manhattan distance between two cells.
#[must_use]
pub fn distance(a: Cell, b: Cell) -> u32 {
    u32::from(a.x.abs_diff(b.x)) + u32::from(a.y.abs_diff(b.y))
}
