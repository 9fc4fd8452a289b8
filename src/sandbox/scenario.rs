//! Deterministic starting positions for the demo host.

use crate::host::{BoardSize, Cell, EntityKind};

use super::entity::{Entity, EntityId, Player};
use super::rng::Rng;

/// Smallest supported board side.
pub const MIN_BOARD_SIDE: u16 = 6;
/// Largest supported board side.
pub const MAX_BOARD_SIDE: u16 = 200;
/// Supported player counts.
pub const MIN_PLAYERS: usize = 2;
/// Maximum players; one per board corner.
pub const MAX_PLAYERS: usize = 4;
/// Money each player starts with.
pub const STARTING_MONEY: i64 = 50;

/// Player display names.
const PLAYER_NAMES: [&str; MAX_PLAYERS] = ["Ada", "Brutus", "Cyra", "Dorn"];

/// Demo host configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SandboxConfig {
    /// Board width in cells.
    pub width: u16,
    /// Board height in cells.
    pub height: u16,
    /// Number of players (2-4).
    pub players: usize,
    /// Turn limit.
    pub max_turns: u64,
    /// Random seed.
    pub seed: u64,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            width: 16,
            height: 12,
            players: 2,
            max_turns: 500,
            seed: 42,
        }
    }
}

/// Error type for demo host setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxError {
    /// Description of the error.
    pub reason: String,
}

impl std::fmt::Display for SandboxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sandbox setup error: {}", self.reason)
    }
}

impl std::error::Error for SandboxError {}

/// Starting objects and players.
#[derive(Debug, Clone)]
pub(crate) struct Scenario {
    pub(crate) board: BoardSize,
    pub(crate) objects: Vec<Entity>,
    pub(crate) players: Vec<Player>,
    pub(crate) next_id: EntityId,
}

/// Generate the starting position.
///
/// Each player gets a castle one cell in from a board corner, with a farm
/// beside it and barracks below or above it, facing the board center.
/// Neutral walls are scattered over the remaining cells.
///
/// # Errors
///
/// Returns an error if the board or player count is out of range.
pub(crate) fn generate(config: &SandboxConfig, rng: &mut Rng) -> Result<Scenario, SandboxError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&config.players) {
        return Err(SandboxError {
            reason: format!(
                "Need {MIN_PLAYERS}-{MAX_PLAYERS} players, got {}",
                config.players
            ),
        });
    }
    for (side, value) in [("width", config.width), ("height", config.height)] {
        if !(MIN_BOARD_SIDE..=MAX_BOARD_SIDE).contains(&value) {
            return Err(SandboxError {
                reason: format!(
                    "Board {side} must be {MIN_BOARD_SIDE}-{MAX_BOARD_SIDE}, got {value}"
                ),
            });
        }
    }

    let board = BoardSize::new(config.width, config.height);
    let mut scenario = Scenario {
        board,
        objects: Vec::new(),
        players: PLAYER_NAMES[..config.players]
            .iter()
            .map(|name| Player::new(*name, STARTING_MONEY))
            .collect(),
        next_id: 1,
    };

    let (right, bottom) = (config.width - 2, config.height - 2);
    let corners = [(1, 1), (right, bottom), (right, 1), (1, bottom)];
    for (owner, &(x, y)) in corners.iter().take(config.players).enumerate() {
        // One step toward the board center.
        let step = |v: u16| if v == 1 { v + 1 } else { v - 1 };

        scenario.spawn(Cell::new(x, y), Some(owner), EntityKind::Castle);
        scenario.spawn(Cell::new(step(x), y), Some(owner), EntityKind::Farm);
        scenario.spawn(Cell::new(x, step(y)), Some(owner), EntityKind::Barracks);
    }

    place_walls(&mut scenario, rng);
    Ok(scenario)
}

impl Scenario {
    fn spawn(&mut self, cell: Cell, owner: Option<usize>, kind: EntityKind) {
        self.objects.push(Entity::new(self.next_id, cell, owner, kind));
        self.next_id += 1;
    }

    fn is_free(&self, cell: Cell) -> bool {
        self.objects.iter().all(|o| o.cell != cell)
    }
}

/// Scatter neutral walls on about one cell in twelve, keeping a two-cell
/// clearing around every castle.
fn place_walls(scenario: &mut Scenario, rng: &mut Rng) {
    let board = scenario.board;
    let castles: Vec<Cell> = scenario
        .objects
        .iter()
        .filter(|o| o.kind == EntityKind::Castle)
        .map(|o| o.cell)
        .collect();

    let target = usize::from(board.width) * usize::from(board.height) / 12;
    let mut attempts = target * 4;
    let mut placed = 0;
    while placed < target && attempts > 0 {
        attempts -= 1;
        let cell = Cell::new(
            rng.next_below(board.width),
            rng.next_below(board.height),
        );
        let near_castle = castles
            .iter()
            .any(|c| c.x.abs_diff(cell.x) <= 2 && c.y.abs_diff(cell.y) <= 2);
        if near_castle || !scenario.is_free(cell) {
            continue;
        }
        scenario.spawn(cell, None, EntityKind::Wall);
        placed += 1;
    }
}
