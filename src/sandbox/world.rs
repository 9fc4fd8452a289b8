//! Demo host state and turn rules.

use crate::error::{VisualizerError, VisualizerResult};
use crate::host::{BoardSize, Cell, EntityKind, Game, PlayerIndex, TurnEndHandler};

use super::entity::{Entity, EntityId, Player, adjacent, distance};
use super::rng::Rng;
use super::scenario::{SandboxConfig, SandboxError, generate};

/// Income per castle per turn.
pub const CASTLE_INCOME: i64 = 5;
/// Income per farm per turn.
pub const FARM_INCOME: i64 = 3;
/// Price of training a warrior.
pub const WARRIOR_COST: i64 = 20;
/// Damage a warrior deals per attack.
pub const WARRIOR_DAMAGE: u32 = 10;
/// Most warriors a player can field at once.
pub const MAX_WARRIORS: u32 = 12;

/// How a [`Sandbox::run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The game reached its end condition.
    Finished {
        /// Turns played.
        turns: u64,
        /// Last player standing, if exactly one.
        winner: Option<PlayerIndex>,
    },
    /// Every registered visualizer reported it was closed.
    VisualizersClosed {
        /// Turns played.
        turns: u64,
    },
}

/// A small deterministic strategy game that hosts visualizers.
pub struct Sandbox {
    board: BoardSize,
    objects: Vec<Entity>,
    players: Vec<Player>,
    turn: u64,
    max_turns: u64,
    next_id: EntityId,
    handlers: Vec<Box<dyn TurnEndHandler<Self>>>,
}

impl std::fmt::Debug for Sandbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sandbox")
            .field("board", &self.board)
            .field("turn", &self.turn)
            .field("objects", &self.objects.len())
            .field("players", &self.players)
            .field("handlers", &self.handlers.len())
            .finish_non_exhaustive()
    }
}

impl Sandbox {
    /// Create a game from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the board or player count is out of range.
    pub fn new(config: &SandboxConfig) -> Result<Self, SandboxError> {
        let mut rng = Rng::new(config.seed);
        let scenario = generate(config, &mut rng)?;
        let mut sandbox = Self {
            board: scenario.board,
            objects: scenario.objects,
            players: scenario.players,
            turn: 0,
            max_turns: config.max_turns,
            next_id: scenario.next_id,
            handlers: Vec::new(),
        };
        sandbox.refresh_player_stats();
        Ok(sandbox)
    }

    /// Create a game from explicit objects and players, for scripted setups.
    ///
    /// Objects outside the board or sharing a cell are rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout is invalid.
    pub fn from_parts(
        board: BoardSize,
        objects: Vec<Entity>,
        players: Vec<Player>,
        max_turns: u64,
    ) -> Result<Self, SandboxError> {
        for (i, object) in objects.iter().enumerate() {
            if !board.contains(object.cell) {
                return Err(SandboxError {
                    reason: format!("object {} lies outside the board", object.id),
                });
            }
            if objects[..i].iter().any(|o| o.cell == object.cell) {
                return Err(SandboxError {
                    reason: format!("two objects share cell ({}, {})", object.cell.x, object.cell.y),
                });
            }
            if object.owner.is_some_and(|p| p >= players.len()) {
                return Err(SandboxError {
                    reason: format!("object {} has no such owner", object.id),
                });
            }
        }
        let next_id = objects.iter().map(|o| o.id).max().unwrap_or(0) + 1;
        let mut sandbox = Self {
            board,
            objects,
            players,
            turn: 0,
            max_turns,
            next_id,
            handlers: Vec::new(),
        };
        sandbox.refresh_player_stats();
        Ok(sandbox)
    }

    /// Mutable access to the live objects.
    pub fn objects_mut(&mut self) -> &mut Vec<Entity> {
        &mut self.objects
    }

    /// Mutable access to the players.
    pub fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    /// Check if the game is over.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        if self.turn >= self.max_turns {
            return true;
        }
        self.players.iter().filter(|p| p.alive).count() <= 1
    }

    /// The only player still alive, if there is exactly one.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerIndex> {
        let mut alive = self.players.iter().enumerate().filter(|(_, p)| p.alive);
        match (alive.next(), alive.next()) {
            (Some((i, _)), None) => Some(i),
            _ => None,
        }
    }

    /// Number of registered turn-end handlers.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Drop every registered handler, releasing whatever they hold.
    pub fn clear_turn_end_handlers(&mut self) {
        self.handlers.clear();
    }

    /// Play turns until the game ends or every visualizer has closed.
    ///
    /// # Errors
    ///
    /// Returns the first handler failure other than
    /// [`VisualizerError::Closed`].
    pub fn run(&mut self) -> VisualizerResult<RunOutcome> {
        let had_handlers = !self.handlers.is_empty();
        while !self.is_game_over() {
            self.step();
            self.end_turn()?;
            if had_handlers && self.handlers.is_empty() {
                tracing::info!(turn = self.turn, "all visualizers closed, stopping");
                return Ok(RunOutcome::VisualizersClosed { turns: self.turn });
            }
        }
        Ok(RunOutcome::Finished {
            turns: self.turn,
            winner: self.winner(),
        })
    }

    /// Play a single turn and invoke the turn-end handlers.
    ///
    /// Handlers that report [`VisualizerError::Closed`] are unregistered.
    ///
    /// # Errors
    ///
    /// Returns the first handler failure other than `Closed`.
    pub fn play_turn(&mut self) -> VisualizerResult<()> {
        self.step();
        self.end_turn()
    }

    fn end_turn(&mut self) -> VisualizerResult<()> {
        let handlers = std::mem::take(&mut self.handlers);
        let mut kept = Vec::with_capacity(handlers.len());
        let mut failure = None;
        let mut pending = handlers.into_iter();
        for mut handler in pending.by_ref() {
            match handler.on_turn_end(self) {
                Ok(()) => kept.push(handler),
                Err(VisualizerError::Closed) => {
                    tracing::debug!(turn = self.turn, "visualizer closed, unregistering");
                }
                Err(e) => {
                    kept.push(handler);
                    failure = Some(e);
                    break;
                }
            }
        }
        kept.extend(pending);
        self.handlers = kept;
        failure.map_or(Ok(()), Err)
    }

    /// Advance the simulation by one turn.
    fn step(&mut self) {
        self.turn += 1;
        self.collect_income();
        self.train_warriors();
        self.move_warriors();
        self.remove_destroyed();
        self.refresh_player_stats();
    }

    fn collect_income(&mut self) {
        for (index, player) in self.players.iter_mut().enumerate() {
            if !player.alive {
                continue;
            }
            player.income = self
                .objects
                .iter()
                .filter(|o| o.owner == Some(index))
                .map(|o| match o.kind {
                    EntityKind::Castle => CASTLE_INCOME,
                    EntityKind::Farm => FARM_INCOME,
                    _ => 0,
                })
                .sum();
            player.money += player.income;
        }
    }

    fn train_warriors(&mut self) {
        let barracks: Vec<(Cell, PlayerIndex)> = self
            .objects
            .iter()
            .filter(|o| o.kind == EntityKind::Barracks)
            .filter_map(|o| o.owner.map(|owner| (o.cell, owner)))
            .collect();

        for (cell, owner) in barracks {
            let Some(player) = self.players.get(owner) else {
                continue;
            };
            let warriors = self.count_owned(owner, EntityKind::Warrior);
            if !player.alive || player.money < WARRIOR_COST || warriors >= MAX_WARRIORS {
                continue;
            }
            let Some(spawn) = self.free_neighbor(cell) else {
                continue;
            };
            self.players[owner].money -= WARRIOR_COST;
            self.objects
                .push(Entity::new(self.next_id, spawn, Some(owner), EntityKind::Warrior));
            self.next_id += 1;
        }
    }

    fn move_warriors(&mut self) {
        let warrior_ids: Vec<EntityId> = self
            .objects
            .iter()
            .filter(|o| o.kind == EntityKind::Warrior)
            .map(|o| o.id)
            .collect();

        for id in warrior_ids {
            let Some(index) = self.objects.iter().position(|o| o.id == id) else {
                continue;
            };
            let warrior = self.objects[index];
            if warrior.is_destroyed() {
                continue;
            }

            if let Some(target) = self.adjacent_enemy(&warrior) {
                self.objects[target].damage(WARRIOR_DAMAGE);
                continue;
            }
            if let Some(next) = self.step_toward_enemy(&warrior) {
                self.objects[index].cell = next;
            }
        }
    }

    /// Index of the weakest enemy next to `warrior`.
    fn adjacent_enemy(&self, warrior: &Entity) -> Option<usize> {
        let (cells, count) = adjacent(warrior.cell, self.board);
        self.objects
            .iter()
            .enumerate()
            .filter(|(_, o)| cells[..count].contains(&o.cell))
            .filter(|(_, o)| !o.is_destroyed() && warrior.is_enemy_of(o))
            .min_by_key(|(_, o)| (o.hitpoints, o.id))
            .map(|(i, _)| i)
    }

    /// Next free cell closer to the nearest enemy. Blocked warriors wait.
    fn step_toward_enemy(&self, warrior: &Entity) -> Option<Cell> {
        let target = self
            .objects
            .iter()
            .filter(|o| !o.is_destroyed() && warrior.is_enemy_of(o))
            .min_by_key(|o| (distance(warrior.cell, o.cell), o.id))?
            .cell;

        let (cells, count) = adjacent(warrior.cell, self.board);
        let here = distance(warrior.cell, target);
        cells[..count]
            .iter()
            .copied()
            .filter(|c| self.is_free(*c) && distance(*c, target) < here)
            .min_by_key(|c| distance(*c, target))
    }

    fn remove_destroyed(&mut self) {
        self.objects.retain(|o| !o.is_destroyed());
        for (index, player) in self.players.iter_mut().enumerate() {
            let has_castle = self
                .objects
                .iter()
                .any(|o| o.owner == Some(index) && o.kind == EntityKind::Castle);
            if player.alive && !has_castle {
                tracing::debug!(player = %player.name, turn = self.turn, "player eliminated");
                player.eliminate();
            }
        }
    }

    fn refresh_player_stats(&mut self) {
        for (index, player) in self.players.iter_mut().enumerate() {
            let owned = self.objects.iter().filter(|o| o.owner == Some(index));
            let (mut warriors, mut buildings) = (0, 0);
            for object in owned {
                if object.kind.is_building() {
                    buildings += 1;
                } else {
                    warriors += 1;
                }
            }
            player.warriors = warriors;
            player.buildings = buildings;
        }
    }

    fn count_owned(&self, owner: PlayerIndex, kind: EntityKind) -> u32 {
        let count = self
            .objects
            .iter()
            .filter(|o| o.owner == Some(owner) && o.kind == kind)
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    fn is_free(&self, cell: Cell) -> bool {
        self.objects.iter().all(|o| o.cell != cell)
    }

    fn free_neighbor(&self, cell: Cell) -> Option<Cell> {
        let (cells, count) = adjacent(cell, self.board);
        cells[..count].iter().copied().find(|c| self.is_free(*c))
    }
}

impl Game for Sandbox {
    type Object = Entity;
    type Player = Player;

    fn board_size(&self) -> BoardSize {
        self.board
    }

    fn turn(&self) -> u64 {
        self.turn
    }

    fn objects(&self) -> &[Entity] {
        &self.objects
    }

    fn players(&self) -> &[Player] {
        &self.players
    }

    fn register_turn_end_handler(&mut self, handler: Box<dyn TurnEndHandler<Self>>) {
        self.handlers.push(handler);
    }
}
