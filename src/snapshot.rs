//! Turn-boundary snapshots of engine state.
//!
//! The engine is free to mutate or free its objects as soon as the turn-end
//! callback returns, so the windowed renderer never looks at engine memory.
//! It draws from a [`GameSnapshot`] that owns copies of everything it needs.
//! Snapshots are replaced wholesale: [`SharedSnapshot::store`] swaps a single
//! `Arc`, so a reader sees either the previous turn or the new one.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::host::{BoardSize, Cell, EntityKind, Game, Health, PlayerIndex, PlayerStat, PlayerView, Renderable};

/// Owned copy of one renderable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSnapshot {
    /// Occupied cell.
    pub cell: Cell,
    /// Owning player, `None` if neutral.
    pub owner: Option<PlayerIndex>,
    /// Type tag.
    pub kind: EntityKind,
    /// Display glyph.
    pub glyph: char,
    /// Hitpoints, present if the object takes damage.
    pub health: Option<Health>,
}

impl ObjectSnapshot {
    /// Copy the renderable fields of an engine object.
    #[must_use]
    pub fn capture<R: Renderable + ?Sized>(object: &R) -> Self {
        Self {
            cell: object.cell(),
            owner: object.owner(),
            kind: object.kind(),
            glyph: object.glyph(),
            health: object.health(),
        }
    }

    /// Whether a health bar is drawn for this object.
    #[must_use]
    pub const fn takes_damage(&self) -> bool {
        self.health.is_some()
    }
}

/// Owned copy of one player's statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Display name.
    pub name: String,
    /// Money at the end of the turn.
    pub money: i64,
    /// Ordered attribute list.
    pub stats: Vec<PlayerStat>,
}

impl PlayerSnapshot {
    /// Copy a player's statistics.
    #[must_use]
    pub fn capture<P: PlayerView + ?Sized>(player: &P) -> Self {
        Self {
            name: player.name().to_owned(),
            money: player.money(),
            stats: player.stats(),
        }
    }
}

/// Everything a renderer needs from one turn, detached from the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Turns played when the snapshot was taken.
    pub turn: u64,
    /// Board dimensions.
    pub board: BoardSize,
    /// Renderable objects.
    pub objects: Vec<ObjectSnapshot>,
    /// Players, indexed by [`PlayerIndex`].
    pub players: Vec<PlayerSnapshot>,
}

impl GameSnapshot {
    /// Take a deep copy of the game's renderable state.
    #[must_use]
    pub fn capture<G: Game + ?Sized>(game: &G) -> Self {
        Self {
            turn: game.turn(),
            board: game.board_size(),
            objects: game.objects().iter().map(ObjectSnapshot::capture).collect(),
            players: game.players().iter().map(PlayerSnapshot::capture).collect(),
        }
    }

    /// Snapshot with no objects and no players.
    #[must_use]
    pub const fn empty(board: BoardSize) -> Self {
        Self {
            turn: 0,
            board,
            objects: Vec::new(),
            players: Vec::new(),
        }
    }
}

/// The latest snapshot, shared between the engine thread and the renderer.
///
/// The lock only guards the pointer swap; readers clone the `Arc` and draw
/// without holding it.
#[derive(Debug, Clone)]
pub struct SharedSnapshot {
    current: Arc<Mutex<Arc<GameSnapshot>>>,
}

impl SharedSnapshot {
    /// Share an initial snapshot.
    #[must_use]
    pub fn new(snapshot: GameSnapshot) -> Self {
        Self {
            current: Arc::new(Mutex::new(Arc::new(snapshot))),
        }
    }

    /// Replace the current snapshot. The previous one is dropped once the
    /// last reader lets go of it.
    pub fn store(&self, snapshot: GameSnapshot) {
        let next = Arc::new(snapshot);
        let previous = std::mem::replace(&mut *self.current.lock(), next);
        drop(previous);
    }

    /// Get the current snapshot.
    #[must_use]
    pub fn load(&self) -> Arc<GameSnapshot> {
        Arc::clone(&self.current.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(turn: u64) -> GameSnapshot {
        GameSnapshot {
            turn,
            board: BoardSize::new(3, 3),
            objects: vec![ObjectSnapshot {
                cell: Cell::new(1, 1),
                owner: Some(0),
                kind: EntityKind::Warrior,
                glyph: 'w',
                health: Some(Health::new(3, 10)),
            }],
            players: vec![PlayerSnapshot {
                name: "red".to_string(),
                money: 10,
                stats: vec![PlayerStat::new("money", &10)],
            }],
        }
    }

    #[test]
    fn test_store_replaces_wholesale() {
        let shared = SharedSnapshot::new(sample(1));
        let before = shared.load();

        shared.store(sample(2));

        // Readers holding the old snapshot keep seeing it unchanged.
        assert_eq!(before.turn, 1);
        assert_eq!(shared.load().turn, 2);
    }

    #[test]
    fn test_clones_share_the_same_slot() {
        let shared = SharedSnapshot::new(GameSnapshot::empty(BoardSize::new(1, 1)));
        let reader = shared.clone();
        shared.store(sample(7));
        assert_eq!(reader.load().turn, 7);
    }

    #[test]
    fn test_store_from_another_thread() {
        let shared = SharedSnapshot::new(sample(0));
        let writer = shared.clone();
        let handle = std::thread::spawn(move || {
            for turn in 1..=100 {
                writer.store(sample(turn));
            }
        });
        handle.join().unwrap();
        assert_eq!(shared.load().turn, 100);
        assert_eq!(shared.load().objects.len(), 1);
    }

    #[test]
    fn test_takes_damage() {
        let snap = sample(0);
        assert!(snap.objects[0].takes_damage());
    }
}
