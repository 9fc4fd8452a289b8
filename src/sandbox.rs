//! A small deterministic strategy game used to drive the visualizers.
//!
//! Players start with a castle, a farm and barracks in a board corner.
//! Castles and farms earn money, barracks turn money into warriors, and
//! warriors march on the nearest enemy. A player whose castle falls is out.

mod entity;
mod rng;
mod scenario;
mod world;

pub use entity::{Entity, EntityId, Player, adjacent, distance, max_hitpoints};
pub use scenario::{
    MAX_BOARD_SIDE, MAX_PLAYERS, MIN_BOARD_SIDE, MIN_PLAYERS, STARTING_MONEY, SandboxConfig,
    SandboxError,
};
pub use world::{
    CASTLE_INCOME, FARM_INCOME, MAX_WARRIORS, RunOutcome, Sandbox, WARRIOR_COST, WARRIOR_DAMAGE,
};
