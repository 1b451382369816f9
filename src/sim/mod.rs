//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Wall-clock time is passed in, never read
//! - Seeded RNG only
//! - No rendering, camera or platform dependencies

pub mod snake;
pub mod spawn;
pub mod state;
pub mod tick;

pub use snake::{Heading, Snake, StepOutcome};
pub use spawn::{bonus_due, expire_bonus, maybe_spawn_bonus, random_free_cell, respawn_food};
pub use state::{
    BonusFood, Cell, Direction, Food, GameEvent, GamePhase, GameState, HitEffect, Rules,
    start_cell,
};
pub use tick::{TickInput, tick};
