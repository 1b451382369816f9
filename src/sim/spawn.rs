//! Food and bonus placement
//!
//! Cells are drawn by rejection sampling. The attempt count is bounded; after
//! that a scan of free cells picks one, and a full grid yields `None`.

use glam::IVec2;
use rand::Rng;

use super::state::{BonusFood, Cell, GameEvent, GameState};
use crate::consts::*;

/// Random draws before falling back to a free-cell scan
pub const MAX_SPAWN_ATTEMPTS: u32 = 4 * (GRID_SIZE * GRID_SIZE) as u32;

/// Pick a uniformly random cell for which `blocked` is false
pub fn random_free_cell<R: Rng>(rng: &mut R, blocked: impl Fn(Cell) -> bool) -> Option<Cell> {
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let cell = IVec2::new(
            rng.random_range(0..GRID_SIZE),
            rng.random_range(0..GRID_SIZE),
        );
        if !blocked(cell) {
            return Some(cell);
        }
    }

    let free: Vec<Cell> = (0..GRID_SIZE)
        .flat_map(|y| (0..GRID_SIZE).map(move |x| IVec2::new(x, y)))
        .filter(|&c| !blocked(c))
        .collect();
    if free.is_empty() {
        return None;
    }
    Some(free[rng.random_range(0..free.len())])
}

/// Move the food to a cell outside the snake
pub fn respawn_food(state: &mut GameState) {
    let snake = &state.snake;
    match random_free_cell(&mut state.rng, |c| snake.occupies(c)) {
        Some(cell) => state.food.cell = cell,
        None => log::warn!("No free cell for food; grid is full"),
    }
}

/// Whether eating the current food count should bring a bonus
pub fn bonus_due(food_count: u32) -> bool {
    food_count > 0 && food_count % BONUS_EVERY == 0
}

/// Spawn a bonus if one is due and none is active
pub fn maybe_spawn_bonus(state: &mut GameState, now_ms: u64) -> bool {
    if state.bonus.is_some() || !bonus_due(state.food_count) {
        return false;
    }

    let snake = &state.snake;
    let food = state.food.cell;
    let Some(cell) = random_free_cell(&mut state.rng, |c| c == food || snake.occupies(c)) else {
        log::warn!("No free cell for bonus food");
        return false;
    };

    state.bonus = Some(BonusFood {
        cell,
        spawned_at_ms: now_ms,
    });
    state.events.push(GameEvent::BonusSpawned { cell });
    log::info!("Bonus food spawned at ({}, {})", cell.x, cell.y);
    true
}

/// Drop the bonus once strictly more than its duration has passed
pub fn expire_bonus(state: &mut GameState, now_ms: u64) -> bool {
    let Some(bonus) = state.bonus else {
        return false;
    };
    if now_ms.saturating_sub(bonus.spawned_at_ms) > state.rules.bonus_duration_ms {
        state.bonus = None;
        state.events.push(GameEvent::BonusExpired);
        log::info!("Bonus food expired");
        return true;
    }
    false
}
