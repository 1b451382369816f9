//! Game state and core simulation types
//!
//! Everything the tick reads or writes lives in `GameState`, so a whole game
//! can be replayed from a seed and a sequence of inputs.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::snake::Snake;
use crate::consts::*;
use crate::settings::{GrowthPolicy, Settings};

/// A grid cell (0..GRID_SIZE on both axes once wrapped)
pub type Cell = IVec2;

/// Travel direction on the grid (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Unit step for this direction
    pub fn delta(&self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        }
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay (the snake may still be halted by its heading)
    Playing,
    /// Paused by the player
    Paused,
    /// Snake ran into itself; only a restart leaves this phase
    GameOver,
}

/// Regular food, always present
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub cell: Cell,
}

/// Timed bonus food
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonusFood {
    pub cell: Cell,
    pub spawned_at_ms: u64,
}

impl BonusFood {
    /// Time left before expiry (0 once expired)
    pub fn remaining_ms(&self, now_ms: u64, duration_ms: u64) -> u64 {
        duration_ms.saturating_sub(now_ms.saturating_sub(self.spawned_at_ms))
    }

    /// Render scale: heartbeat pulse that shrinks as the bonus runs out
    pub fn pulse_scale(&self, now_ms: u64, duration_ms: u64) -> f32 {
        let age = now_ms.saturating_sub(self.spawned_at_ms) as f32;
        let heartbeat = 1.0 + 0.3 * (age * 0.01).sin();
        let ratio = self.remaining_ms(now_ms, duration_ms) as f32 / duration_ms.max(1) as f32;
        heartbeat * (0.5 + 0.5 * ratio)
    }
}

/// Flash shown where the snake bit itself
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitEffect {
    pub cell: Cell,
    pub started_at_ms: u64,
}

impl HitEffect {
    /// Effect progress in [0, 1], None once finished
    pub fn progress(&self, now_ms: u64) -> Option<f32> {
        let age = now_ms.saturating_sub(self.started_at_ms);
        (age < HIT_EFFECT_MS).then(|| age as f32 / HIT_EFFECT_MS as f32)
    }
}

/// Notable things that happened during a tick (drained by the caller)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    FoodEaten { score: u64, length: usize },
    BonusSpawned { cell: Cell },
    BonusEaten { score: u64 },
    BonusExpired,
    /// A reversal was refused; `paused` is true when the snake was halted
    DirectionBlocked {
        from: Direction,
        to: Direction,
        paused: bool,
    },
    SelfCollision { cell: Cell },
    Restarted,
}

/// Timing and growth rules fixed for the lifetime of a game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    pub move_interval_ms: u64,
    pub bonus_duration_ms: u64,
    pub growth: GrowthPolicy,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            move_interval_ms: MOVE_INTERVAL_MS,
            bonus_duration_ms: BONUS_DURATION_MS,
            growth: GrowthPolicy::Latched,
        }
    }
}

impl From<&Settings> for Rules {
    fn from(settings: &Settings) -> Self {
        Self {
            move_interval_ms: settings.move_interval_ms,
            bonus_duration_ms: settings.bonus_duration_ms,
            growth: settings.growth,
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn RNG
    pub rng: Pcg32,
    pub rules: Rules,
    pub phase: GamePhase,
    pub snake: Snake,
    pub food: Food,
    pub bonus: Option<BonusFood>,
    pub score: u64,
    /// Normal foods eaten this run
    pub food_count: u32,
    /// Wall-clock time of the last body move
    pub last_move_ms: u64,
    pub hit_effect: Option<HitEffect>,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with the given seed and rules
    pub fn new(seed: u64, rules: Rules) -> Self {
        let snake = Snake::new(start_cell(), Direction::Right, rules.growth);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            rules,
            phase: GamePhase::Playing,
            snake,
            food: Food { cell: start_cell() },
            bonus: None,
            score: 0,
            food_count: 0,
            last_move_ms: 0,
            hit_effect: None,
            events: Vec::new(),
        };
        super::spawn::respawn_food(&mut state);
        state
    }

    /// Back to a fresh single-cell snake; the RNG stream continues
    pub fn reset(&mut self) {
        self.snake = Snake::new(start_cell(), Direction::Right, self.rules.growth);
        self.phase = GamePhase::Playing;
        self.bonus = None;
        self.score = 0;
        self.food_count = 0;
        self.last_move_ms = 0;
        self.hit_effect = None;
        super::spawn::respawn_food(self);
        self.events.push(GameEvent::Restarted);
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Head position of a fresh snake
pub fn start_cell() -> Cell {
    IVec2::new(START_CELL.0, START_CELL.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Right.is_opposite(Direction::Right));
    }

    #[test]
    fn test_new_game() {
        let state = GameState::new(42, Rules::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.head(), IVec2::new(10, 10));
        assert_eq!(state.snake.facing(), Direction::Right);
        assert!(!state.snake.occupies(state.food.cell));
        assert!(state.bonus.is_none());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_reset_clears_run() {
        let mut state = GameState::new(42, Rules::default());
        state.score = 17;
        state.food_count = 9;
        state.phase = GamePhase::GameOver;
        state.bonus = Some(BonusFood {
            cell: IVec2::new(1, 1),
            spawned_at_ms: 100,
        });

        state.reset();

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.food_count, 0);
        assert!(state.bonus.is_none());
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.drain_events(), vec![GameEvent::Restarted]);
    }

    #[test]
    fn test_bonus_timer_helpers() {
        let bonus = BonusFood {
            cell: IVec2::new(3, 3),
            spawned_at_ms: 1000,
        };
        assert_eq!(bonus.remaining_ms(1000, 5000), 5000);
        assert_eq!(bonus.remaining_ms(4000, 5000), 2000);
        assert_eq!(bonus.remaining_ms(9000, 5000), 0);
        // Sine term is zero at spawn time, so only the time ratio applies
        assert!((bonus.pulse_scale(1000, 5000) - 1.0).abs() < 1e-6);
        assert!(bonus.pulse_scale(6000, 5000) <= 0.65);
    }

    #[test]
    fn test_hit_effect_progress() {
        let hit = HitEffect {
            cell: IVec2::ZERO,
            started_at_ms: 500,
        };
        assert_eq!(hit.progress(500), Some(0.0));
        assert_eq!(hit.progress(1000), Some(0.5));
        assert_eq!(hit.progress(1500), None);
    }
}
