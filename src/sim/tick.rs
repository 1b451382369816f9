//! Game tick
//!
//! Called once per rendered frame. Steering is applied every call, while the
//! body itself only moves once `move_interval_ms` of wall-clock time has
//! passed since the previous move.

use super::snake::{Heading, StepOutcome};
use super::spawn::{expire_bonus, maybe_spawn_bonus, respawn_food};
use super::state::{Direction, GameEvent, GamePhase, GameState, HitEffect};
use crate::consts::*;
use crate::gaze::Gaze;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest classified gaze (None when gaze control is off)
    pub gaze: Option<Gaze>,
    /// Keyboard steering
    pub steer: Option<Direction>,
    /// Pause toggle
    pub pause: bool,
    /// Restart request (honoured only after game over)
    pub restart: bool,
}

/// Advance the game state to `now_ms`
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: u64) {
    if input.restart && state.phase == GamePhase::GameOver {
        state.reset();
        log::info!("Game restarted");
        return;
    }

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => state.phase = GamePhase::Paused,
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    expire_bonus(state, now_ms);

    if let Some(direction) = input.steer {
        steer_keyboard(state, direction);
    }
    if let Some(gaze) = input.gaze {
        steer_gaze(state, gaze);
    }

    if state.snake.is_paused() {
        return;
    }
    if now_ms.saturating_sub(state.last_move_ms) < state.rules.move_interval_ms {
        return;
    }
    state.last_move_ms = now_ms;

    match state.snake.step() {
        StepOutcome::Halted => {}
        StepOutcome::Collided { cell } => {
            state.phase = GamePhase::GameOver;
            state.hit_effect = Some(HitEffect {
                cell,
                started_at_ms: now_ms,
            });
            state.events.push(GameEvent::SelfCollision { cell });
            log::info!("Game over: snake hit itself at ({}, {})", cell.x, cell.y);
        }
        StepOutcome::Moved { head } => {
            if head == state.food.cell {
                eat_food(state, now_ms);
            }
            if state.bonus.is_some_and(|b| b.cell == head) {
                eat_bonus(state);
            }
        }
    }
}

/// Keyboard turns go straight to the snake; a refused reversal is ignored
fn steer_keyboard(state: &mut GameState, direction: Direction) {
    if state.snake.heading() == Heading::Moving(direction) {
        return;
    }
    if !state.snake.change_direction(direction) {
        log::debug!(
            "Ignoring key reversal {} -> {}",
            state.snake.facing().as_str(),
            direction.as_str()
        );
        state.events.push(GameEvent::DirectionBlocked {
            from: state.snake.facing(),
            to: direction,
            paused: false,
        });
    }
}

/// Gaze steering: neutral gaze halts the snake, a refused reversal halts it too
fn steer_gaze(state: &mut GameState, gaze: Gaze) {
    match gaze {
        Gaze::Center => state.snake.pause(),
        Gaze::Toward(direction) => {
            if state.snake.heading() == Heading::Moving(direction) {
                return;
            }
            let from = state.snake.facing();
            if state.snake.change_direction(direction) {
                log::debug!("Direction changed: {} -> {}", from.as_str(), direction.as_str());
            } else {
                log::info!(
                    "Direction change blocked: {} -> {}, pausing snake",
                    from.as_str(),
                    direction.as_str()
                );
                state.snake.pause();
                state.events.push(GameEvent::DirectionBlocked {
                    from,
                    to: direction,
                    paused: true,
                });
            }
        }
    }
}

fn eat_food(state: &mut GameState, now_ms: u64) {
    state.snake.grow();
    respawn_food(state);
    state.score += FOOD_SCORE;
    state.food_count += 1;
    state.events.push(GameEvent::FoodEaten {
        score: state.score,
        length: state.snake.len(),
    });
    log::info!(
        "Food eaten! Score: {}, snake length: {}",
        state.score,
        state.snake.len()
    );

    maybe_spawn_bonus(state, now_ms);
}

fn eat_bonus(state: &mut GameState) {
    for _ in 0..BONUS_GROWTH {
        state.snake.grow();
    }
    state.score += BONUS_SCORE;
    state.bonus = None;
    state.events.push(GameEvent::BonusEaten { score: state.score });
    log::info!("Bonus food eaten! Score: {}", state.score);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GrowthPolicy;
    use crate::sim::snake::Snake;
    use crate::sim::state::{BonusFood, Rules};
    use glam::IVec2;

    fn look(direction: Direction) -> TickInput {
        TickInput {
            gaze: Some(Gaze::Toward(direction)),
            ..Default::default()
        }
    }

    fn center() -> TickInput {
        TickInput {
            gaze: Some(Gaze::Center),
            ..Default::default()
        }
    }

    /// Game with food parked far from the snake's path
    fn fresh_state() -> GameState {
        let mut state = GameState::new(12345, Rules::default());
        state.food.cell = IVec2::new(0, 24);
        state
    }

    #[test]
    fn test_moves_at_fixed_cadence() {
        let mut state = fresh_state();
        let input = TickInput::default();

        tick(&mut state, &input, 200);
        assert_eq!(state.snake.head(), IVec2::new(11, 10));

        // Frames in between only poll input
        for now in (216..400).step_by(16) {
            tick(&mut state, &input, now);
        }
        assert_eq!(state.snake.head(), IVec2::new(11, 10));

        tick(&mut state, &input, 400);
        assert_eq!(state.snake.head(), IVec2::new(12, 10));
    }

    #[test]
    fn test_center_gaze_halts_regardless_of_time() {
        let mut state = fresh_state();
        let before: Vec<_> = state.snake.body().collect();

        for now in [200, 400, 10_000] {
            tick(&mut state, &center(), now);
        }
        assert!(state.snake.is_paused());
        assert_eq!(state.snake.body().collect::<Vec<_>>(), before);

        tick(&mut state, &look(Direction::Down), 10_200);
        assert_eq!(state.snake.head(), IVec2::new(10, 11));
    }

    #[test]
    fn test_gaze_reversal_pauses_then_resumes() {
        let mut state = fresh_state();

        tick(&mut state, &look(Direction::Left), 200);
        assert!(state.snake.is_paused());
        assert_eq!(state.snake.head(), IVec2::new(10, 10));
        assert!(state.drain_events().iter().any(|e| matches!(
            e,
            GameEvent::DirectionBlocked {
                paused: true,
                ..
            }
        )));

        // A paused snake has no heading to reverse
        tick(&mut state, &look(Direction::Left), 400);
        assert_eq!(state.snake.heading(), Heading::Moving(Direction::Left));
        assert_eq!(state.snake.head(), IVec2::new(9, 10));
    }

    #[test]
    fn test_neutral_gaze_then_opposite_direction_moves() {
        let mut state = fresh_state();
        tick(&mut state, &center(), 200);
        assert!(state.snake.is_paused());

        for i in 1..=10u64 {
            tick(&mut state, &look(Direction::Left), 200 + i * 200);
        }
        assert!(!state.snake.is_paused());
        assert_eq!(state.snake.head(), IVec2::new(0, 10));
    }

    #[test]
    fn test_keyboard_reversal_is_ignored() {
        let mut state = fresh_state();
        let input = TickInput {
            steer: Some(Direction::Left),
            ..Default::default()
        };
        tick(&mut state, &input, 200);
        assert!(!state.snake.is_paused());
        assert_eq!(state.snake.head(), IVec2::new(11, 10));
    }

    #[test]
    fn test_food_scoring_and_growth() {
        let mut state = fresh_state();
        state.food.cell = IVec2::new(11, 10);

        tick(&mut state, &TickInput::default(), 200);
        assert_eq!(state.score, 1);
        assert_eq!(state.food_count, 1);
        assert_ne!(state.food.cell, IVec2::new(11, 10));
        assert_eq!(state.snake.len(), 1);

        state.food.cell = IVec2::new(0, 24);
        tick(&mut state, &TickInput::default(), 400);
        assert_eq!(state.snake.len(), 2);
    }

    #[test]
    fn test_bonus_spawns_on_fifth_food() {
        let mut state = fresh_state();
        state.food_count = 4;
        state.food.cell = IVec2::new(11, 10);

        tick(&mut state, &TickInput::default(), 200);
        assert_eq!(state.food_count, 5);
        let bonus = state.bonus.expect("bonus spawned");
        assert_eq!(bonus.spawned_at_ms, 200);
        assert_ne!(bonus.cell, state.food.cell);
        assert!(!state.snake.occupies(bonus.cell));
    }

    #[test]
    fn test_bonus_expires_after_duration() {
        let mut state = fresh_state();
        state.bonus = Some(BonusFood {
            cell: IVec2::new(20, 20),
            spawned_at_ms: 0,
        });
        state.snake.pause();

        tick(&mut state, &TickInput::default(), 5000);
        assert!(state.bonus.is_some());
        tick(&mut state, &TickInput::default(), 5001);
        assert!(state.bonus.is_none());
    }

    #[test]
    fn test_bonus_consumption() {
        let mut state = fresh_state();
        state.score = 3;
        state.bonus = Some(BonusFood {
            cell: IVec2::new(11, 10),
            spawned_at_ms: 0,
        });

        tick(&mut state, &TickInput::default(), 200);
        assert_eq!(state.score, 8);
        assert!(state.bonus.is_none());
        assert_eq!(state.snake.pending_growth(), 1);

        // Five grow() calls collapse into one segment
        tick(&mut state, &TickInput::default(), 400);
        tick(&mut state, &TickInput::default(), 600);
        assert_eq!(state.snake.len(), 2);
    }

    #[test]
    fn test_bonus_consumption_accumulating_growth() {
        let rules = Rules {
            growth: GrowthPolicy::Accumulate,
            ..Rules::default()
        };
        let mut state = GameState::new(9, rules);
        state.food.cell = IVec2::new(0, 24);
        state.bonus = Some(BonusFood {
            cell: IVec2::new(11, 10),
            spawned_at_ms: 0,
        });

        for step in 1..=7 {
            tick(&mut state, &TickInput::default(), step * 200);
        }
        assert_eq!(state.snake.len(), 6);
    }

    #[test]
    fn test_self_collision_ends_game() {
        let mut state = fresh_state();
        state.snake = Snake::from_cells(
            [
                IVec2::new(5, 5),
                IVec2::new(6, 5),
                IVec2::new(6, 6),
                IVec2::new(5, 6),
                IVec2::new(4, 6),
            ],
            Direction::Left,
            GrowthPolicy::Latched,
        );

        tick(&mut state, &look(Direction::Down), 200);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.hit_effect.map(|h| h.cell), Some(IVec2::new(5, 6)));

        // Nothing moves after game over
        let body: Vec<_> = state.snake.body().collect();
        tick(&mut state, &look(Direction::Down), 400);
        assert_eq!(state.snake.body().collect::<Vec<_>>(), body);
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut state = fresh_state();
        state.score = 4;
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };

        tick(&mut state, &restart, 200);
        assert_eq!(state.score, 4);

        state.phase = GamePhase::GameOver;
        tick(&mut state, &restart, 400);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.len(), 1);
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = fresh_state();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        tick(&mut state, &pause, 200);
        assert_eq!(state.phase, GamePhase::Paused);
        tick(&mut state, &TickInput::default(), 400);
        assert_eq!(state.snake.head(), IVec2::new(10, 10));

        tick(&mut state, &pause, 600);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.snake.head(), IVec2::new(11, 10));
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999, Rules::default());
        let mut state2 = GameState::new(99999, Rules::default());

        let inputs = [
            look(Direction::Down),
            TickInput::default(),
            look(Direction::Left),
            center(),
            look(Direction::Up),
        ];

        for (i, input) in inputs.iter().cycle().take(200).enumerate() {
            let now = (i as u64 + 1) * 100;
            tick(&mut state1, input, now);
            tick(&mut state2, input, now);
        }

        assert_eq!(state1.snake, state2.snake);
        assert_eq!(state1.food, state2.food);
        assert_eq!(state1.score, state2.score);
    }
}
