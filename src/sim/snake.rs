//! Snake body, heading and movement
//!
//! The head is `body[0]`. A move pushes a new head and drops the tail unless
//! growth is pending; the new head is wrapped onto the torus before the
//! self-collision test.

use std::collections::VecDeque;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::state::{Cell, Direction};
use crate::settings::GrowthPolicy;
use crate::wrap_coord;

/// Whether the snake is travelling or halted
///
/// Gaze returning to neutral halts the snake instead of letting it coast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    Moving(Direction),
    Paused,
}

/// Result of a single movement step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Heading is paused, body untouched
    Halted,
    Moved { head: Cell },
    /// Head landed on the body; the move is kept
    Collided { cell: Cell },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snake {
    body: VecDeque<Cell>,
    heading: Heading,
    /// Last accepted travel direction, kept for display while paused
    facing: Direction,
    pending_growth: u32,
    growth: GrowthPolicy,
}

impl Snake {
    /// Single-cell snake heading in `direction`
    pub fn new(head: Cell, direction: Direction, growth: GrowthPolicy) -> Self {
        Self::from_cells([head], direction, growth)
    }

    /// Snake from explicit cells, head first
    ///
    /// Panics if `cells` is empty.
    pub fn from_cells(
        cells: impl IntoIterator<Item = Cell>,
        direction: Direction,
        growth: GrowthPolicy,
    ) -> Self {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        assert!(!body.is_empty(), "snake body must not be empty");
        Self {
            body,
            heading: Heading::Moving(direction),
            facing: direction,
            pending_growth: 0,
            growth,
        }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn body(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; the body holds at least the head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn is_paused(&self) -> bool {
        self.heading == Heading::Paused
    }

    pub fn pending_growth(&self) -> u32 {
        self.pending_growth
    }

    /// Check if any segment (head included) sits on `cell`
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Check if the head overlaps a later segment
    pub fn head_hits_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&c| c == head)
    }

    /// Turn toward `direction`; refuses a reversal of the current heading.
    /// A paused snake has no heading to reverse, so any direction resumes it.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        if matches!(self.heading, Heading::Moving(current) if direction.is_opposite(current)) {
            return false;
        }
        self.facing = direction;
        self.heading = Heading::Moving(direction);
        true
    }

    /// Halt movement, keeping the facing direction
    pub fn pause(&mut self) {
        self.heading = Heading::Paused;
    }

    /// Request one extra segment on the next move
    pub fn grow(&mut self) {
        match self.growth {
            GrowthPolicy::Latched => self.pending_growth = 1,
            GrowthPolicy::Accumulate => self.pending_growth += 1,
        }
    }

    /// Move one cell along the heading
    pub fn step(&mut self) -> StepOutcome {
        let Heading::Moving(direction) = self.heading else {
            return StepOutcome::Halted;
        };

        let next = self.head() + direction.delta();
        let head = IVec2::new(wrap_coord(next.x), wrap_coord(next.y));
        self.body.push_front(head);

        if self.pending_growth == 0 {
            self.body.pop_back();
        } else {
            self.pending_growth -= 1;
        }

        if self.head_hits_body() {
            StepOutcome::Collided { cell: head }
        } else {
            StepOutcome::Moved { head }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake_at(x: i32, y: i32, direction: Direction) -> Snake {
        Snake::new(IVec2::new(x, y), direction, GrowthPolicy::Latched)
    }

    #[test]
    fn test_basic_step() {
        let mut snake = snake_at(5, 5, Direction::Right);
        assert_eq!(snake.step(), StepOutcome::Moved { head: IVec2::new(6, 5) });
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_paused_step_is_noop() {
        let mut snake = Snake::from_cells(
            [IVec2::new(5, 5), IVec2::new(4, 5), IVec2::new(3, 5)],
            Direction::Right,
            GrowthPolicy::Latched,
        );
        snake.pause();
        let before: Vec<_> = snake.body().collect();

        assert_eq!(snake.step(), StepOutcome::Halted);
        assert_eq!(snake.body().collect::<Vec<_>>(), before);
    }

    #[test]
    fn test_reversal_rejected() {
        for direction in Direction::ALL {
            let mut snake = snake_at(5, 5, direction);
            let opposite = Direction::ALL
                .into_iter()
                .find(|d| d.is_opposite(direction))
                .unwrap();
            assert!(!snake.change_direction(opposite));
            assert_eq!(snake.heading(), Heading::Moving(direction));
            assert_eq!(snake.facing(), direction);
        }
    }

    #[test]
    fn test_paused_snake_accepts_any_direction() {
        for direction in Direction::ALL {
            let mut snake = snake_at(5, 5, direction);
            snake.pause();
            let opposite = Direction::ALL
                .into_iter()
                .find(|d| d.is_opposite(direction))
                .unwrap();
            assert!(snake.change_direction(opposite));
            assert_eq!(snake.heading(), Heading::Moving(opposite));
            assert_eq!(snake.facing(), opposite);
            assert_eq!(
                snake.step(),
                StepOutcome::Moved {
                    head: IVec2::new(5, 5) + opposite.delta()
                }
            );
        }
    }

    #[test]
    fn test_grow_once() {
        let mut snake = Snake::from_cells(
            [IVec2::new(5, 5), IVec2::new(4, 5)],
            Direction::Right,
            GrowthPolicy::Latched,
        );
        snake.grow();
        snake.step();

        assert_eq!(
            snake.body().collect::<Vec<_>>(),
            vec![IVec2::new(6, 5), IVec2::new(5, 5), IVec2::new(4, 5)]
        );

        // Growth is consumed
        snake.step();
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn test_latched_growth_collapses_repeated_calls() {
        let mut snake = snake_at(5, 5, Direction::Right);
        for _ in 0..5 {
            snake.grow();
        }
        snake.step();
        assert_eq!(snake.len(), 2);
        snake.step();
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn test_accumulated_growth_spreads_over_moves() {
        let mut snake = Snake::new(IVec2::new(5, 5), Direction::Right, GrowthPolicy::Accumulate);
        for _ in 0..5 {
            snake.grow();
        }
        for expected in 2..=6 {
            snake.step();
            assert_eq!(snake.len(), expected);
        }
        snake.step();
        assert_eq!(snake.len(), 6);
    }

    #[test]
    fn test_wrap_all_edges() {
        let cases = [
            (IVec2::new(24, 7), Direction::Right, IVec2::new(0, 7)),
            (IVec2::new(0, 7), Direction::Left, IVec2::new(24, 7)),
            (IVec2::new(7, 0), Direction::Up, IVec2::new(7, 24)),
            (IVec2::new(7, 24), Direction::Down, IVec2::new(7, 0)),
        ];
        for (start, direction, expected) in cases {
            let mut snake = Snake::new(start, direction, GrowthPolicy::Latched);
            assert_eq!(snake.step(), StepOutcome::Moved { head: expected });
        }
    }

    #[test]
    fn test_closed_loop_collision() {
        // Head at (5,5) moving Down into (5,6), which is still body after the tail drops
        let mut snake = Snake::from_cells(
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
        assert!(snake.change_direction(Direction::Down));

        assert_eq!(snake.step(), StepOutcome::Collided { cell: IVec2::new(5, 6) });
        // Not rolled back
        assert_eq!(snake.head(), IVec2::new(5, 6));
        assert_eq!(snake.len(), 5);
    }

    #[test]
    fn test_moving_into_vacated_tail_is_safe() {
        // 2x2 loop: the head chases the tail cell that is popped this move
        let mut snake = Snake::from_cells(
            [
                IVec2::new(5, 5),
                IVec2::new(6, 5),
                IVec2::new(6, 6),
                IVec2::new(5, 6),
            ],
            Direction::Left,
            GrowthPolicy::Latched,
        );
        assert!(snake.change_direction(Direction::Down));
        assert_eq!(snake.step(), StepOutcome::Moved { head: IVec2::new(5, 6) });
    }
}
