//! Game session
//!
//! Runs the fixed-rate frame loop: collects keyboard commands, reads the
//! latest published gaze, ticks the simulation and drains its events.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::gaze::SharedGaze;
use crate::platform::{Clock, Command, Key, map_key};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, Rules, TickInput, tick};

/// End-of-run snapshot for reporting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub seed: u64,
    pub score: u64,
    pub length: usize,
    pub food_count: u32,
    pub phase: GamePhase,
    pub frames: u64,
    pub gaze_calibrated: bool,
}

pub struct Session {
    state: GameState,
    /// Gaze cell written by the tracker; None for keyboard-only play
    gaze: Option<Arc<SharedGaze>>,
    /// One-shot inputs collected since the last frame
    input: TickInput,
    frame_interval: Duration,
    frames: u64,
    running: bool,
}

impl Session {
    pub fn new(settings: &Settings, seed: u64, gaze: Option<Arc<SharedGaze>>) -> Self {
        Self {
            state: GameState::new(seed, Rules::from(settings)),
            gaze,
            input: TickInput::default(),
            frame_interval: Duration::from_millis(settings.frame_interval_ms()),
            frames: 0,
            running: true,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn has_gaze(&self) -> bool {
        self.gaze.is_some()
    }

    /// Queue a key press for the next frame
    pub fn handle_key(&mut self, key: Key) {
        let Some(command) = map_key(key) else {
            return;
        };
        match command {
            Command::Steer(direction) => self.input.steer = Some(direction),
            Command::TogglePause => self.input.pause = !self.input.pause,
            Command::Restart => {
                if self.state.is_game_over() {
                    self.input.restart = true;
                }
            }
            Command::Recalibrate => {
                if let Some(gaze) = &self.gaze {
                    gaze.request_recalibration();
                    log::info!("Recalibrating eye tracking...");
                }
            }
            Command::Quit => self.running = false,
        }
    }

    /// Run one frame at `now_ms`; returns the events it produced
    pub fn frame(&mut self, now_ms: u64) -> Vec<GameEvent> {
        let mut input = std::mem::take(&mut self.input);
        input.gaze = self.gaze.as_ref().map(|g| g.direction());

        tick(&mut self.state, &input, now_ms);
        self.frames += 1;
        self.state.drain_events()
    }

    /// Run frames until quit or `duration` elapses
    pub fn run<C: Clock>(&mut self, clock: &C, duration: Duration) -> Summary {
        let end = clock.now_ms() + duration.as_millis() as u64;
        while self.running && clock.now_ms() < end {
            for event in self.frame(clock.now_ms()) {
                log::debug!("{event:?}");
            }
            clock.sleep(self.frame_interval);
        }
        self.summary()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            seed: self.state.seed,
            score: self.state.score,
            length: self.state.snake.len(),
            food_count: self.state.food_count,
            phase: self.state.phase,
            frames: self.frames,
            gaze_calibrated: self.gaze.as_ref().is_some_and(|g| g.is_calibrated()),
        }
    }
}
