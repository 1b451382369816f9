//! Neutral gaze baseline
//!
//! The first sample becomes the baseline; later samples are blended in with
//! an exponential moving average until the warm-up count is reached.

use glam::Vec2;

use crate::consts::{CALIBRATION_FRAMES, CALIBRATION_SMOOTHING};

#[derive(Debug, Clone, PartialEq)]
pub struct Calibrator {
    baseline: Option<Vec2>,
    frames_seen: u32,
    complete: bool,
    required_frames: u32,
    /// Weight of the newest sample
    smoothing: f32,
}

impl Default for Calibrator {
    fn default() -> Self {
        Self::new(CALIBRATION_FRAMES, CALIBRATION_SMOOTHING)
    }
}

impl Calibrator {
    pub fn new(required_frames: u32, smoothing: f32) -> Self {
        Self {
            baseline: None,
            frames_seen: 0,
            complete: false,
            required_frames,
            smoothing,
        }
    }

    /// Feed one gaze sample; ignored once calibration is complete
    pub fn observe(&mut self, point: Vec2) {
        if self.complete {
            return;
        }
        self.baseline = Some(match self.baseline {
            None => point,
            Some(b) => b * (1.0 - self.smoothing) + point * self.smoothing,
        });
        self.frames_seen += 1;
        if self.frames_seen >= self.required_frames {
            self.complete = true;
            log::info!(
                "Gaze calibration complete after {} frames",
                self.frames_seen
            );
        }
    }

    pub fn reset(&mut self) {
        self.baseline = None;
        self.frames_seen = 0;
        self.complete = false;
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn baseline(&self) -> Option<Vec2> {
        self.baseline
    }

    pub fn frames_seen(&self) -> u32 {
        self.frames_seen
    }
}
