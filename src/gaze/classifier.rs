//! Gaze displacement to a discrete direction
//!
//! A single dominant-axis decision per frame: whichever of |dx|, |dy| is
//! larger picks the axis (ties go to the vertical axis), then that axis'
//! threshold decides between a direction and CENTER.

use glam::Vec2;

use super::Gaze;
use crate::sim::Direction;

/// Per-axis displacement thresholds in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub x: f32,
    pub y: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { x: 12.0, y: 10.0 }
    }
}

/// Classify a gaze point against the calibrated baseline
pub fn classify(point: Vec2, baseline: Vec2, thresholds: Thresholds) -> Gaze {
    let d = point - baseline;
    if d.x.abs() > d.y.abs() {
        if d.x > thresholds.x {
            Gaze::Toward(Direction::Right)
        } else if d.x < -thresholds.x {
            Gaze::Toward(Direction::Left)
        } else {
            Gaze::Center
        }
    } else if d.y > thresholds.y {
        Gaze::Toward(Direction::Down)
    } else if d.y < -thresholds.y {
        Gaze::Toward(Direction::Up)
    } else {
        Gaze::Center
    }
}

/// Classifier that remembers its last output to report changes
#[derive(Debug, Clone)]
pub struct DirectionClassifier {
    thresholds: Thresholds,
    last: Gaze,
}

impl DirectionClassifier {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            last: Gaze::Center,
        }
    }

    pub fn last(&self) -> Gaze {
        self.last
    }

    /// Classify and return (gaze, changed)
    pub fn update(&mut self, point: Vec2, baseline: Vec2) -> (Gaze, bool) {
        let gaze = classify(point, baseline, self.thresholds);
        let changed = gaze != self.last;
        if changed {
            let d = point - baseline;
            log::info!(
                "Gaze direction changed: {} -> {} (dx={:.1}, dy={:.1})",
                self.last.as_str(),
                gaze.as_str(),
                d.x,
                d.y
            );
            self.last = gaze;
        }
        (gaze, changed)
    }

    pub fn reset(&mut self) {
        self.last = Gaze::Center;
    }
}
