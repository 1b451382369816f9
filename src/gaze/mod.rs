//! Gaze control
//!
//! Reduces face-mesh iris landmarks to a pixel gaze point, learns a neutral
//! baseline during warm-up, then classifies each frame into a direction.
//! The face-mesh model itself is an external collaborator (`LandmarkDetector`).

pub mod calibrator;
pub mod classifier;
pub mod controller;
pub mod signal;
pub mod tracker;

pub use calibrator::Calibrator;
pub use classifier::{DirectionClassifier, Thresholds, classify};
pub use controller::GazeController;
pub use signal::{FaceLandmarks, FrameSize, gaze_point, iris_centroid};
pub use tracker::{Frame, FrameSource, GazeTracker, LandmarkDetector, SharedGaze, TrackerError};

use serde::{Deserialize, Serialize};

use crate::sim::Direction;

/// Classified gaze for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gaze {
    /// Within thresholds of the baseline
    Center,
    Toward(Direction),
}

impl Gaze {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gaze::Center => "CENTER",
            Gaze::Toward(d) => d.as_str(),
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            Gaze::Center => 0,
            Gaze::Toward(Direction::Up) => 1,
            Gaze::Toward(Direction::Down) => 2,
            Gaze::Toward(Direction::Left) => 3,
            Gaze::Toward(Direction::Right) => 4,
        }
    }

    /// Unknown codes decode as CENTER
    pub fn from_u8(v: u8) -> Self {
        match v {
            1 => Gaze::Toward(Direction::Up),
            2 => Gaze::Toward(Direction::Down),
            3 => Gaze::Toward(Direction::Left),
            4 => Gaze::Toward(Direction::Right),
            _ => Gaze::Center,
        }
    }
}
