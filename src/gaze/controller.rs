//! Per-frame gaze processing
//!
//! Frames without a face are skipped entirely. While calibrating, gaze points
//! feed the baseline and the published direction stays CENTER.

use super::calibrator::Calibrator;
use super::classifier::{DirectionClassifier, Thresholds};
use super::signal::{FaceLandmarks, FrameSize, gaze_point};
use super::Gaze;
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct GazeController {
    calibrator: Calibrator,
    classifier: DirectionClassifier,
    mirror: bool,
    current: Gaze,
}

impl GazeController {
    pub fn new(settings: &Settings) -> Self {
        Self {
            calibrator: Calibrator::new(
                settings.calibration_frames,
                settings.calibration_smoothing,
            ),
            classifier: DirectionClassifier::new(Thresholds {
                x: settings.threshold_x,
                y: settings.threshold_y,
            }),
            mirror: settings.mirror_camera,
            current: Gaze::Center,
        }
    }

    /// Process one detector result and return the direction to publish
    pub fn process(&mut self, face: Option<&FaceLandmarks>, size: FrameSize) -> Gaze {
        let Some(point) = face.and_then(|f| gaze_point(f, size, self.mirror)) else {
            return self.direction();
        };

        if !self.calibrator.is_complete() {
            self.calibrator.observe(point);
            return self.direction();
        }

        if let Some(baseline) = self.calibrator.baseline() {
            let (gaze, _) = self.classifier.update(point, baseline);
            self.current = gaze;
        }
        self.direction()
    }

    /// Current direction; CENTER until calibrated
    pub fn direction(&self) -> Gaze {
        if self.calibrator.is_complete() {
            self.current
        } else {
            Gaze::Center
        }
    }

    pub fn is_calibrated(&self) -> bool {
        self.calibrator.is_complete()
    }

    pub fn calibrator(&self) -> &Calibrator {
        &self.calibrator
    }

    /// Start calibration over and publish CENTER
    pub fn reset(&mut self) {
        self.calibrator.reset();
        self.classifier.reset();
        self.current = Gaze::Center;
    }
}
