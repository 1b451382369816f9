//! Background gaze tracking loop
//!
//! Polls the camera, runs the landmark detector and publishes the classified
//! direction into a lock-free cell the game loop reads every frame. The game
//! side only ever sees the last written value.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use thiserror::Error;

use super::Gaze;
use super::controller::GazeController;
use super::signal::{FaceLandmarks, FrameSize};
use crate::settings::Settings;

/// A captured camera image
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub size: FrameSize,
    /// Packed RGB rows; may be empty for synthetic sources
    pub rgb: Vec<u8>,
}

/// Pull-based, blocking camera
pub trait FrameSource: Send {
    fn is_open(&self) -> bool;
    /// Next frame, or None when the read failed
    fn read_frame(&mut self) -> Option<Frame>;
}

/// External face-mesh model: at most one face per frame
pub trait LandmarkDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Option<FaceLandmarks>;
}

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("cannot open camera")]
    CameraUnavailable,
    #[error("failed to spawn tracking thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// State shared between the tracking thread and the game loop
#[derive(Debug)]
pub struct SharedGaze {
    direction: AtomicU8,
    calibrated: AtomicBool,
    recalibrate: AtomicBool,
    running: AtomicBool,
}

impl Default for SharedGaze {
    fn default() -> Self {
        Self {
            direction: AtomicU8::new(Gaze::Center.to_u8()),
            calibrated: AtomicBool::new(false),
            recalibrate: AtomicBool::new(false),
            running: AtomicBool::new(false),
        }
    }
}

impl SharedGaze {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last published direction
    pub fn direction(&self) -> Gaze {
        Gaze::from_u8(self.direction.load(Ordering::Acquire))
    }

    pub fn publish(&self, gaze: Gaze) {
        self.direction.store(gaze.to_u8(), Ordering::Release);
    }

    pub fn is_calibrated(&self) -> bool {
        self.calibrated.load(Ordering::Acquire)
    }

    pub fn set_calibrated(&self, calibrated: bool) {
        self.calibrated.store(calibrated, Ordering::Release);
    }

    /// Ask the tracking loop to restart calibration
    pub fn request_recalibration(&self) {
        self.recalibrate.store(true, Ordering::Release);
        self.calibrated.store(false, Ordering::Release);
        self.publish(Gaze::Center);
    }

    /// Consume a pending recalibration request
    pub fn take_recalibration(&self) -> bool {
        self.recalibrate.swap(false, Ordering::AcqRel)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

/// Owns the tracking thread
pub struct GazeTracker {
    shared: Arc<SharedGaze>,
    handle: Option<JoinHandle<()>>,
}

impl GazeTracker {
    /// Start tracking on a background thread
    pub fn start<S, D>(source: S, detector: D, settings: &Settings) -> Result<Self, TrackerError>
    where
        S: FrameSource + 'static,
        D: LandmarkDetector + 'static,
    {
        if !source.is_open() {
            return Err(TrackerError::CameraUnavailable);
        }

        let shared = Arc::new(SharedGaze::new());
        shared.running.store(true, Ordering::Release);

        let controller = GazeController::new(settings);
        let interval = Duration::from_millis(settings.tracker_interval_ms);
        let thread_shared = Arc::clone(&shared);
        let handle = thread::Builder::new()
            .name("gaze-tracker".into())
            .spawn(move || track(source, detector, controller, interval, &thread_shared))?;

        log::info!("Gaze tracking started, look straight ahead to calibrate");
        Ok(Self {
            shared,
            handle: Some(handle),
        })
    }

    pub fn shared(&self) -> Arc<SharedGaze> {
        Arc::clone(&self.shared)
    }

    pub fn direction(&self) -> Gaze {
        self.shared.direction()
    }

    /// Signal the loop to stop and wait for its current iteration to finish
    pub fn stop(&mut self) {
        self.shared.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("Gaze tracking thread panicked");
            }
            log::info!("Gaze tracking stopped");
        }
    }
}

impl Drop for GazeTracker {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Tracking loop body
fn track<S, D>(
    mut source: S,
    mut detector: D,
    mut controller: GazeController,
    interval: Duration,
    shared: &SharedGaze,
) where
    S: FrameSource,
    D: LandmarkDetector,
{
    while shared.is_running() {
        poll_once(&mut source, &mut detector, &mut controller, shared);
        thread::sleep(interval);
    }
}

/// One tracking iteration: honour a recalibration request, then read,
/// detect and publish a single frame
fn poll_once<S, D>(
    source: &mut S,
    detector: &mut D,
    controller: &mut GazeController,
    shared: &SharedGaze,
) where
    S: FrameSource,
    D: LandmarkDetector,
{
    if shared.take_recalibration() {
        controller.reset();
        // A late write from the previous warm-up may have set it again
        shared.set_calibrated(false);
        log::info!("Recalibrating gaze tracking");
    }

    if let Some(frame) = source.read_frame() {
        let face = detector.detect(&frame);
        let was_calibrated = controller.is_calibrated();
        let gaze = controller.process(face.as_ref(), frame.size);
        if controller.is_calibrated() && !was_calibrated {
            shared.set_calibrated(true);
        }
        shared.publish(gaze);
    }
}
