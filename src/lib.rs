//! Gaze Snake - a grid Snake game steered by eye gaze or keyboard
//!
//! Core modules:
//! - `sim`: Deterministic simulation (snake movement, spawning, scoring)
//! - `gaze`: Iris landmark reduction, calibration and direction classification
//! - `platform`: Keyboard mapping, clocks and scripted input sources
//! - `session`: Frame loop gluing input sources to the simulation
//! - `settings`: Tunable thresholds and timings

pub mod gaze;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::Session;
pub use settings::{GrowthPolicy, Settings, ThresholdPreset};

/// Game configuration constants
pub mod consts {
    /// Cells per grid side (cells are 0..GRID_SIZE on both axes)
    pub const GRID_SIZE: i32 = 25;
    /// Head position after a reset
    pub const START_CELL: (i32, i32) = (10, 10);

    /// Body movement cadence, independent of frame rate
    pub const MOVE_INTERVAL_MS: u64 = 200;
    /// Render/game loop cap
    pub const FRAME_RATE: u32 = 60;

    /// Every Nth normal food spawns a bonus
    pub const BONUS_EVERY: u32 = 5;
    /// Bonus lifetime after spawn
    pub const BONUS_DURATION_MS: u64 = 5000;
    /// Score for normal food
    pub const FOOD_SCORE: u64 = 1;
    /// Score for bonus food
    pub const BONUS_SCORE: u64 = 5;
    /// grow() calls issued when a bonus is eaten
    pub const BONUS_GROWTH: u32 = 5;
    /// Collision flash duration
    pub const HIT_EFFECT_MS: u64 = 1000;

    /// Frames averaged into the neutral gaze baseline
    pub const CALIBRATION_FRAMES: u32 = 30;
    /// EMA weight of each new calibration sample
    pub const CALIBRATION_SMOOTHING: f32 = 0.1;
    /// Delay after each tracking iteration (~30 fps)
    pub const TRACKER_INTERVAL_MS: u64 = 30;

    /// Iris refinement landmarks of the face mesh
    pub const LEFT_IRIS: [usize; 4] = [474, 475, 476, 477];
    pub const RIGHT_IRIS: [usize; 4] = [469, 470, 471, 472];
    /// Landmark count of a refined face mesh
    pub const FACE_MESH_LANDMARKS: usize = 478;
}

/// Toroidal wrap of a single grid coordinate after a one-cell step
#[inline]
pub fn wrap_coord(v: i32) -> i32 {
    if v < 0 {
        consts::GRID_SIZE - 1
    } else if v >= consts::GRID_SIZE {
        0
    } else {
        v
    }
}
