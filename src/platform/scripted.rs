//! Scripted camera and face sources
//!
//! Stand-ins for a webcam and a face-mesh model, so the whole gaze path can
//! run headless. A `GazeScript` lists how many frames to hold each pose,
//! e.g. `"30:center,20:right,10:none,40:down"`.

use std::str::FromStr;

use glam::Vec2;

use crate::consts::{FACE_MESH_LANDMARKS, LEFT_IRIS, RIGHT_IRIS};
use crate::gaze::{FaceLandmarks, Frame, FrameSize, FrameSource, Gaze, LandmarkDetector};
use crate::sim::Direction;

/// Normalized iris offset used for a directed pose
const LOOK_OFFSET: Vec2 = Vec2::new(0.08, 0.1);
/// Horizontal gap between the two irises
const IRIS_SPREAD: f32 = 0.06;

/// What the scripted face does for a stretch of frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    Look(Gaze),
    /// Face out of view
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GazeScript {
    pub segments: Vec<(u32, Pose)>,
}

impl GazeScript {
    /// Pose at a frame index; the last pose holds forever
    pub fn pose_at(&self, frame: u64) -> Pose {
        let mut end = 0u64;
        for &(frames, pose) in &self.segments {
            end += frames as u64;
            if frame < end {
                return pose;
            }
        }
        self.segments
            .last()
            .map(|&(_, pose)| pose)
            .unwrap_or(Pose::Look(Gaze::Center))
    }
}

impl Default for GazeScript {
    /// Calibrate, then trace a loop around the board
    fn default() -> Self {
        Self {
            segments: vec![
                (40, Pose::Look(Gaze::Center)),
                (60, Pose::Look(Gaze::Toward(Direction::Right))),
                (60, Pose::Look(Gaze::Toward(Direction::Down))),
                (20, Pose::Absent),
                (60, Pose::Look(Gaze::Toward(Direction::Left))),
                (30, Pose::Look(Gaze::Center)),
                (60, Pose::Look(Gaze::Toward(Direction::Up))),
            ],
        }
    }
}

impl FromStr for GazeScript {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (count, pose) = part
                .split_once(':')
                .ok_or_else(|| format!("expected FRAMES:POSE, got '{part}'"))?;
            let count: u32 = count
                .trim()
                .parse()
                .map_err(|_| format!("bad frame count in '{part}'"))?;
            let pose = match pose.trim().to_lowercase().as_str() {
                "center" => Pose::Look(Gaze::Center),
                "up" => Pose::Look(Gaze::Toward(Direction::Up)),
                "down" => Pose::Look(Gaze::Toward(Direction::Down)),
                "left" => Pose::Look(Gaze::Toward(Direction::Left)),
                "right" => Pose::Look(Gaze::Toward(Direction::Right)),
                "none" | "absent" => Pose::Absent,
                other => return Err(format!("unknown pose '{other}'")),
            };
            segments.push((count, pose));
        }
        if segments.is_empty() {
            return Err("empty gaze script".into());
        }
        Ok(Self { segments })
    }
}

/// Camera producing blank frames of a fixed size
#[derive(Debug, Clone)]
pub struct ScriptedCamera {
    size: FrameSize,
    open: bool,
}

impl ScriptedCamera {
    pub fn new(size: FrameSize) -> Self {
        Self { size, open: true }
    }

    /// A camera that failed to open
    pub fn unavailable() -> Self {
        Self {
            size: FrameSize::default(),
            open: false,
        }
    }
}

impl FrameSource for ScriptedCamera {
    fn is_open(&self) -> bool {
        self.open
    }

    fn read_frame(&mut self) -> Option<Frame> {
        self.open.then(|| Frame {
            size: self.size,
            rgb: Vec::new(),
        })
    }
}

/// Face-mesh stand-in that follows a `GazeScript`, one pose step per frame
#[derive(Debug, Clone)]
pub struct ScriptedFace {
    script: GazeScript,
    /// Landmarks are reported for a mirrored pipeline
    mirrored: bool,
    frame: u64,
}

impl ScriptedFace {
    pub fn new(script: GazeScript, mirrored: bool) -> Self {
        Self {
            script,
            mirrored,
            frame: 0,
        }
    }

    /// Landmarks for a gaze pose around the image center
    pub fn landmarks_for(gaze: Gaze, mirrored: bool) -> FaceLandmarks {
        let mut offset = match gaze {
            Gaze::Center => Vec2::ZERO,
            Gaze::Toward(d) => d.delta().as_vec2() * LOOK_OFFSET,
        };
        if mirrored {
            offset.x = -offset.x;
        }
        let center = Vec2::splat(0.5) + offset;

        let mut points = vec![Vec2::splat(0.5); FACE_MESH_LANDMARKS];
        let eyes = [
            (LEFT_IRIS, center + Vec2::new(IRIS_SPREAD, 0.0)),
            (RIGHT_IRIS, center - Vec2::new(IRIS_SPREAD, 0.0)),
        ];
        for (indices, eye) in eyes {
            // Four points around the iris center
            let ring = [
                Vec2::new(0.005, 0.0),
                Vec2::new(0.0, 0.005),
                Vec2::new(-0.005, 0.0),
                Vec2::new(0.0, -0.005),
            ];
            for (&i, r) in indices.iter().zip(ring) {
                points[i] = eye + r;
            }
        }
        FaceLandmarks::new(points)
    }
}

impl LandmarkDetector for ScriptedFace {
    fn detect(&mut self, _frame: &Frame) -> Option<FaceLandmarks> {
        let pose = self.script.pose_at(self.frame);
        self.frame += 1;
        match pose {
            Pose::Look(gaze) => Some(Self::landmarks_for(gaze, self.mirrored)),
            Pose::Absent => None,
        }
    }
}
