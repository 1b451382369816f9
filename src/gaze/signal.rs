//! Iris landmarks to a single gaze point
//!
//! Each iris cluster is reduced to the mean of its four landmarks, converted to
//! integer pixels first. The gaze point is the midpoint of both centroids,
//! truncated to whole pixels.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{LEFT_IRIS, RIGHT_IRIS};

/// One detected face: landmark positions normalized to [0, 1] on both axes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceLandmarks {
    pub points: Vec<Vec2>,
}

impl FaceLandmarks {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    pub fn get(&self, index: usize) -> Option<Vec2> {
        self.points.get(index).copied()
    }
}

/// Pixel geometry of the frame the landmarks came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl Default for FrameSize {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

/// Pixel-space centroid of one landmark cluster
pub fn iris_centroid(
    landmarks: &FaceLandmarks,
    size: FrameSize,
    indices: &[usize],
    mirror: bool,
) -> Option<Vec2> {
    if indices.is_empty() {
        return None;
    }
    let scale = Vec2::new(size.width as f32, size.height as f32);
    let mut sum = Vec2::ZERO;
    for &i in indices {
        let mut p = landmarks.get(i)?;
        if mirror {
            p.x = 1.0 - p.x;
        }
        sum += (p * scale).trunc();
    }
    Some(sum / indices.len() as f32)
}

/// Gaze point for one frame, or None when the face lacks iris landmarks
pub fn gaze_point(landmarks: &FaceLandmarks, size: FrameSize, mirror: bool) -> Option<Vec2> {
    let left = iris_centroid(landmarks, size, &LEFT_IRIS, mirror)?;
    let right = iris_centroid(landmarks, size, &RIGHT_IRIS, mirror)?;
    Some(((left + right) / 2.0).trunc())
}
