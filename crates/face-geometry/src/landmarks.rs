//! Landmark sample data model

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of points in a full face-mesh landmark frame (MediaPipe Face Mesh).
pub const LANDMARK_COUNT: usize = 468;

/// Six-point left eye contour: [outer corner, upper lid x2, inner corner, lower lid x2].
pub const LEFT_EYE_CONTOUR: [usize; 6] = [33, 160, 158, 133, 153, 144];

/// Six-point right eye contour, mirrored ordering.
pub const RIGHT_EYE_CONTOUR: [usize; 6] = [362, 385, 387, 263, 373, 380];

/// Nose tip landmark index.
pub const NOSE_TIP: usize = 1;

/// Upper inner-lip midpoint.
pub const UPPER_LIP: usize = 13;

/// Lower inner-lip midpoint.
pub const LOWER_LIP: usize = 14;

/// Landmark contract errors
#[derive(Debug, Clone, Error)]
pub enum LandmarkError {
    /// Sample carried the wrong number of points
    #[error("Malformed landmark sample: expected {expected} points, got {actual}")]
    WrongPointCount { expected: usize, actual: usize },
}

/// A single 3D landmark point. `x`/`y` are normalized to [0, 1] in image
/// space; `z` is the mesh model's relative depth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// One frame's worth of facial landmarks plus a face-presence flag.
///
/// Produced once per sampling tick by the external landmark source. Frames
/// where the mesh model found no face (or produced a degenerate mesh) arrive
/// with `face_found = false` and an arbitrary `points` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandmarkSample {
    pub points: Vec<Point3>,
    /// Capture timestamp in milliseconds on the caller's monotonic clock.
    pub timestamp_ms: u64,
    pub face_found: bool,
}

impl LandmarkSample {
    /// Build a face-absent sample (no usable landmarks this tick).
    pub fn absent(timestamp_ms: u64) -> Self {
        Self {
            points: Vec::new(),
            timestamp_ms,
            face_found: false,
        }
    }

    /// Check the point-count contract. Only meaningful for frames with a
    /// face; absent frames carry no points.
    pub fn validate(&self) -> Result<(), LandmarkError> {
        if self.face_found && self.points.len() != LANDMARK_COUNT {
            return Err(LandmarkError::WrongPointCount {
                expected: LANDMARK_COUNT,
                actual: self.points.len(),
            });
        }
        Ok(())
    }
}
