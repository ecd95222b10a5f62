//! Frame Diagnostic History
//!
//! Provides a small overwrite-oldest ring buffer of per-frame liveness
//! diagnostics. A session keeps only the most recent frames; the history is
//! for post-hoc inspection and telemetry, never for the verdict itself.

mod buffer;

pub use buffer::{FrameHistory, DEFAULT_CAPACITY};

use serde::{Deserialize, Serialize};

/// Per-frame diagnostic snapshot pushed by the session after each ingest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// Capture timestamp (caller's monotonic clock, milliseconds)
    pub timestamp_ms: u64,
    /// Whether the landmark source found a face this frame
    pub face_found: bool,
    /// Average eye aspect ratio across both eyes (0.0 when no face)
    pub avg_ear: f32,
    /// Mouth opening distance (0.0 when no face)
    pub mouth_gap: f32,
    /// Nose tip x position (0.0 when no face)
    pub nose_x: f32,
    /// Running blink count at this frame
    pub blink_count: u32,
    /// Whether head movement had latched by this frame
    pub head_moved: bool,
    /// Running mouth activity count at this frame
    pub mouth_activity_count: u32,
}
