//! Face presence bookkeeping

/// Counts face detections across a session.
///
/// Tracks the overall detection rate for the verdict and a consecutive-miss
/// run used by the session's early-failure policy.
#[derive(Debug, Clone, Default)]
pub struct FacePresenceTracker {
    frames_total: u32,
    frames_with_face: u32,
    consecutive_misses: u32,
}

impl FacePresenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame's face-presence flag.
    pub fn update(&mut self, face_found: bool) {
        self.frames_total += 1;
        if face_found {
            self.frames_with_face += 1;
            self.consecutive_misses = 0;
        } else {
            self.consecutive_misses += 1;
        }
    }

    /// Fraction of observed frames with a face, in [0, 1]. Zero before any
    /// frame arrives.
    pub fn detection_rate(&self) -> f32 {
        if self.frames_total == 0 {
            return 0.0;
        }
        self.frames_with_face as f32 / self.frames_total as f32
    }

    /// Frames observed so far.
    pub fn frames_total(&self) -> u32 {
        self.frames_total
    }

    /// Frames with a face so far.
    pub fn frames_with_face(&self) -> u32 {
        self.frames_with_face
    }

    /// Length of the current run of face-absent frames.
    pub fn consecutive_misses(&self) -> u32 {
        self.consecutive_misses
    }

    /// Reset for a new session.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
