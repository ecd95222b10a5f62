//! Session configuration

use liveness_trackers::{BlinkConfig, HeadMovementConfig, MouthActivityConfig};
use serde::{Deserialize, Serialize};

/// Liveness session configuration.
///
/// Defaults match the production tuning: an 8 s window sampled at ~5 Hz,
/// requiring one blink, one head movement, two mouth activities, and a face
/// in at least 80% of frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Blink tracker thresholds
    pub blink: BlinkConfig,

    /// Head movement tracker thresholds
    pub head: HeadMovementConfig,

    /// Mouth activity tracker thresholds
    pub mouth: MouthActivityConfig,

    /// Total sampling window (milliseconds)
    pub duration_ms: u64,

    /// Expected sampling cadence, advisory for the frame source (milliseconds)
    pub frame_interval_ms: u64,

    /// Minimum blinks for a pass
    pub min_blinks: u32,

    /// Minimum mouth activities for a pass
    pub min_mouth_activity: u32,

    /// Minimum face detection rate for a pass
    pub min_face_detection_rate: f32,

    /// Consecutive face-absent frames beyond which the session fails early
    pub max_consecutive_misses: u32,

    /// Diagnostic frame history depth
    pub history_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            blink: BlinkConfig::default(),
            head: HeadMovementConfig::default(),
            mouth: MouthActivityConfig::default(),
            duration_ms: 8000,
            frame_interval_ms: 200,
            min_blinks: 1,
            min_mouth_activity: 2,
            min_face_detection_rate: 0.8,
            max_consecutive_misses: 10,
            history_capacity: 10,
        }
    }
}

impl SessionConfig {
    /// Create strict config (more required activity, less tolerance for misses)
    pub fn strict() -> Self {
        Self {
            min_blinks: 2,
            min_mouth_activity: 3,
            min_face_detection_rate: 0.9,
            max_consecutive_misses: 5,
            ..Default::default()
        }
    }

    /// Create lenient config (longer window, fewer required signals)
    pub fn lenient() -> Self {
        Self {
            duration_ms: 12000,
            min_mouth_activity: 1,
            min_face_detection_rate: 0.6,
            max_consecutive_misses: 20,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_production_tuning() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.duration_ms, 8000);
        assert_eq!(cfg.frame_interval_ms, 200);
        assert_eq!(cfg.min_blinks, 1);
        assert_eq!(cfg.min_mouth_activity, 2);
        assert!((cfg.min_face_detection_rate - 0.8).abs() < 1e-6);
        assert_eq!(cfg.max_consecutive_misses, 10);
        assert!((cfg.blink.closed_threshold - 0.20).abs() < 1e-6);
        assert!((cfg.blink.open_threshold - 0.25).abs() < 1e-6);
        assert_eq!(cfg.blink.cooldown_ms, 500);
        assert!((cfg.head.movement_threshold - 0.02).abs() < 1e-6);
        assert_eq!(cfg.head.cooldown_ms, 1000);
        assert!((cfg.mouth.opening_threshold - 0.04).abs() < 1e-6);
        assert_eq!(cfg.mouth.cooldown_ms, 800);
    }

    #[test]
    fn test_presets_diverge_from_default() {
        assert!(SessionConfig::strict().min_blinks > SessionConfig::default().min_blinks);
        assert!(SessionConfig::lenient().duration_ms > SessionConfig::default().duration_ms);
    }
}
