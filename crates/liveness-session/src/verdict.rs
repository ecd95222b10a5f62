//! Verdict evaluation and the result record

use crate::SessionConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Immutable outcome of one liveness session, produced exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResult {
    /// Session identity for telemetry correlation
    pub session_id: Uuid,

    /// Whether all hard pass conditions were met
    pub is_live: bool,

    /// Mean of the four per-factor confidences, in [0, 1]. Reported for
    /// telemetry; the pass gate is the hard conditions, never this score.
    pub confidence: f32,

    /// Blinks registered during the window
    pub detected_blinks: u32,

    /// Fraction of frames with a visible face
    pub face_detection_rate: f32,

    /// Whether head movement latched
    pub head_moved: bool,

    /// Mouth activities counted
    pub mouth_activity_count: u32,

    /// Frames observed before the session ended
    pub frames_total: u32,

    /// Human-readable pass/fail explanation, naming each unmet condition
    pub reason: String,

    /// Wall-clock start of the session
    pub started_at: DateTime<Utc>,

    /// Milliseconds of the window actually consumed
    pub elapsed_ms: u64,
}

/// Raw factor readings collected by the session at evaluation time.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FactorReadings {
    pub blinks: u32,
    pub head_moved: bool,
    pub mouth_activities: u32,
    pub face_detection_rate: f32,
    pub frames_total: u32,
}

/// Evaluate the verdict rule against the collected factor readings.
///
/// Four hard gates, all required for a pass. The confidence score averages
/// the per-factor confidences but never overrides a failed gate: three
/// strong factors cannot mask a complete failure on the fourth.
pub(crate) fn evaluate(
    config: &SessionConfig,
    readings: FactorReadings,
    session_id: Uuid,
    started_at: DateTime<Utc>,
    elapsed_ms: u64,
    fail_note: Option<&str>,
) -> LivenessResult {
    let blink_ok = readings.blinks >= config.min_blinks;
    let head_ok = readings.head_moved;
    let mouth_ok = readings.mouth_activities >= config.min_mouth_activity;
    let face_ok = readings.face_detection_rate >= config.min_face_detection_rate;

    let blink_conf = ratio_confidence(readings.blinks, config.min_blinks);
    let head_conf = if readings.head_moved { 1.0 } else { 0.0 };
    let mouth_conf = ratio_confidence(readings.mouth_activities, config.min_mouth_activity);
    let face_conf = readings.face_detection_rate.clamp(0.0, 1.0);

    let confidence = (blink_conf + head_conf + mouth_conf + face_conf) / 4.0;
    let is_live = blink_ok && head_ok && mouth_ok && face_ok && fail_note.is_none();

    let reason = if is_live {
        "Liveness confirmed: all checks passed".to_string()
    } else {
        let mut unmet = Vec::new();
        if let Some(note) = fail_note {
            unmet.push(note.to_string());
        }
        if !blink_ok {
            unmet.push(format!(
                "only {}/{} blinks detected (blink naturally)",
                readings.blinks, config.min_blinks
            ));
        }
        if !head_ok {
            unmet.push("no head movement detected (turn your head slightly)".to_string());
        }
        if !mouth_ok {
            unmet.push(format!(
                "only {}/{} mouth activities detected (open your mouth)",
                readings.mouth_activities, config.min_mouth_activity
            ));
        }
        if !face_ok {
            unmet.push(format!(
                "face visible in only {:.0}% of frames (keep your face in view)",
                readings.face_detection_rate * 100.0
            ));
        }
        format!("Liveness check failed: {}", unmet.join("; "))
    };

    LivenessResult {
        session_id,
        is_live,
        confidence,
        detected_blinks: readings.blinks,
        face_detection_rate: readings.face_detection_rate,
        head_moved: readings.head_moved,
        mouth_activity_count: readings.mouth_activities,
        frames_total: readings.frames_total,
        reason,
        started_at,
        elapsed_ms,
    }
}

/// A window that closed without a single frame yields an empty negative
/// result rather than an evaluated one.
pub(crate) fn no_samples(
    session_id: Uuid,
    started_at: DateTime<Utc>,
    elapsed_ms: u64,
) -> LivenessResult {
    LivenessResult {
        session_id,
        is_live: false,
        confidence: 0.0,
        detected_blinks: 0,
        face_detection_rate: 0.0,
        head_moved: false,
        mouth_activity_count: 0,
        frames_total: 0,
        reason: "Liveness check failed: no frames were received during the sampling window"
            .to_string(),
        started_at,
        elapsed_ms,
    }
}

fn ratio_confidence(count: u32, required: u32) -> f32 {
    if required == 0 {
        return 1.0;
    }
    (count as f32 / required as f32).min(1.0)
}
