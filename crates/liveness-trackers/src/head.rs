//! Head movement detection from nose-tip motion

use serde::{Deserialize, Serialize};

/// Head movement thresholds and timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadMovementConfig {
    /// Minimum frame-to-frame nose-x delta (normalized units) that counts as movement
    pub movement_threshold: f32,
    /// Minimum time between two countable movements (milliseconds)
    pub cooldown_ms: u64,
}

impl Default for HeadMovementConfig {
    fn default() -> Self {
        Self {
            movement_threshold: 0.02,
            cooldown_ms: 1000,
        }
    }
}

/// Tracks horizontal head movement across a session.
///
/// Movement is measured frame-to-frame, not against a fixed origin, so slow
/// drift never triggers while a deliberate head turn does. `has_moved` is a
/// one-way latch until `reset`.
#[derive(Debug, Clone)]
pub struct HeadMovementTracker {
    config: HeadMovementConfig,
    previous_nose_x: Option<f32>,
    has_moved: bool,
    last_movement_ms: Option<u64>,
}

impl HeadMovementTracker {
    pub fn new(config: HeadMovementConfig) -> Self {
        Self {
            config,
            previous_nose_x: None,
            has_moved: false,
            last_movement_ms: None,
        }
    }

    /// Feed one frame's nose-tip x position. Returns true only when this
    /// call newly registered a movement. The first call establishes the
    /// baseline and never registers.
    pub fn update(&mut self, nose_x: f32, now_ms: u64) -> bool {
        let moved = match self.previous_nose_x {
            Some(prev) => {
                (nose_x - prev).abs() > self.config.movement_threshold
                    && self.cooldown_elapsed(now_ms)
            }
            None => false,
        };

        // Baseline always advances so the next delta is frame-to-frame
        self.previous_nose_x = Some(nose_x);

        if moved {
            self.has_moved = true;
            self.last_movement_ms = Some(now_ms);
        }
        moved
    }

    /// Whether any movement has latched this session.
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Reset for a new session.
    pub fn reset(&mut self) {
        self.previous_nose_x = None;
        self.has_moved = false;
        self.last_movement_ms = None;
    }

    fn cooldown_elapsed(&self, now_ms: u64) -> bool {
        match self.last_movement_ms {
            Some(last) => now_ms.saturating_sub(last) >= self.config.cooldown_ms,
            None => true,
        }
    }
}
