//! Typed session events
//!
//! The engine queues discrete events instead of firing UI callbacks from
//! inside the detection loop; the caller drains them at its own pace.

use serde::{Deserialize, Serialize};

/// Events emitted by a running session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A blink was registered
    Blink { count: u32, at_ms: u64 },

    /// Head movement latched or re-registered
    HeadMovement { at_ms: u64 },

    /// A mouth activity was counted
    MouthActivity { count: u32, at_ms: u64 },

    /// Periodic progress through the sampling window
    Progress { elapsed_ms: u64, total_ms: u64 },

    /// The consecutive-miss ceiling was crossed; the session has failed
    FaceLost { consecutive_misses: u32, at_ms: u64 },
}

impl SessionEvent {
    /// Progress through the window as a fraction in [0, 1], when applicable.
    pub fn progress_fraction(&self) -> Option<f32> {
        match self {
            SessionEvent::Progress { elapsed_ms, total_ms } if *total_ms > 0 => {
                Some((*elapsed_ms as f32 / *total_ms as f32).min(1.0))
            }
            _ => None,
        }
    }
}
