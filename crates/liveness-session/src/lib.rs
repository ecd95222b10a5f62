//! Liveness Decision Engine
//!
//! Stateful per-frame signal fusion over facial landmark samples:
//! - Blink, head-movement, mouth-activity, and face-presence tracking
//! - Fixed-duration sampling window with early face-lost failure
//! - Hard pass gates plus an averaged confidence score
//! - Typed event queue for caller progress/feedback UI
//!
//! One [`LivenessSession`] evaluates one attempt and produces exactly one
//! [`LivenessResult`]. Sessions are independent values; run as many in
//! parallel as there are users, one frame source each.

pub mod config;
pub mod driver;
pub mod events;
pub mod session;
pub mod state;
mod verdict;

pub use config::SessionConfig;
pub use events::SessionEvent;
pub use session::LivenessSession;
pub use state::SessionState;
pub use verdict::LivenessResult;

// Re-exported so callers can build samples without a direct geometry dependency
pub use face_geometry::{LandmarkSample, Point3, LANDMARK_COUNT};

use face_geometry::LandmarkError;
use thiserror::Error;

/// Session contract errors.
///
/// These mark caller bugs or a dead frame source, never a negative liveness
/// verdict: a failed check is a normal `LivenessResult { is_live: false }`.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Operation invoked in a state that does not permit it
    #[error("Operation '{operation}' is invalid in session state {state:?}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },

    /// Frame source delivered a sample violating the landmark contract
    #[error("Malformed landmark sample: {0}")]
    MalformedSample(#[from] LandmarkError),

    /// The single verdict of this session was already taken
    #[error("Session verdict was already taken")]
    VerdictTaken,

    /// The frame source closed before the session reached a verdict
    #[error("Frame source closed before the session completed")]
    SourceClosed,
}
