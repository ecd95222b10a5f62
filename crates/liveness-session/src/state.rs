//! Session lifecycle states

use serde::{Deserialize, Serialize};

/// Lifecycle of one liveness evaluation attempt.
///
/// Every state other than `Idle` and `Running` is terminal. `Faulted` marks a
/// caller contract violation (malformed sample) and is kept distinct from
/// `Failed`, which is a cleanly evaluated negative verdict, so telemetry can
/// separate integration bugs from genuine rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Idle,
    Running,
    /// All hard pass conditions met at the duration cutoff
    Passed,
    /// Verdict evaluated negative, or the face was lost for too many
    /// consecutive frames
    Failed,
    /// The sampling window closed without a single ingested frame
    TimedOut,
    /// Caller aborted the session before a verdict
    Cancelled,
    /// Contract violation; no verdict exists
    Faulted,
}

impl SessionState {
    /// Whether the session can make no further transitions.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionState::Idle | SessionState::Running)
    }

    /// Whether a verdict is available to `finalize`.
    pub fn has_verdict(&self) -> bool {
        matches!(
            self,
            SessionState::Passed | SessionState::Failed | SessionState::TimedOut
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_classification() {
        assert!(!SessionState::Idle.is_terminal());
        assert!(!SessionState::Running.is_terminal());
        for s in [
            SessionState::Passed,
            SessionState::Failed,
            SessionState::TimedOut,
            SessionState::Cancelled,
            SessionState::Faulted,
        ] {
            assert!(s.is_terminal());
        }
    }

    #[test]
    fn test_verdict_availability() {
        assert!(SessionState::Passed.has_verdict());
        assert!(SessionState::Failed.has_verdict());
        assert!(SessionState::TimedOut.has_verdict());
        assert!(!SessionState::Cancelled.has_verdict());
        assert!(!SessionState::Faulted.has_verdict());
        assert!(!SessionState::Running.has_verdict());
    }
}
