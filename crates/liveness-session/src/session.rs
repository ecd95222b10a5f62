//! The liveness session state machine

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use face_geometry::{
    eye_aspect_ratio, mouth_opening, LandmarkSample, LEFT_EYE_CONTOUR, LOWER_LIP, NOSE_TIP,
    RIGHT_EYE_CONTOUR, UPPER_LIP,
};
use frame_history::{FrameHistory, FrameSnapshot};
use liveness_trackers::{
    BlinkTracker, FacePresenceTracker, HeadMovementTracker, MouthActivityTracker,
};

use crate::verdict::{self, FactorReadings};
use crate::{LivenessResult, SessionConfig, SessionError, SessionEvent, SessionState};

/// One bounded-duration liveness evaluation attempt.
///
/// The session is single-threaded and exclusively owned: the caller drives
/// it with `ingest` per captured frame and `tick` on the sampling cadence,
/// in non-decreasing timestamp order. Concurrent multi-user evaluation is
/// done by instantiating independent sessions; there is no shared state at
/// this layer.
///
/// Timestamps are the caller's monotonic clock in milliseconds. Out-of-order
/// delivery is a precondition violation: it skews cooldown and hysteresis
/// timing and is not defended against internally.
pub struct LivenessSession {
    id: Uuid,
    config: SessionConfig,
    state: SessionState,

    blink: BlinkTracker,
    head: HeadMovementTracker,
    mouth: MouthActivityTracker,
    presence: FacePresenceTracker,

    history: FrameHistory,
    events: VecDeque<SessionEvent>,

    started_at_ms: u64,
    started_at: DateTime<Utc>,
    verdict: Option<LivenessResult>,
}

impl LivenessSession {
    /// Create an idle session. Call [`start`](Self::start) to begin sampling.
    pub fn new(config: SessionConfig) -> Self {
        let history = FrameHistory::new(config.history_capacity);
        Self {
            id: Uuid::new_v4(),
            blink: BlinkTracker::new(config.blink.clone()),
            head: HeadMovementTracker::new(config.head.clone()),
            mouth: MouthActivityTracker::new(config.mouth.clone()),
            presence: FacePresenceTracker::new(),
            history,
            events: VecDeque::new(),
            started_at_ms: 0,
            started_at: Utc::now(),
            verdict: None,
            state: SessionState::Idle,
            config,
        }
    }

    /// Begin the sampling window at `now_ms` on the caller's clock.
    pub fn start(&mut self, now_ms: u64) -> Result<(), SessionError> {
        if self.state != SessionState::Idle {
            return Err(SessionError::InvalidState {
                operation: "start",
                state: self.state,
            });
        }
        self.blink.reset();
        self.head.reset();
        self.mouth.reset();
        self.presence.reset();
        self.history.clear();
        self.events.clear();
        self.started_at_ms = now_ms;
        self.started_at = Utc::now();
        self.state = SessionState::Running;
        info!(session_id = %self.id, duration_ms = self.config.duration_ms, "Liveness session started");
        Ok(())
    }

    /// Feed one captured landmark frame.
    ///
    /// Valid only while `Running`. A face-absent frame is counted, never
    /// fatal on its own; crossing the consecutive-miss ceiling fails the
    /// session. A malformed sample (wrong point count) faults the session:
    /// that is a frame-source bug, not a liveness failure.
    pub fn ingest(&mut self, sample: LandmarkSample) -> Result<(), SessionError> {
        if self.state != SessionState::Running {
            return Err(SessionError::InvalidState {
                operation: "ingest",
                state: self.state,
            });
        }

        if let Err(e) = sample.validate() {
            self.state = SessionState::Faulted;
            warn!(session_id = %self.id, error = %e, "Malformed sample; session faulted");
            return Err(SessionError::MalformedSample(e));
        }

        let now_ms = sample.timestamp_ms;

        if !sample.face_found {
            self.presence.update(false);
            self.history.push(FrameSnapshot {
                timestamp_ms: now_ms,
                face_found: false,
                blink_count: self.blink.count(),
                head_moved: self.head.has_moved(),
                mouth_activity_count: self.mouth.count(),
                ..Default::default()
            });

            let misses = self.presence.consecutive_misses();
            if misses > self.config.max_consecutive_misses {
                warn!(session_id = %self.id, misses, "Face lost; failing session early");
                self.events.push_back(SessionEvent::FaceLost {
                    consecutive_misses: misses,
                    at_ms: now_ms,
                });
                self.conclude(now_ms, Some("face lost from view"));
            }
            return Ok(());
        }

        self.presence.update(true);

        let ear_left = eye_aspect_ratio(&sample, &LEFT_EYE_CONTOUR);
        let ear_right = eye_aspect_ratio(&sample, &RIGHT_EYE_CONTOUR);
        let mouth_gap = mouth_opening(&sample, UPPER_LIP, LOWER_LIP);
        let nose_x = sample.points[NOSE_TIP].x;

        if let Some(event) = self.blink.update(ear_left, ear_right, now_ms) {
            debug!(session_id = %self.id, count = event.count, "Blink registered");
            self.events.push_back(SessionEvent::Blink {
                count: event.count,
                at_ms: event.at_ms,
            });
        }
        if self.head.update(nose_x, now_ms) {
            debug!(session_id = %self.id, "Head movement registered");
            self.events.push_back(SessionEvent::HeadMovement { at_ms: now_ms });
        }
        if self.mouth.update(mouth_gap, now_ms) {
            debug!(session_id = %self.id, count = self.mouth.count(), "Mouth activity registered");
            self.events.push_back(SessionEvent::MouthActivity {
                count: self.mouth.count(),
                at_ms: now_ms,
            });
        }

        self.history.push(FrameSnapshot {
            timestamp_ms: now_ms,
            face_found: true,
            avg_ear: (ear_left + ear_right) / 2.0,
            mouth_gap,
            nose_x,
            blink_count: self.blink.count(),
            head_moved: self.head.has_moved(),
            mouth_activity_count: self.mouth.count(),
        });

        Ok(())
    }

    /// Advance the session clock; called on the sampling cadence.
    ///
    /// Once `now_ms` reaches the end of the window the verdict is evaluated
    /// and the session goes terminal. In a terminal state this is a no-op
    /// passthrough so a caller's capture loop may overshoot by a tick.
    pub fn tick(&mut self, now_ms: u64) -> Result<SessionState, SessionError> {
        match self.state {
            SessionState::Idle => Err(SessionError::InvalidState {
                operation: "tick",
                state: self.state,
            }),
            SessionState::Running => {
                let elapsed = now_ms.saturating_sub(self.started_at_ms);
                if elapsed >= self.config.duration_ms {
                    if self.presence.frames_total() == 0 {
                        self.state = SessionState::TimedOut;
                        self.verdict = Some(verdict::no_samples(self.id, self.started_at, elapsed));
                        warn!(session_id = %self.id, "Window closed with no frames; timed out");
                    } else {
                        self.conclude(now_ms, None);
                    }
                } else {
                    self.events.push_back(SessionEvent::Progress {
                        elapsed_ms: elapsed,
                        total_ms: self.config.duration_ms,
                    });
                }
                Ok(self.state)
            }
            _ => Ok(self.state),
        }
    }

    /// Abort a running session. No verdict is produced; the caller keeps
    /// responsibility for releasing the camera.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Running {
            return Err(SessionError::InvalidState {
                operation: "cancel",
                state: self.state,
            });
        }
        self.blink.reset();
        self.head.reset();
        self.mouth.reset();
        self.presence.reset();
        self.history.clear();
        self.state = SessionState::Cancelled;
        info!(session_id = %self.id, "Liveness session cancelled");
        Ok(())
    }

    /// Take the verdict. Callable exactly once, and only from a terminal
    /// state reached by normal completion (`Passed`/`Failed`/`TimedOut`).
    /// Cancelled and faulted sessions have no verdict to take.
    pub fn finalize(&mut self) -> Result<LivenessResult, SessionError> {
        if !self.state.has_verdict() {
            return Err(SessionError::InvalidState {
                operation: "finalize",
                state: self.state,
            });
        }
        self.verdict.take().ok_or(SessionError::VerdictTaken)
    }

    /// Drain all queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain(..).collect()
    }

    /// Return the session to `Idle` for reuse after a verdict was read or
    /// the session was cancelled.
    pub fn reset(&mut self) {
        self.blink.reset();
        self.head.reset();
        self.mouth.reset();
        self.presence.reset();
        self.history.clear();
        self.events.clear();
        self.verdict = None;
        self.id = Uuid::new_v4();
        self.state = SessionState::Idle;
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Diagnostic history of the most recent frames.
    pub fn history(&self) -> &FrameHistory {
        &self.history
    }

    /// Milliseconds consumed of the window, zero before `start`.
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        if self.state == SessionState::Idle {
            return 0;
        }
        now_ms.saturating_sub(self.started_at_ms)
    }

    /// Evaluate the verdict and go terminal.
    fn conclude(&mut self, now_ms: u64, fail_note: Option<&str>) {
        let readings = FactorReadings {
            blinks: self.blink.count(),
            head_moved: self.head.has_moved(),
            mouth_activities: self.mouth.count(),
            face_detection_rate: self.presence.detection_rate(),
            frames_total: self.presence.frames_total(),
        };
        let elapsed = now_ms.saturating_sub(self.started_at_ms);
        let result = verdict::evaluate(
            &self.config,
            readings,
            self.id,
            self.started_at,
            elapsed,
            fail_note,
        );
        self.state = if result.is_live {
            SessionState::Passed
        } else {
            SessionState::Failed
        };
        info!(
            session_id = %self.id,
            is_live = result.is_live,
            confidence = result.confidence,
            reason = %result.reason,
            "Liveness session concluded"
        );
        self.verdict = Some(result);
    }
}
