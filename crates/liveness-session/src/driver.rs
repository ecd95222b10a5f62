//! Async sample delivery driver
//!
//! The engine itself is synchronous and single-consumer: no two `ingest`
//! calls for one session may run concurrently. This driver owns that
//! contract for async hosts. Capture tasks push completed frames into a
//! bounded mpsc channel; the driver pulls them one at a time, feeds the
//! session, and returns the verdict when the session goes terminal.

use tokio::sync::mpsc;
use tracing::debug;

use face_geometry::LandmarkSample;

use crate::{LivenessResult, LivenessSession, SessionError, SessionEvent};

/// Drive a session to completion from a channel of landmark samples.
///
/// The session is started at the first sample's timestamp; each sample is
/// ingested and then the session clock is ticked with that same timestamp,
/// so the channel's delivery order is the session's frame order. Queued
/// events are forwarded to `events` after every frame when a sink is given.
///
/// Returns the verdict once the session reaches `Passed`, `Failed`, or
/// `TimedOut`. If the sample channel closes while the session is still
/// running, the session is cancelled and [`SessionError::SourceClosed`] is
/// returned.
pub async fn run(
    mut session: LivenessSession,
    mut samples: mpsc::Receiver<LandmarkSample>,
    events: Option<mpsc::UnboundedSender<SessionEvent>>,
) -> Result<LivenessResult, SessionError> {
    let mut started = false;

    while let Some(sample) = samples.recv().await {
        let now_ms = sample.timestamp_ms;
        if !started {
            session.start(now_ms)?;
            started = true;
        }

        session.ingest(sample)?;
        if !session.state().is_terminal() {
            session.tick(now_ms)?;
        }

        if let Some(sink) = &events {
            for event in session.drain_events() {
                // A dropped subscriber must not stall the session
                let _ = sink.send(event);
            }
        }

        if session.state().has_verdict() {
            debug!(session_id = %session.id(), state = ?session.state(), "Driver finished");
            return session.finalize();
        }
    }

    // Frame source went away mid-session
    if !session.state().is_terminal() {
        if started {
            session.cancel()?;
        }
        return Err(SessionError::SourceClosed);
    }
    Err(SessionError::SourceClosed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SessionConfig;
    use face_geometry::{Point3, LANDMARK_COUNT, LEFT_EYE_CONTOUR, LOWER_LIP, NOSE_TIP, RIGHT_EYE_CONTOUR, UPPER_LIP};

    fn face_frame(timestamp_ms: u64, ear: f32, nose_x: f32, mouth_gap: f32) -> LandmarkSample {
        let mut points = vec![Point3::default(); LANDMARK_COUNT];
        for contour in [LEFT_EYE_CONTOUR, RIGHT_EYE_CONTOUR] {
            let v = ear * 0.1;
            points[contour[0]] = Point3 { x: 0.40, y: 0.50, z: 0.0 };
            points[contour[3]] = Point3 { x: 0.50, y: 0.50, z: 0.0 };
            points[contour[1]] = Point3 { x: 0.43, y: 0.50 - v / 2.0, z: 0.0 };
            points[contour[5]] = Point3 { x: 0.43, y: 0.50 + v / 2.0, z: 0.0 };
            points[contour[2]] = Point3 { x: 0.47, y: 0.50 - v / 2.0, z: 0.0 };
            points[contour[4]] = Point3 { x: 0.47, y: 0.50 + v / 2.0, z: 0.0 };
        }
        points[NOSE_TIP] = Point3 { x: nose_x, y: 0.55, z: 0.0 };
        points[UPPER_LIP] = Point3 { x: 0.50, y: 0.65, z: 0.0 };
        points[LOWER_LIP] = Point3 { x: 0.50, y: 0.65 + mouth_gap, z: 0.0 };
        LandmarkSample { points, timestamp_ms, face_found: true }
    }

    #[tokio::test]
    async fn test_driver_closed_source_cancels() {
        let (tx, rx) = mpsc::channel(8);
        tx.send(face_frame(0, 0.3, 0.5, 0.0)).await.unwrap();
        drop(tx);

        let session = LivenessSession::new(SessionConfig::default());
        let err = run(session, rx, None).await.unwrap_err();
        assert!(matches!(err, SessionError::SourceClosed));
    }

    #[tokio::test]
    async fn test_driver_returns_verdict_at_deadline() {
        let (tx, rx) = mpsc::channel(64);
        tokio::spawn(async move {
            for i in 0..=40u64 {
                // Static, never-blinking face for the whole window
                let _ = tx.send(face_frame(i * 200, 0.3, 0.5, 0.0)).await;
            }
        });

        let session = LivenessSession::new(SessionConfig::default());
        let result = run(session, rx, None).await.unwrap();
        assert!(!result.is_live);
        assert!(result.face_detection_rate > 0.99);
    }
}
