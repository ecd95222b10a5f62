//! Liveness Signal Trackers
//!
//! Four independent per-frame signal trackers, each holding a small rolling
//! state and consuming one derived measurement per sampling tick:
//! - Blink detection (EAR hysteresis + cooldown)
//! - Head movement (frame-to-frame nose delta, one-way latch)
//! - Mouth activity (opening threshold + cooldown counter)
//! - Face presence (detection-rate and consecutive-miss bookkeeping)
//!
//! Trackers never see raw landmarks; the session derives the scalar signals
//! and feeds each tracker in capture order. All timing arithmetic uses the
//! caller's monotonic millisecond clock and saturates rather than panics if
//! a caller violates the non-decreasing timestamp precondition.

pub mod blink;
pub mod head;
pub mod mouth;
pub mod presence;

pub use blink::{BlinkConfig, BlinkEvent, BlinkTracker};
pub use head::{HeadMovementConfig, HeadMovementTracker};
pub use mouth::{MouthActivityConfig, MouthActivityTracker};
pub use presence::FacePresenceTracker;
