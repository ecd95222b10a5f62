//! Blink detection via EAR hysteresis

use serde::{Deserialize, Serialize};

/// Blink detection thresholds and timing.
///
/// The gap between `closed_threshold` and `open_threshold` is a dead zone:
/// an EAR value oscillating inside it changes nothing, which keeps landmark
/// jitter at the boundary from double-counting a single blink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlinkConfig {
    /// Average EAR below this registers a closure
    pub closed_threshold: f32,
    /// Average EAR at or above this re-arms the tracker
    pub open_threshold: f32,
    /// Minimum time between two countable blinks (milliseconds)
    pub cooldown_ms: u64,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            closed_threshold: 0.20,
            open_threshold: 0.25,
            cooldown_ms: 500,
        }
    }
}

/// Emitted when a blink is registered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BlinkEvent {
    /// Running blink count including this one
    pub count: u32,
    /// Timestamp the closure was registered at
    pub at_ms: u64,
    /// Average EAR that triggered the closure
    pub avg_ear: f32,
}

/// Tracks eye closures across a session.
///
/// A blink counts on the closed transition, not on re-opening: a subject who
/// closes their eyes and keeps them closed through the end of the window
/// still gets credit for the closure. `count` never decreases.
#[derive(Debug, Clone)]
pub struct BlinkTracker {
    config: BlinkConfig,
    in_progress: bool,
    count: u32,
    last_blink_ms: Option<u64>,
}

impl BlinkTracker {
    pub fn new(config: BlinkConfig) -> Self {
        Self {
            config,
            in_progress: false,
            count: 0,
            last_blink_ms: None,
        }
    }

    /// Feed one frame's eye aspect ratios. Returns a [`BlinkEvent`] when a
    /// new blink is registered.
    pub fn update(&mut self, ear_left: f32, ear_right: f32, now_ms: u64) -> Option<BlinkEvent> {
        let avg_ear = (ear_left + ear_right) / 2.0;

        if avg_ear < self.config.closed_threshold {
            if !self.in_progress && self.cooldown_elapsed(now_ms) {
                self.count += 1;
                self.in_progress = true;
                self.last_blink_ms = Some(now_ms);
                return Some(BlinkEvent {
                    count: self.count,
                    at_ms: now_ms,
                    avg_ear,
                });
            }
        } else if avg_ear >= self.config.open_threshold {
            self.in_progress = false;
        }

        None
    }

    /// Blinks registered so far this session.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Whether the eyes are currently held below the closed threshold.
    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    /// Reset for a new session.
    pub fn reset(&mut self) {
        self.in_progress = false;
        self.count = 0;
        self.last_blink_ms = None;
    }

    fn cooldown_elapsed(&self, now_ms: u64) -> bool {
        match self.last_blink_ms {
            Some(last) => now_ms.saturating_sub(last) >= self.config.cooldown_ms,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tracker() -> BlinkTracker {
        BlinkTracker::new(BlinkConfig::default())
    }

    #[test]
    fn test_single_dip_single_blink() {
        let mut t = tracker();
        assert!(t.update(0.30, 0.30, 0).is_none());
        let event = t.update(0.15, 0.15, 100).expect("dip should register");
        assert_eq!(event.count, 1);
        assert!(t.update(0.30, 0.30, 200).is_none());
        assert_eq!(t.count(), 1);
    }

    #[test]
    fn test_sustained_closure_counts_once() {
        let mut t = tracker();
        t.update(0.30, 0.30, 0);
        assert!(t.update(0.15, 0.15, 100).is_some());
        assert!(t.update(0.15, 0.15, 200).is_none());
        t.update(0.30, 0.30, 300);
        assert_eq!(t.count(), 1);
    }

    #[test]
    fn test_two_dips_beyond_cooldown() {
        let mut t = tracker();
        assert!(t.update(0.15, 0.15, 0).is_some());
        t.update(0.30, 0.30, 200);
        // 700ms after the first blink, past the 500ms cooldown
        assert!(t.update(0.15, 0.15, 700).is_some());
        assert_eq!(t.count(), 2);
    }

    #[test]
    fn test_reopen_within_cooldown_not_double_counted() {
        let mut t = tracker();
        assert!(t.update(0.15, 0.15, 0).is_some());
        t.update(0.30, 0.30, 150);
        // Re-armed by the open frame but still inside the cooldown window
        assert!(t.update(0.15, 0.15, 300).is_none());
        assert_eq!(t.count(), 1);
    }

    #[test]
    fn test_dead_zone_does_not_rearm() {
        let mut t = tracker();
        assert!(t.update(0.15, 0.15, 0).is_some());
        // 0.22 sits between the thresholds: neither a closure nor a re-arm
        assert!(t.update(0.22, 0.22, 600).is_none());
        assert!(t.in_progress());
        // Still in progress, so a fresh dip cannot count
        assert!(t.update(0.15, 0.15, 1200).is_none());
        assert_eq!(t.count(), 1);
    }

    #[test]
    fn test_averages_both_eyes() {
        let mut t = tracker();
        // One eye closed, one wide open: average 0.225 is above the closed threshold
        assert!(t.update(0.10, 0.35, 0).is_none());
        assert_eq!(t.count(), 0);
    }

    #[test]
    fn test_stuck_closed_keeps_confirmed_count() {
        let mut t = tracker();
        t.update(0.15, 0.15, 0);
        t.update(0.15, 0.15, 1000);
        t.update(0.15, 0.15, 2000);
        // Never re-opened: the first confirmed blink stands, nothing more
        assert!(t.in_progress());
        assert_eq!(t.count(), 1);
    }

    #[test]
    fn test_reset() {
        let mut t = tracker();
        t.update(0.15, 0.15, 0);
        t.reset();
        assert_eq!(t.count(), 0);
        assert!(!t.in_progress());
        assert!(t.update(0.15, 0.15, 10).is_some());
    }

    proptest! {
        /// Count never decreases and grows by at most one per update.
        #[test]
        fn prop_count_monotone(ears in proptest::collection::vec((0.0f32..0.5, 0.0f32..0.5), 1..60)) {
            let mut t = tracker();
            let mut prev = 0u32;
            for (i, (l, r)) in ears.into_iter().enumerate() {
                t.update(l, r, i as u64 * 200);
                let count = t.count();
                prop_assert!(count >= prev);
                prop_assert!(count - prev <= 1);
                prev = count;
            }
        }

        /// At most one blink per cooldown window regardless of input.
        #[test]
        fn prop_cooldown_rate_limit(ears in proptest::collection::vec(0.0f32..0.5, 2..40)) {
            let mut t = tracker();
            // 100ms cadence: any 5 consecutive frames span less than the 500ms cooldown
            for (i, e) in ears.iter().enumerate() {
                t.update(*e, *e, i as u64 * 100);
            }
            let max_possible = 1 + (ears.len() as u64 * 100) / 500;
            prop_assert!(u64::from(t.count()) <= max_possible);
        }
    }
}
