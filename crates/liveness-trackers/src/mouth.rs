//! Mouth activity detection

use serde::{Deserialize, Serialize};

/// Mouth activity thresholds and timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MouthActivityConfig {
    /// Minimum lip gap (normalized units) that counts as an open mouth
    pub opening_threshold: f32,
    /// Minimum time between two countable activities (milliseconds)
    pub cooldown_ms: u64,
}

impl Default for MouthActivityConfig {
    fn default() -> Self {
        Self {
            opening_threshold: 0.04,
            cooldown_ms: 800,
        }
    }
}

/// Counts mouth-open events across a session.
///
/// The cooldown keeps one sustained open mouth from being counted once per
/// sampling tick: a run of over-threshold frames collapses into one event
/// per cooldown window.
#[derive(Debug, Clone)]
pub struct MouthActivityTracker {
    config: MouthActivityConfig,
    count: u32,
    last_activity_ms: Option<u64>,
}

impl MouthActivityTracker {
    pub fn new(config: MouthActivityConfig) -> Self {
        Self {
            config,
            count: 0,
            last_activity_ms: None,
        }
    }

    /// Feed one frame's mouth opening distance. Returns true when a new
    /// activity was counted.
    pub fn update(&mut self, mouth_gap: f32, now_ms: u64) -> bool {
        if mouth_gap > self.config.opening_threshold && self.cooldown_elapsed(now_ms) {
            self.count += 1;
            self.last_activity_ms = Some(now_ms);
            return true;
        }
        false
    }

    /// Activities counted so far this session.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Reset for a new session.
    pub fn reset(&mut self) {
        self.count = 0;
        self.last_activity_ms = None;
    }

    fn cooldown_elapsed(&self, now_ms: u64) -> bool {
        match self.last_activity_ms {
            Some(last) => now_ms.saturating_sub(last) >= self.config.cooldown_ms,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> MouthActivityTracker {
        MouthActivityTracker::new(MouthActivityConfig::default())
    }

    #[test]
    fn test_opening_counts() {
        let mut t = tracker();
        assert!(t.update(0.06, 0));
        assert_eq!(t.count(), 1);
    }

    #[test]
    fn test_closed_mouth_ignored() {
        let mut t = tracker();
        assert!(!t.update(0.01, 0));
        assert!(!t.update(0.04, 200)); // At the threshold, not above
        assert_eq!(t.count(), 0);
    }

    #[test]
    fn test_sustained_open_collapses_to_cooldown_rate() {
        let mut t = tracker();
        // Mouth held open across 5 frames at 200ms cadence
        assert!(t.update(0.06, 0));
        assert!(!t.update(0.06, 200));
        assert!(!t.update(0.06, 400));
        assert!(!t.update(0.06, 600));
        assert!(t.update(0.06, 800)); // Cooldown elapsed
        assert_eq!(t.count(), 2);
    }

    #[test]
    fn test_two_distinct_openings() {
        let mut t = tracker();
        assert!(t.update(0.06, 0));
        assert!(!t.update(0.01, 400));
        assert!(t.update(0.07, 1000));
        assert_eq!(t.count(), 2);
    }

    #[test]
    fn test_reset() {
        let mut t = tracker();
        t.update(0.06, 0);
        t.reset();
        assert_eq!(t.count(), 0);
        assert!(t.update(0.06, 100));
    }
}
