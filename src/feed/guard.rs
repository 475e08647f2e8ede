use std::time::{Duration, Instant};
use tracing::debug;

/// Single in-flight flag for feed extension, released by a cooldown.
///
/// Triggers that arrive while the window is open are dropped, not queued.
/// Only elapsed time is compared against the cooldown, so any configured
/// duration is safe, `Duration::MAX` included.
#[derive(Debug, Clone)]
pub struct ExtensionGuard {
    cooldown: Duration,
    started_at: Option<Instant>,
}

impl ExtensionGuard {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            started_at: None,
        }
    }

    /// Claim the slot at `now`. False means an extension is still "in flight".
    pub fn try_begin(&mut self, now: Instant) -> bool {
        if self.is_busy(now) {
            debug!("Extension trigger dropped, guard busy");
            return false;
        }
        self.started_at = Some(now);
        true
    }

    pub fn is_busy(&self, now: Instant) -> bool {
        self.started_at
            .is_some_and(|started| now.saturating_duration_since(started) < self.cooldown)
    }

    /// Forget any pending window, e.g. after the feed was reset
    pub fn release(&mut self) {
        self.started_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_triggers_inside_window() {
        let mut guard = ExtensionGuard::new(Duration::from_millis(500));
        let start = Instant::now();

        assert!(guard.try_begin(start));
        assert!(!guard.try_begin(start + Duration::from_millis(10)));
        assert!(!guard.try_begin(start + Duration::from_millis(499)));
        assert!(guard.try_begin(start + Duration::from_millis(500)));
    }

    #[test]
    fn test_dropped_trigger_does_not_extend_window() {
        let mut guard = ExtensionGuard::new(Duration::from_millis(500));
        let start = Instant::now();

        guard.try_begin(start);
        guard.try_begin(start + Duration::from_millis(400));
        assert!(!guard.is_busy(start + Duration::from_millis(501)));
    }

    #[test]
    fn test_release_opens_immediately() {
        let mut guard = ExtensionGuard::new(Duration::from_secs(5));
        let start = Instant::now();
        guard.try_begin(start);
        guard.release();
        assert!(guard.try_begin(start));
    }

    #[test]
    fn test_huge_cooldown_blocks_without_overflow() {
        let mut guard = ExtensionGuard::new(Duration::MAX);
        let start = Instant::now();
        assert!(guard.try_begin(start));
        assert!(!guard.try_begin(start + Duration::from_secs(3600)));
        guard.release();
        assert!(guard.try_begin(start));
    }

    #[test]
    fn test_zero_cooldown_never_blocks() {
        let mut guard = ExtensionGuard::new(Duration::ZERO);
        let start = Instant::now();
        assert!(guard.try_begin(start));
        assert!(guard.try_begin(start));
    }
}
