//! One-shot auto-advance schedule.
//!
//! The deadline is recomputed from scratch on every index change instead of
//! ticking on a fixed period, so a manual navigation always buys a full
//! interval before the next automatic advance.

use std::time::Duration;

use tokio::time::Instant;

/// Auto-advance settings plus the currently armed deadline, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoAdvance {
    enabled: bool,
    interval: Duration,
    deadline: Option<Instant>,
}

impl AutoAdvance {
    /// A zero interval disables auto-advance.
    pub fn new(enabled: bool, interval: Duration) -> Self {
        Self {
            enabled: enabled && !interval.is_zero(),
            interval,
            deadline: None,
        }
    }

    /// Auto-advance switched off.
    pub fn disabled() -> Self {
        Self::new(false, super::DEFAULT_AUTO_SLIDE_INTERVAL)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// When the next automatic advance is due; `None` when nothing is armed.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Restart the countdown from `now`.
    ///
    /// Arms only while enabled and `can_advance` holds; otherwise any
    /// pending deadline is dropped.
    pub fn rearm(&mut self, now: Instant, can_advance: bool) {
        self.deadline = (self.enabled && can_advance).then(|| now + self.interval);
    }

    /// Revoke the pending deadline without changing the settings.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Turn auto-advance on or off. Enabling arms a fresh full interval.
    pub fn set_enabled(&mut self, enabled: bool, now: Instant, can_advance: bool) {
        self.enabled = enabled && !self.interval.is_zero();
        self.rearm(now, can_advance);
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }
}

impl Default for AutoAdvance {
    fn default() -> Self {
        Self::new(true, super::DEFAULT_AUTO_SLIDE_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn not_armed_until_rearmed() {
        let auto = AutoAdvance::default();
        assert!(auto.is_enabled());
        assert_eq!(auto.deadline(), None);
    }

    #[test]
    fn rearm_sets_full_interval_from_now() {
        let start = Instant::now();
        let mut auto = AutoAdvance::default();
        auto.rearm(start, true);
        assert_eq!(auto.deadline(), Some(start + ms(3000)));
        assert!(!auto.is_due(start + ms(2999)));
        assert!(auto.is_due(start + ms(3000)));
    }

    #[test]
    fn manual_change_at_2000_pushes_deadline_to_5000() {
        let start = Instant::now();
        let mut auto = AutoAdvance::default();
        auto.rearm(start, true);

        // Manual navigation at t=2000.
        auto.rearm(start + ms(2000), true);

        assert!(!auto.is_due(start + ms(3000)));
        assert_eq!(auto.deadline(), Some(start + ms(5000)));
    }

    #[test]
    fn rearm_without_slides_disarms() {
        let start = Instant::now();
        let mut auto = AutoAdvance::default();
        auto.rearm(start, true);
        auto.rearm(start, false);
        assert_eq!(auto.deadline(), None);
    }

    #[test]
    fn disabling_revokes_pending_deadline() {
        let start = Instant::now();
        let mut auto = AutoAdvance::default();
        auto.rearm(start, true);
        auto.set_enabled(false, start + ms(10), true);
        assert!(!auto.is_enabled());
        assert_eq!(auto.deadline(), None);
        assert!(!auto.is_due(start + ms(10_000)));
    }

    #[test]
    fn zero_interval_never_arms() {
        let mut auto = AutoAdvance::new(true, Duration::ZERO);
        auto.rearm(Instant::now(), true);
        assert!(!auto.is_enabled());
        assert_eq!(auto.deadline(), None);
    }

    #[test]
    fn cancel_keeps_settings() {
        let mut auto = AutoAdvance::default();
        auto.rearm(Instant::now(), true);
        auto.cancel();
        assert!(auto.is_enabled());
        assert_eq!(auto.deadline(), None);
    }
}
