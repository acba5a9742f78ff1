use std::time::{Duration, Instant};

/// A wall-clock gate for something that should happen at most once per
/// period.
///
/// A timer that has never fired is always due.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Timer {
    period: Duration,
    last: Option<Instant>,
}

impl Timer {
    pub(crate) fn new(period: Duration) -> Timer {
        Timer { period, last: None }
    }

    pub(crate) fn period(&self) -> Duration {
        self.period
    }

    pub(crate) fn set_period(&mut self, period: Duration) {
        self.period = period;
    }

    /// Has strictly more than one period passed since the timer last fired?
    pub(crate) fn is_due(&self, now: Instant) -> bool {
        self.last
            .is_none_or(|last| now.saturating_duration_since(last) > self.period)
    }

    /// Record that the timer fired at `now`
    pub(crate) fn reset(&mut self, now: Instant) {
        self.last = Some(now);
    }

    /// If the timer is due, reset it and return `true`
    pub(crate) fn fire(&mut self, now: Instant) -> bool {
        if self.is_due(now) {
            self.reset(now);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_timer_is_due() {
        let timer = Timer::new(Duration::from_millis(100));
        assert!(timer.is_due(Instant::now()));
    }

    #[test]
    fn due_only_after_period_strictly_passes() {
        let t0 = Instant::now();
        let mut timer = Timer::new(Duration::from_millis(100));
        assert!(timer.fire(t0));
        assert!(!timer.fire(t0 + Duration::from_millis(50)));
        assert!(!timer.fire(t0 + Duration::from_millis(100)));
        assert!(timer.fire(t0 + Duration::from_millis(101)));
        assert!(!timer.is_due(t0 + Duration::from_millis(150)));
    }

    #[test]
    fn earlier_instant_is_not_due() {
        let t0 = Instant::now();
        let mut timer = Timer::new(Duration::from_millis(10));
        timer.reset(t0 + Duration::from_secs(1));
        assert!(!timer.is_due(t0));
    }

    #[test]
    fn new_period_applies_to_next_check() {
        let t0 = Instant::now();
        let mut timer = Timer::new(Duration::from_millis(100));
        timer.reset(t0);
        timer.set_period(Duration::from_millis(50));
        assert_eq!(timer.period(), Duration::from_millis(50));
        assert!(timer.is_due(t0 + Duration::from_millis(60)));
    }
}
