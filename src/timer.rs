use std::time::{Duration, Instant};

/// A re-armable one-shot deadline, polled by the event loop.
#[derive(Debug, Default, Clone)]
pub struct Timer {
    armed: bool,
    due: Option<Instant>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the timer to fire `delay` after `from`.
    /// A deadline past the end of representable time never fires.
    pub fn schedule(&mut self, from: Instant, delay: Duration) {
        self.armed = true;
        self.due = from.checked_add(delay);
    }

    pub fn cancel(&mut self) {
        self.armed = false;
        self.due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn is_due(&self, now: Instant) -> bool {
        matches!(self.due, Some(due) if self.armed && now >= due)
    }

    /// Time left before the deadline, `None` when disarmed or unreachable
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        if !self.armed {
            return None;
        }
        self.due.map(|due| due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::Timer;
    use std::time::{Duration, Instant};

    #[test]
    fn fires_once_deadline_passes() {
        let start = Instant::now();
        let mut timer = Timer::new();
        assert!(!timer.is_due(start));

        timer.schedule(start, Duration::from_millis(500));
        assert!(timer.is_armed());
        assert!(!timer.is_due(start));
        assert_eq!(timer.remaining(start), Some(Duration::from_millis(500)));
        assert!(timer.is_due(start + Duration::from_millis(500)));
        assert_eq!(timer.remaining(start + Duration::from_secs(2)), Some(Duration::ZERO));
    }

    #[test]
    fn cancel_disarms() {
        let start = Instant::now();
        let mut timer = Timer::new();
        timer.schedule(start, Duration::ZERO);
        assert!(timer.is_due(start));
        timer.cancel();
        assert!(!timer.is_due(start + Duration::from_secs(1)));
        assert_eq!(timer.remaining(start), None);
    }

    #[test]
    fn overflowing_deadline_never_fires() {
        let start = Instant::now();
        let mut timer = Timer::new();
        timer.schedule(start, Duration::MAX);
        assert!(timer.is_armed());
        assert!(!timer.is_due(start + Duration::from_secs(3600)));
        assert_eq!(timer.remaining(start), None);
    }
}
