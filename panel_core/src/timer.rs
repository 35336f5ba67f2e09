//! Single-threaded timer primitives.
//!
//! All scheduled behavior in the panel (the pump's 1-second elapsed
//! tick, the screening gate's block redirect, the medication success
//! indicator) runs cooperatively: the hosting shell calls `poll` on the
//! owning component with the current [`Instant`], and the component
//! consults its timer. No background threads are involved, which keeps
//! every firing deterministic under test.

use std::time::{Duration, Instant};

/// A one-shot timer with an explicit handle.
///
/// `start` replaces any pending deadline (restart, never stack), and
/// `fire_if_due` fires at most once per start.
#[derive(Clone, Copy, Debug, Default)]
pub struct OneShot {
    deadline: Option<Instant>,
}

impl OneShot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the timer to fire `delay` after `now`.
    pub fn start(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    /// Disarm without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is armed and has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fire and disarm if the deadline has been reached.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// A repeating timer with a fixed period.
///
/// `ticks_due` catches up on every whole period that elapsed since the
/// last call, so a slow poll loop never loses ticks.
#[derive(Clone, Copy, Debug)]
pub struct Ticker {
    period: Duration,
    next: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self { period, next: None }
    }

    /// Arm the timer; the first tick is due one period after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next = Some(now + self.period);
    }

    /// Disarm; any partially elapsed period is discarded.
    pub fn cancel(&mut self) {
        self.next = None;
    }

    pub fn is_running(&self) -> bool {
        self.next.is_some()
    }

    /// Number of whole periods that have elapsed since the last call.
    pub fn ticks_due(&mut self, now: Instant) -> u32 {
        let Some(mut next) = self.next else {
            return 0;
        };

        let mut fired = 0;
        while now >= next {
            fired += 1;
            next += self.period;
        }
        self.next = Some(next);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: Duration = Duration::from_secs(1);

    #[test]
    fn test_one_shot_fires_once_at_deadline() {
        let t0 = Instant::now();
        let mut timer = OneShot::new();
        timer.start(t0, Duration::from_secs(5));

        assert!(!timer.fire_if_due(t0 + Duration::from_millis(4999)));
        assert!(timer.is_pending());
        assert!(timer.fire_if_due(t0 + Duration::from_secs(5)));
        assert!(!timer.is_pending());

        // Already fired; later polls stay quiet.
        assert!(!timer.fire_if_due(t0 + Duration::from_secs(10)));
    }

    #[test]
    fn test_one_shot_restart_replaces_deadline() {
        let t0 = Instant::now();
        let mut timer = OneShot::new();
        timer.start(t0, Duration::from_secs(3));
        timer.start(t0 + Duration::from_secs(2), Duration::from_secs(3));

        // Original deadline (t0+3s) must not fire.
        assert!(!timer.fire_if_due(t0 + Duration::from_secs(4)));
        assert!(timer.fire_if_due(t0 + Duration::from_secs(5)));
    }

    #[test]
    fn test_one_shot_cancel() {
        let t0 = Instant::now();
        let mut timer = OneShot::new();
        timer.start(t0, SEC);
        timer.cancel();

        assert!(!timer.is_pending());
        assert!(!timer.fire_if_due(t0 + Duration::from_secs(2)));
    }

    #[test]
    fn test_ticker_counts_whole_periods() {
        let t0 = Instant::now();
        let mut tick = Ticker::new(SEC);
        tick.start(t0);

        assert_eq!(tick.ticks_due(t0 + Duration::from_millis(999)), 0);
        assert_eq!(tick.ticks_due(t0 + SEC), 1);
        assert_eq!(tick.ticks_due(t0 + Duration::from_millis(1500)), 0);
        // Catch-up after a slow poll.
        assert_eq!(tick.ticks_due(t0 + Duration::from_millis(4500)), 3);
    }

    #[test]
    fn test_ticker_cancel_stops_ticks() {
        let t0 = Instant::now();
        let mut tick = Ticker::new(SEC);
        tick.start(t0);
        tick.cancel();

        assert!(!tick.is_running());
        assert_eq!(tick.ticks_due(t0 + Duration::from_secs(10)), 0);
    }
}
