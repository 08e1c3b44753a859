use std::time::{Duration, Instant};

/// Fixed-interval tick source for the orbit animation.
///
/// The event loop asks for [`deadline`](TickTimer::deadline) to schedule its
/// next wake-up and calls [`poll`](TickTimer::poll) when it fires. Pausing is
/// not the timer's job (that lives in the animation state); the timer only
/// measures time.
///
/// Catch-up is clamped so a long stall (debugger, minimized window) cannot
/// flood the animation with thousands of ticks when it resumes; ticks past
/// the clamp are dropped, not deferred.
#[derive(Debug, Clone)]
pub struct TickTimer {
    interval: Duration,
    deadline: Instant,
    max_catch_up: u32,
}

impl TickTimer {
    /// Creates a timer whose first deadline is one interval from now.
    pub fn new(interval: Duration) -> Self {
        debug_assert!(!interval.is_zero(), "tick interval must be non-zero");
        Self {
            interval,
            deadline: Instant::now() + interval,
            max_catch_up: 5,
        }
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The next instant at which a tick becomes due.
    #[inline]
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Restarts the cadence from now.
    ///
    /// Call when the animation resumes from Paused so the first tick does not
    /// fire immediately with a stale deadline.
    pub fn reset(&mut self) {
        self.deadline = Instant::now() + self.interval;
    }

    /// Returns how many ticks are due at `now` and advances the deadline.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let mut fired = 0;
        while now >= self.deadline && fired < self.max_catch_up {
            self.deadline += self.interval;
            fired += 1;
        }
        if now >= self.deadline {
            // Still behind after the clamp: drop the backlog.
            self.deadline = now + self.interval;
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(20);

    #[test]
    fn nothing_due_before_the_deadline() {
        let mut timer = TickTimer::new(INTERVAL);
        let before = timer.deadline() - Duration::from_millis(1);
        assert_eq!(timer.poll(before), 0);
    }

    #[test]
    fn one_tick_per_elapsed_interval() {
        let mut timer = TickTimer::new(INTERVAL);
        let due = timer.deadline();
        assert_eq!(timer.poll(due), 1);
        assert_eq!(timer.poll(due), 0);
        assert_eq!(timer.poll(due + INTERVAL), 1);
    }

    #[test]
    fn catch_up_covers_short_stalls() {
        let mut timer = TickTimer::new(INTERVAL);
        let late = timer.deadline() + 2 * INTERVAL;
        assert_eq!(timer.poll(late), 3);
    }

    #[test]
    fn catch_up_is_clamped_after_long_stalls() {
        let mut timer = TickTimer::new(INTERVAL);
        let very_late = timer.deadline() + 1000 * INTERVAL;
        assert_eq!(timer.poll(very_late), 5);
        // Backlog dropped: the next deadline is in the future again.
        assert!(timer.deadline() > very_late);
    }

    #[test]
    fn reset_pushes_the_deadline_forward() {
        let mut timer = TickTimer::new(INTERVAL);
        let old_deadline = timer.deadline();
        timer.reset();
        // The stale deadline no longer fires a tick after a reset.
        assert!(timer.deadline() >= old_deadline);
        let just_before = timer.deadline() - Duration::from_millis(1);
        assert_eq!(timer.poll(just_before), 0);
    }
}
