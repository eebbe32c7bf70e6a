use std::time::Duration;

/// Admits at most one call per `window`.
///
/// Leading-edge: the first call after a quiet period runs immediately. Calls
/// refused inside the window are remembered as a single pending trailing run,
/// which [`RateLimiter::take_trailing`] hands out once the window has elapsed.
/// This keeps the last scrub position from being dropped.
///
/// The limiter never reads a clock itself; callers pass `now` from a
/// [`crate::TimeSource`], so tests can drive it deterministically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimiter {
    window: Duration,
    last_run: Option<Duration>,
    pending: bool,
}

impl RateLimiter {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_run: None,
            pending: false,
        }
    }

    /// Returns `true` if the caller may run now.
    pub fn try_acquire(&mut self, now: Duration) -> bool {
        if self.is_open(now) {
            self.last_run = Some(now);
            self.pending = false;
            return true;
        }
        tracing::trace!(?now, "rate limiter suppressed call");
        self.pending = true;
        false
    }

    /// Returns `true` once per suppressed burst, after the window has elapsed.
    pub fn take_trailing(&mut self, now: Duration) -> bool {
        if !self.pending || !self.is_open(now) {
            return false;
        }
        self.pending = false;
        self.last_run = Some(now);
        true
    }

    pub fn has_pending(&self) -> bool {
        self.pending
    }

    pub fn reset(&mut self) {
        self.last_run = None;
        self.pending = false;
    }

    fn is_open(&self, now: Duration) -> bool {
        match self.last_run {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.window,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RateLimiter;
    use std::time::Duration;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn admits_once_per_window() {
        let mut r = RateLimiter::new(ms(200));
        assert!(r.try_acquire(ms(0)));
        assert!(!r.try_acquire(ms(50)));
        assert!(!r.try_acquire(ms(199)));
        assert!(r.try_acquire(ms(200)));
        assert!(!r.try_acquire(ms(300)));
        assert!(r.try_acquire(ms(450)));
    }

    #[test]
    fn trailing_run_fires_once_after_window() {
        let mut r = RateLimiter::new(ms(200));
        assert!(r.try_acquire(ms(0)));
        assert!(!r.try_acquire(ms(20)));
        assert!(!r.try_acquire(ms(40)));
        assert!(r.has_pending());

        assert!(!r.take_trailing(ms(100)));
        assert!(r.take_trailing(ms(210)));
        assert!(!r.take_trailing(ms(500)));
        assert!(!r.has_pending());
    }

    #[test]
    fn leading_call_clears_pending() {
        let mut r = RateLimiter::new(ms(100));
        assert!(r.try_acquire(ms(0)));
        assert!(!r.try_acquire(ms(10)));
        assert!(r.try_acquire(ms(150)));
        assert!(!r.take_trailing(ms(400)));
    }

    #[test]
    fn reset_reopens_immediately() {
        let mut r = RateLimiter::new(ms(100));
        assert!(r.try_acquire(ms(0)));
        r.reset();
        assert!(r.try_acquire(ms(1)));
    }
}
