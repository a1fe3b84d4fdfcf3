use std::time::{Duration, Instant};

/// Fixed-period trigger polled from the game loop.
///
/// The ticker fires at most once per poll; a late poll does not queue up
/// missed periods, the next period simply starts from the firing instant.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    last_fire: Instant,
}

impl Ticker {
    /// Starts a ticker whose first period begins now.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self::starting_at(interval, Instant::now())
    }

    /// Starts a ticker whose first period begins at `start`.
    #[must_use]
    pub fn starting_at(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            last_fire: start,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Changes the period. The next deadline is measured from the last fire.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Returns true, and restarts the period, when a full period has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_fire) < self.interval {
            return false;
        }
        self.last_fire = now;
        true
    }

    /// Returns how long until the ticker is next due.
    #[must_use]
    pub fn time_until_next(&self, now: Instant) -> Duration {
        self.interval
            .saturating_sub(now.saturating_duration_since(self.last_fire))
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::Ticker;

    const PERIOD: Duration = Duration::from_millis(200);

    #[test]
    fn fires_once_per_elapsed_period() {
        let start = Instant::now();
        let mut ticker = Ticker::starting_at(PERIOD, start);

        assert!(!ticker.poll(start + Duration::from_millis(199)));
        assert!(ticker.poll(start + PERIOD));
        assert!(!ticker.poll(start + PERIOD));
        assert!(ticker.poll(start + PERIOD * 2));
    }

    #[test]
    fn late_poll_does_not_fire_twice() {
        let start = Instant::now();
        let mut ticker = Ticker::starting_at(PERIOD, start);

        assert!(ticker.poll(start + PERIOD * 5));
        assert!(!ticker.poll(start + PERIOD * 5 + Duration::from_millis(1)));
    }

    #[test]
    fn time_until_next_counts_down_to_zero() {
        let start = Instant::now();
        let ticker = Ticker::starting_at(PERIOD, start);

        assert_eq!(ticker.time_until_next(start), PERIOD);
        assert_eq!(
            ticker.time_until_next(start + Duration::from_millis(150)),
            Duration::from_millis(50)
        );
        assert_eq!(ticker.time_until_next(start + PERIOD * 3), Duration::ZERO);
    }

    #[test]
    fn reconfigured_interval_applies_to_the_current_period() {
        let start = Instant::now();
        let mut ticker = Ticker::starting_at(PERIOD, start);

        ticker.set_interval(Duration::from_millis(50));

        assert_eq!(ticker.interval(), Duration::from_millis(50));
        assert!(ticker.poll(start + Duration::from_millis(50)));
    }
}
