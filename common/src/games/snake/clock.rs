use std::time::{Duration, Instant};

use super::settings::{MAX_SPEED, MIN_SPEED};

/// Fixed-rate pacing for the game loop, `rate` ticks per second.
pub struct TickClock {
    last_tick: Option<Instant>,
}

pub fn interval(rate: u32) -> Duration {
    Duration::from_secs(1) / rate.clamp(MIN_SPEED, MAX_SPEED)
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickClock {
    pub fn new() -> Self {
        Self { last_tick: None }
    }

    pub fn time_until_next(&self, rate: u32) -> Duration {
        self.time_until_next_at(rate, Instant::now())
    }

    fn time_until_next_at(&self, rate: u32, now: Instant) -> Duration {
        match self.last_tick {
            None => Duration::ZERO,
            Some(last) => (last + interval(rate)).saturating_duration_since(now),
        }
    }

    /// Non-blocking: `true` when a tick boundary has been reached, which also
    /// starts the next interval. The first call always ticks.
    pub fn poll(&mut self, rate: u32) -> bool {
        self.poll_at(rate, Instant::now())
    }

    fn poll_at(&mut self, rate: u32, now: Instant) -> bool {
        if self.time_until_next_at(rate, now).is_zero() {
            self.last_tick = Some(now);
            return true;
        }
        false
    }

    /// Blocks until the next tick boundary. A late caller is not compensated
    /// with extra ticks.
    pub fn wait(&mut self, rate: u32) {
        let remaining = self.time_until_next(rate);
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        self.last_tick = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_is_clamped() {
        assert_eq!(interval(4), Duration::from_millis(250));
        assert_eq!(interval(0), Duration::from_secs(1));
        assert_eq!(interval(100), Duration::from_millis(50));
    }

    #[test]
    fn test_first_poll_ticks_immediately() {
        let mut clock = TickClock::new();
        assert!(clock.poll(4));
    }

    #[test]
    fn test_poll_waits_for_the_interval() {
        let mut clock = TickClock::new();
        let start = Instant::now();
        assert!(clock.poll_at(4, start));
        assert!(!clock.poll_at(4, start + Duration::from_millis(100)));
        assert_eq!(
            clock.time_until_next_at(4, start + Duration::from_millis(100)),
            Duration::from_millis(150)
        );
        assert!(clock.poll_at(4, start + Duration::from_millis(250)));
    }

    #[test]
    fn test_late_poll_does_not_burst() {
        let mut clock = TickClock::new();
        let start = Instant::now();
        assert!(clock.poll_at(10, start));
        assert!(clock.poll_at(10, start + Duration::from_secs(2)));
        assert!(!clock.poll_at(10, start + Duration::from_millis(2050)));
    }

    #[test]
    fn test_wait_paces_ticks() {
        let mut clock = TickClock::new();
        let start = Instant::now();
        clock.wait(20);
        clock.wait(20);
        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
