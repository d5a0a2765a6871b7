//! Native wall-clock time source

use std::time::{Duration, Instant};

use super::Clock;

/// Monotonic clock that sleeps off whatever is left of each tick
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
    last_tick: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            origin: now,
            last_tick: now,
        }
    }
}

/// Length of one tick at `fps` (a zero rate is treated as 1 Hz)
pub fn tick_duration(fps: u32) -> Duration {
    Duration::from_secs(1) / fps.max(1)
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn wait_until_next_tick(&mut self, fps: u32) {
        let frame = tick_duration(fps);
        let elapsed = self.last_tick.elapsed();
        if elapsed < frame {
            std::thread::sleep(frame - elapsed);
        }
        self.last_tick = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_duration() {
        assert_eq!(tick_duration(50), Duration::from_millis(20));
        assert_eq!(tick_duration(0), Duration::from_secs(1));
    }

    #[test]
    fn test_wait_paces_ticks() {
        let mut clock = SystemClock::new();
        let start = clock.now_ms();
        clock.wait_until_next_tick(100);
        clock.wait_until_next_tick(100);
        // Two 10 ms ticks
        assert!(clock.now_ms() - start >= 10);
    }
}
