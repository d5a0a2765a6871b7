//! Independent periodic timers for formation movement and shooting
//!
//! Timers are queried against a millisecond timestamp supplied by the caller,
//! so the schedule is deterministic and independent of the tick rate.

/// Named formation timers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerId {
    /// Horizontal formation step
    MoveX,
    /// Vertical formation step
    MoveY,
    /// Random invader fires
    Shoot,
}

impl TimerId {
    pub const ALL: [TimerId; 3] = [TimerId::MoveX, TimerId::MoveY, TimerId::Shoot];
}

/// Interval for each timer, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerIntervals {
    pub move_x_ms: u64,
    pub move_y_ms: u64,
    pub shoot_ms: u64,
}

impl Default for TimerIntervals {
    fn default() -> Self {
        use crate::consts::*;
        Self {
            move_x_ms: INVADER_TIME_X_MS,
            move_y_ms: INVADER_TIME_Y_MS,
            shoot_ms: INVADER_TIME_SHOOT_MS,
        }
    }
}

/// Which timers fired during one poll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DueTimers {
    pub move_x: bool,
    pub move_y: bool,
    pub shoot: bool,
}

impl DueTimers {
    pub fn is_due(&self, id: TimerId) -> bool {
        match id {
            TimerId::MoveX => self.move_x,
            TimerId::MoveY => self.move_y,
            TimerId::Shoot => self.shoot,
        }
    }

    fn set(&mut self, id: TimerId) {
        match id {
            TimerId::MoveX => self.move_x = true,
            TimerId::MoveY => self.move_y = true,
            TimerId::Shoot => self.shoot = true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PeriodicTimer {
    interval_ms: u64,
    last_fire_ms: u64,
}

impl PeriodicTimer {
    fn elapsed(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.last_fire_ms)
    }

    /// Fire at most once; keeps phase unless more than one interval behind
    fn poll(&mut self, now_ms: u64) -> bool {
        let elapsed = self.elapsed(now_ms);
        if elapsed < self.interval_ms {
            return false;
        }
        if elapsed >= self.interval_ms * 2 {
            self.last_fire_ms = now_ms;
        } else {
            self.last_fire_ms += self.interval_ms;
        }
        true
    }
}

/// The three formation timers
#[derive(Debug, Clone)]
pub struct Scheduler {
    move_x: PeriodicTimer,
    move_y: PeriodicTimer,
    shoot: PeriodicTimer,
}

impl Scheduler {
    /// Start all timers at `now_ms`. Zero intervals are raised to 1 ms.
    pub fn new(intervals: TimerIntervals, now_ms: u64) -> Self {
        let timer = |interval_ms: u64| PeriodicTimer {
            interval_ms: interval_ms.max(1),
            last_fire_ms: now_ms,
        };
        Self {
            move_x: timer(intervals.move_x_ms),
            move_y: timer(intervals.move_y_ms),
            shoot: timer(intervals.shoot_ms),
        }
    }

    fn timer(&self, id: TimerId) -> &PeriodicTimer {
        match id {
            TimerId::MoveX => &self.move_x,
            TimerId::MoveY => &self.move_y,
            TimerId::Shoot => &self.shoot,
        }
    }

    fn timer_mut(&mut self, id: TimerId) -> &mut PeriodicTimer {
        match id {
            TimerId::MoveX => &mut self.move_x,
            TimerId::MoveY => &mut self.move_y,
            TimerId::Shoot => &mut self.shoot,
        }
    }

    /// Milliseconds since `id` last fired
    pub fn since_last_fire(&self, id: TimerId, now_ms: u64) -> u64 {
        self.timer(id).elapsed(now_ms)
    }

    /// Re-phase every timer to start counting from `now_ms`
    pub fn restart(&mut self, now_ms: u64) {
        for id in TimerId::ALL {
            self.timer_mut(id).last_fire_ms = now_ms;
        }
    }

    /// Collect the timers that are due and mark them fired
    pub fn poll(&mut self, now_ms: u64) -> DueTimers {
        let mut due = DueTimers::default();
        for id in TimerId::ALL {
            if self.timer_mut(id).poll(now_ms) {
                due.set(id);
            }
        }
        due
    }
}
