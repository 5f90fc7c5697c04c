//! Timer bookkeeping driven by the monotonic clock carried in `Msg::Tick`.
use std::time::{Duration, Instant};

/// Fixed-interval timer. Periods missed between ticks collapse into one firing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatingTimer {
    period: Duration,
    next_due: Instant,
}

impl RepeatingTimer {
    pub fn starting_at(now: Instant, period: Duration) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    pub fn fire_due(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.period;
        if self.next_due <= now {
            self.next_due = now + self.period;
        }
        true
    }
}

/// One-shot quiet-period timer; re-arming supersedes the pending deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debounce {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn fire_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
