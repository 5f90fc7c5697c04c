use std::time::{Duration, Instant};

pub const COUNTER_ANIMATION: Duration = Duration::from_millis(800);

/// Eases a displayed integer toward its latest target (ease-out cubic).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterAnimator {
    from: u64,
    to: u64,
    started_at: Option<Instant>,
    duration: Duration,
}

impl Default for CounterAnimator {
    fn default() -> Self {
        Self::new(COUNTER_ANIMATION)
    }
}

impl CounterAnimator {
    pub fn new(duration: Duration) -> Self {
        Self {
            from: 0,
            to: 0,
            started_at: None,
            duration,
        }
    }

    pub fn target(&self) -> u64 {
        self.to
    }

    /// Starts a new transition from whatever is currently displayed.
    pub fn retarget(&mut self, to: u64, now: Instant) {
        if to == self.to {
            return;
        }
        self.from = self.value_at(now);
        self.to = to;
        self.started_at = Some(now);
    }

    pub fn value_at(&self, now: Instant) -> u64 {
        let Some(started_at) = self.started_at else {
            return self.to;
        };
        let elapsed = now.saturating_duration_since(started_at);
        if elapsed >= self.duration || self.duration.is_zero() {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let eased = 1.0 - (1.0 - t).powi(3);
        let from = self.from as f64;
        let to = self.to as f64;
        (from + (to - from) * eased).round().max(0.0) as u64
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.value_at(now) != self.to
    }
}
