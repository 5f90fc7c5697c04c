use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::counter::CounterAnimator;
use crate::view_model::{SourceBar, StatsView};
use crate::{DailyCount, StatsSnapshot};

pub const STATS_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatsReporter {
    snapshot: Option<StatsSnapshot>,
    total_jobs: CounterAnimator,
    unique_companies: CounterAnimator,
    today: CounterAnimator,
    settled: bool,
    daily: Vec<DailyCount>,
}

impl StatsReporter {
    pub fn snapshot(&self) -> Option<&StatsSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn apply(&mut self, snapshot: StatsSnapshot, now: Instant) {
        self.total_jobs.retarget(snapshot.total_jobs, now);
        self.unique_companies.retarget(snapshot.unique_companies, now);
        self.today.retarget(snapshot.today_count, now);
        self.snapshot = Some(snapshot);
        self.settled = false;
    }

    /// Replaces the per-day activity, ordered newest day first.
    pub fn apply_daily(&mut self, mut days: Vec<DailyCount>) {
        days.sort_by(|a, b| b.date.cmp(&a.date));
        self.daily = days;
    }

    /// True while counters move, plus once more so the final value is drawn.
    pub fn needs_frame(&mut self, now: Instant) -> bool {
        let animating = self.total_jobs.is_animating(now)
            || self.unique_companies.is_animating(now)
            || self.today.is_animating(now);
        if animating {
            return true;
        }
        if !self.settled {
            self.settled = true;
            return self.snapshot.is_some();
        }
        false
    }

    pub fn view(&self, now: Instant) -> StatsView {
        let Some(snapshot) = &self.snapshot else {
            return StatsView {
                daily: self.daily.clone(),
                ..StatsView::default()
            };
        };
        StatsView {
            loaded: true,
            total_jobs: self.total_jobs.value_at(now),
            unique_companies: self.unique_companies.value_at(now),
            today_count: self.today.value_at(now),
            source_bars: source_bars(&snapshot.sources),
            daily: self.daily.clone(),
        }
    }
}

/// One bar per source, largest first (ties by name), sized by share of the total.
pub fn source_bars(sources: &BTreeMap<String, u64>) -> Vec<SourceBar> {
    let sum: u64 = sources.values().sum();
    let mut bars: Vec<SourceBar> = sources
        .iter()
        .map(|(name, count)| SourceBar {
            name: name.clone(),
            count: *count,
            width_permille: if sum == 0 {
                0
            } else {
                ((u128::from(*count) * 1000) / u128::from(sum)) as u16
            },
        })
        .collect();
    bars.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    bars
}
