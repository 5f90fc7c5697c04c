use std::time::Instant;

use crate::notify::Notifications;
use crate::orchestrator::{JobOrchestrator, JobPhase, POLL_INTERVAL};
use crate::results::ResultView;
use crate::scheduler::SchedulerPanel;
use crate::stats::{StatsReporter, STATS_INTERVAL};
use crate::timers::RepeatingTimer;
use crate::view_model::{AppViewModel, JobPanelView, RunIndicator, ToastView};
use crate::ConfigSummary;

/// Whole console state. Only `update` mutates it, one message at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub(crate) clock: Instant,
    dirty: bool,
    pub(crate) notifications: Notifications,
    pub(crate) stats: StatsReporter,
    pub(crate) results: ResultView,
    pub(crate) orchestrator: JobOrchestrator,
    pub(crate) scheduler: SchedulerPanel,
    pub(crate) config: Option<ConfigSummary>,
    pub(crate) stats_timer: RepeatingTimer,
    pub(crate) poll_timer: RepeatingTimer,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// State whose clock and repeating timers start at `now`.
    pub fn starting_at(now: Instant) -> Self {
        Self {
            clock: now,
            dirty: false,
            notifications: Notifications::default(),
            stats: StatsReporter::default(),
            results: ResultView::default(),
            orchestrator: JobOrchestrator::default(),
            scheduler: SchedulerPanel::default(),
            config: None,
            stats_timer: RepeatingTimer::starting_at(now, STATS_INTERVAL),
            poll_timer: RepeatingTimer::starting_at(now, POLL_INTERVAL),
        }
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.results = ResultView::new(per_page);
        self
    }

    pub fn orchestrator(&self) -> &JobOrchestrator {
        &self.orchestrator
    }

    pub fn results(&self) -> &ResultView {
        &self.results
    }

    pub fn scheduler(&self) -> &SchedulerPanel {
        &self.scheduler
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn view(&self) -> AppViewModel {
        let status = self.orchestrator.last_status();
        let phase = self.orchestrator.phase();
        AppViewModel {
            stats: self.stats.view(self.clock),
            job: JobPanelView {
                phase,
                indicator: if phase == JobPhase::Idle {
                    RunIndicator::Idle
                } else {
                    RunIndicator::InProgress
                },
                triggers_enabled: self.orchestrator.triggers_enabled(),
                log_output: self.orchestrator.log_output().to_string(),
                last_result: status.and_then(|s| s.last_result.clone()),
                last_run: status.and_then(|s| s.last_run.clone()),
                started_at: status.and_then(|s| s.started_at.clone()),
            },
            schedule: self.scheduler.badge(),
            config: self.config.clone(),
            search_input: self.results.search_input().to_string(),
            query: self.results.query().clone(),
            sources: self.results.sources().to_vec(),
            results: self.results.view(),
            toasts: self
                .notifications
                .entries()
                .iter()
                .map(|toast| ToastView {
                    message: toast.message.clone(),
                    kind: toast.kind,
                    fading: toast.fading,
                })
                .collect(),
            dirty: self.dirty,
        }
    }

    /// Returns whether a redraw is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn advance_clock(&mut self, now: Instant) {
        if now > self.clock {
            self.clock = now;
        }
    }
}
