//! Lead-gen console core: pure state machine and view-model helpers.
mod badge;
mod counter;
mod effect;
mod model;
mod msg;
mod notify;
mod orchestrator;
mod pagination;
mod results;
mod scheduler;
mod state;
mod stats;
mod timers;
mod update;
mod view_model;

pub use badge::{classify_source, SourceBadge};
pub use counter::{CounterAnimator, COUNTER_ANIMATION};
pub use effect::Effect;
pub use model::{
    ConfigSummary, DailyCount, Frequency, JobRecord, ResultPage, RunOutcome, ScheduleConfig,
    ScheduleState, ScrapeStatus, StatsSnapshot, Tier, TierSet,
};
pub use msg::Msg;
pub use notify::{Notifications, Toast, ToastKind, TOAST_FADE, TOAST_VISIBLE_FOR};
pub use orchestrator::{JobOrchestrator, JobPhase, Resolution, POLL_INTERVAL};
pub use pagination::{display_range, page_range, PageEntry};
pub use results::{
    JobQuery, QueryPatch, QueryState, ResultView, DEFAULT_PER_PAGE, SEARCH_DEBOUNCE,
};
pub use scheduler::{badge_for, ScheduleAck, ScheduleAction, SchedulerPanel};
pub use state::AppState;
pub use stats::{source_bars, StatsReporter, STATS_INTERVAL};
pub use update::update;
pub use view_model::{
    AppViewModel, JobPanelView, JobRowView, PaginationView, ResultsPageView, ResultsView,
    RunIndicator, ScheduleBadge, SourceBar, StatsView, ToastView,
};
