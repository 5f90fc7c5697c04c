use std::time::Instant;

use crate::{
    ConfigSummary, DailyCount, ResultPage, ScheduleAck, ScheduleAction, ScheduleConfig, ScheduleState,
    ScrapeStatus, StatsSnapshot, TierSet, ToastKind,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Console is up; every component performs its initial fetch.
    Started,
    /// Clock tick driving repeating timers, the search debounce, toast
    /// expiry and counter animation.
    Tick { now: Instant },
    /// Search box contents after one keystroke.
    SearchInput { text: String, now: Instant },
    /// Source filter picked; empty means all sources.
    SourceSelected(String),
    PageSelected(u32),
    NextPage,
    PrevPage,
    /// Re-fetch everything with the current parameters.
    RefreshRequested,
    /// Notice raised by the front end itself.
    Notice { message: String, kind: ToastKind },
    /// User clicked "scrape now".
    ScrapeRequested {
        tiers: TierSet,
        dry_run: bool,
        keywords: Vec<String>,
    },
    ScheduleSaveRequested(ScheduleConfig),
    ScheduleActionRequested(ScheduleAction),
    StatsLoaded(Result<StatsSnapshot, String>),
    /// Per-day activity, newest day first.
    DailyCountsLoaded(Result<Vec<DailyCount>, String>),
    JobsLoaded(Result<ResultPage, String>),
    SourcesLoaded(Result<Vec<String>, String>),
    ConfigLoaded(Result<ConfigSummary, String>),
    /// Start response: the backend command line, or the message to surface.
    ScrapeStartFinished(Result<String, String>),
    StatusPolled(Result<ScrapeStatus, String>),
    ScheduleLoaded(Result<ScheduleState, String>),
    ScheduleSaved(Result<ScheduleAck, String>),
    ScheduleChanged {
        action: ScheduleAction,
        result: Result<ScheduleState, String>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
