use crate::{
    ConfigSummary, DailyCount, Frequency, JobPhase, PageEntry, QueryState, RunOutcome,
    SourceBadge, ToastKind,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub stats: StatsView,
    pub job: JobPanelView,
    pub schedule: ScheduleBadge,
    pub config: Option<ConfigSummary>,
    pub search_input: String,
    pub query: QueryState,
    pub sources: Vec<String>,
    pub results: ResultsView,
    pub toasts: Vec<ToastView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatsView {
    /// False until the first snapshot arrives.
    pub loaded: bool,
    pub total_jobs: u64,
    pub unique_companies: u64,
    pub today_count: u64,
    pub source_bars: Vec<SourceBar>,
    pub daily: Vec<DailyCount>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBar {
    pub name: String,
    pub count: u64,
    /// Share of all counted records, in tenths of a percent (0..=1000).
    pub width_permille: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunIndicator {
    #[default]
    Idle,
    InProgress,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobPanelView {
    pub phase: JobPhase,
    pub indicator: RunIndicator,
    pub triggers_enabled: bool,
    pub log_output: String,
    pub last_result: Option<RunOutcome>,
    pub last_run: Option<String>,
    pub started_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScheduleBadge {
    /// No scheduler status received yet.
    #[default]
    Unknown,
    Active {
        frequency: Option<Frequency>,
        time: Option<String>,
        next_run: Option<String>,
    },
    Paused,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultsView {
    #[default]
    Loading,
    Empty,
    Page(ResultsPageView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsPageView {
    pub rows: Vec<JobRowView>,
    pub range_start: u64,
    pub range_end: u64,
    pub total: u64,
    pub pagination: PaginationView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub current: u32,
    pub total_pages: u32,
    pub entries: Vec<PageEntry>,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub company: String,
    pub title: String,
    pub source: String,
    pub badge: SourceBadge,
    pub seen_at: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastView {
    pub message: String,
    pub kind: ToastKind,
    pub fading: bool,
}
