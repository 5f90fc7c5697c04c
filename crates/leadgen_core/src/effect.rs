use crate::{JobQuery, ScheduleConfig, TierSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchStats,
    FetchDailyCounts,
    FetchJobs(JobQuery),
    FetchSources,
    FetchConfig,
    /// `keywords` empty means the backend's configured list.
    StartScrape {
        tiers: TierSet,
        dry_run: bool,
        keywords: Vec<String>,
    },
    PollStatus,
    FetchSchedule,
    SaveSchedule(ScheduleConfig),
    PauseSchedule,
    ResumeSchedule,
}
