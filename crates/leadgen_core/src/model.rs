use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// One of the three independent acquisition strategies a run can combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tier(u8);

impl Tier {
    pub const ALL: [Tier; 3] = [Tier(1), Tier(2), Tier(3)];

    pub fn new(value: u8) -> Option<Self> {
        (1..=3).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub type TierSet = BTreeSet<Tier>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub company: String,
    pub title: String,
    pub source: String,
    pub seen_at: Option<String>,
    pub url: Option<String>,
}

/// One server-side page of job records. `page` is whatever the server
/// reports, which may differ from the page that was requested.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultPage {
    pub items: Vec<JobRecord>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub pages: u32,
}

impl ResultPage {
    pub fn is_empty(&self) -> bool {
        self.total == 0 || self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Success,
    /// Any non-success label reported by the backend ("error", "timeout", ...).
    Failure(String),
}

impl RunOutcome {
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("success") {
            RunOutcome::Success
        } else {
            RunOutcome::Failure(label.trim().to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            RunOutcome::Success => "success",
            RunOutcome::Failure(label) => label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScrapeStatus {
    pub running: bool,
    pub last_result: Option<RunOutcome>,
    pub last_run: Option<String>,
    pub started_at: Option<String>,
    pub log_output: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    TwiceDaily,
    Every6h,
    Hourly,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [
        Frequency::Daily,
        Frequency::TwiceDaily,
        Frequency::Every6h,
        Frequency::Hourly,
    ];

    /// Wire name used by the scheduler endpoints.
    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::TwiceDaily => "twice_daily",
            Frequency::Every6h => "every_6h",
            Frequency::Hourly => "hourly",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|freq| freq.as_str().eq_ignore_ascii_case(raw))
    }

    pub fn label(self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::TwiceDaily => "Twice daily",
            Frequency::Every6h => "Every 6 hours",
            Frequency::Hourly => "Hourly",
        }
    }
}

/// Recurring-schedule settings sent on save. An empty tier set is allowed here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    pub frequency: Frequency,
    pub time: String,
    pub tiers: TierSet,
}

/// Server-derived scheduler state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScheduleState {
    pub active: bool,
    pub paused: bool,
    pub next_run: Option<String>,
    pub frequency: Option<Frequency>,
    pub time: Option<String>,
    pub tiers: TierSet,
}

/// New records first seen on one calendar day (`YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DailyCount {
    pub date: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub total_jobs: u64,
    pub unique_companies: u64,
    pub today_count: u64,
    pub sources: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigSummary {
    pub serpapi_configured: bool,
    pub rapidapi_configured: bool,
    pub keywords: Vec<String>,
    pub locations_count: u64,
    pub sheet_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_rejects_out_of_range_values() {
        assert_eq!(Tier::new(0), None);
        assert_eq!(Tier::new(4), None);
        assert_eq!(Tier::new(2).map(Tier::get), Some(2));
    }

    #[test]
    fn outcome_keeps_raw_failure_label() {
        assert_eq!(RunOutcome::from_label("SUCCESS"), RunOutcome::Success);
        assert_eq!(
            RunOutcome::from_label("timeout"),
            RunOutcome::Failure("timeout".to_string())
        );
        assert_eq!(RunOutcome::from_label("error").label(), "error");
    }

    #[test]
    fn frequency_parses_wire_names() {
        assert_eq!(Frequency::parse("every_6h"), Some(Frequency::Every6h));
        assert_eq!(Frequency::parse(" Daily "), Some(Frequency::Daily));
        assert_eq!(Frequency::parse("weekly"), None);
    }
}
