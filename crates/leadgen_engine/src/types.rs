use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct StatsResponse {
    pub total_jobs: u64,
    pub unique_companies: u64,
    pub today_count: u64,
    pub sources: BTreeMap<String, u64>,
}

/// One stored job row. Every column is optional on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct JobRow {
    pub id: Option<i64>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub source: Option<String>,
    pub seen_at: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct JobsPage {
    #[serde(alias = "items")]
    pub jobs: Vec<JobRow>,
    pub page: u32,
    pub per_page: Option<u32>,
    pub total: u64,
    pub pages: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct DayCount {
    pub date: String,
    pub count: u64,
}

/// `GET /api/jobs/daily`: newest day first, at most 30 days.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct DailyCountsResponse {
    pub days: Vec<DayCount>,
}

/// Query for `GET /api/jobs`. Blank `search`/`source` are left off the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobsQuery {
    pub page: u32,
    pub per_page: u32,
    pub search: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct SourcesResponse {
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ConfigResponse {
    pub serpapi_configured: bool,
    pub rapidapi_configured: bool,
    pub keywords: Vec<String>,
    pub locations_count: u64,
    pub sheet_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeRequest {
    pub tier: Vec<u8>,
    /// Overrides the backend's keyword list when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ScrapeStarted {
    pub command: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ScrapeStatusResponse {
    pub running: bool,
    pub last_result: Option<String>,
    pub last_run: Option<String>,
    pub started_at: Option<String>,
    pub log_output: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ScheduleStatus {
    pub active: bool,
    pub paused: bool,
    pub next_run: Option<String>,
    pub frequency: Option<String>,
    pub time: Option<String>,
    pub tiers: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleRequest {
    pub frequency: String,
    pub time: String,
    pub tiers: Vec<u8>,
}

/// Save response: the new scheduler state plus a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ScheduleSaved {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub state: ScheduleStatus,
}
