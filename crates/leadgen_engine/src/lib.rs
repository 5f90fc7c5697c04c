//! Lead-gen engine: HTTP access to the dashboard API and effect execution.
mod client;
mod engine;
mod error;
mod types;

pub use client::{ApiSettings, DashboardApi, ReqwestApi};
pub use engine::{ChannelEventSink, EngineCommand, EngineEvent, EngineHandle, EventSink};
pub use error::{ApiError, FailureKind};
pub use types::{
    ConfigResponse, DailyCountsResponse, DayCount, JobRow, JobsPage, JobsQuery, ScheduleRequest,
    ScheduleSaved, ScheduleStatus, ScrapeRequest, ScrapeStarted, ScrapeStatusResponse,
    SourcesResponse, StatsResponse,
};
