use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use leadgen_engine::{
    ApiError, ChannelEventSink, ConfigResponse, DailyCountsResponse, DashboardApi, DayCount,
    EngineCommand, EngineEvent, EngineHandle, FailureKind, JobsPage, JobsQuery, ScheduleRequest,
    ScheduleSaved, ScheduleStatus, ScrapeRequest, ScrapeStarted, ScrapeStatusResponse,
    SourcesResponse, StatsResponse,
};
use pretty_assertions::assert_eq;

/// Answers from memory; `start_scrape` always reports a busy server.
struct FakeApi;

fn busy() -> ApiError {
    ApiError {
        kind: FailureKind::Rejected { status: 409 },
        message: "A scrape is already running".to_string(),
    }
}

#[async_trait::async_trait]
impl DashboardApi for FakeApi {
    async fn stats(&self) -> Result<StatsResponse, ApiError> {
        Ok(StatsResponse {
            total_jobs: 3,
            ..StatsResponse::default()
        })
    }

    async fn daily_counts(&self) -> Result<DailyCountsResponse, ApiError> {
        Ok(DailyCountsResponse {
            days: vec![DayCount {
                date: "2026-02-25".to_string(),
                count: 12,
            }],
        })
    }

    async fn jobs(&self, query: &JobsQuery) -> Result<JobsPage, ApiError> {
        Ok(JobsPage {
            page: query.page,
            per_page: Some(query.per_page),
            ..JobsPage::default()
        })
    }

    async fn sources(&self) -> Result<SourcesResponse, ApiError> {
        Ok(SourcesResponse {
            sources: vec!["Indeed".to_string()],
        })
    }

    async fn config(&self) -> Result<ConfigResponse, ApiError> {
        Ok(ConfigResponse::default())
    }

    async fn start_scrape(&self, _request: &ScrapeRequest) -> Result<ScrapeStarted, ApiError> {
        Err(busy())
    }

    async fn scrape_status(&self) -> Result<ScrapeStatusResponse, ApiError> {
        Ok(ScrapeStatusResponse {
            running: true,
            ..ScrapeStatusResponse::default()
        })
    }

    async fn schedule_status(&self) -> Result<ScheduleStatus, ApiError> {
        Ok(ScheduleStatus::default())
    }

    async fn save_schedule(&self, request: &ScheduleRequest) -> Result<ScheduleSaved, ApiError> {
        Ok(ScheduleSaved {
            message: Some(format!("Scheduled {} at {}", request.frequency, request.time)),
            state: ScheduleStatus {
                active: true,
                ..ScheduleStatus::default()
            },
        })
    }

    async fn pause_schedule(&self) -> Result<ScheduleStatus, ApiError> {
        Ok(ScheduleStatus {
            paused: true,
            ..ScheduleStatus::default()
        })
    }

    async fn resume_schedule(&self) -> Result<ScheduleStatus, ApiError> {
        Ok(ScheduleStatus::default())
    }
}

fn start() -> (EngineHandle, mpsc::Receiver<EngineEvent>) {
    let (tx, rx) = mpsc::channel();
    let engine = EngineHandle::new(Arc::new(FakeApi), Arc::new(ChannelEventSink::new(tx)));
    (engine, rx)
}

fn next_event(rx: &mpsc::Receiver<EngineEvent>) -> EngineEvent {
    rx.recv_timeout(Duration::from_secs(5)).expect("engine event")
}

#[test]
fn each_command_produces_one_matching_event() {
    let (mut engine, rx) = start();

    engine.submit(EngineCommand::FetchJobs(JobsQuery {
        page: 4,
        per_page: 25,
        search: String::new(),
        source: String::new(),
    }));
    match next_event(&rx) {
        EngineEvent::JobsLoaded(Ok(page)) => assert_eq!(page.page, 4),
        other => panic!("unexpected event {other:?}"),
    }

    engine.submit(EngineCommand::StartScrape(ScrapeRequest {
        tier: vec![1],
        keywords: None,
        dry_run: true,
    }));
    assert_eq!(next_event(&rx), EngineEvent::ScrapeStartFinished(Err(busy())));

    engine.submit(EngineCommand::PauseSchedule);
    match next_event(&rx) {
        EngineEvent::SchedulePaused(Ok(state)) => assert!(state.paused),
        other => panic!("unexpected event {other:?}"),
    }

    engine.shutdown();
}

#[test]
fn concurrent_commands_all_complete() {
    let (mut engine, rx) = start();
    engine.submit(EngineCommand::FetchStats);
    engine.submit(EngineCommand::FetchSources);
    engine.submit(EngineCommand::PollStatus);
    engine.submit(EngineCommand::FetchSchedule);
    engine.submit(EngineCommand::FetchDailyCounts);

    let mut kinds: Vec<&str> = (0..5)
        .map(|_| match next_event(&rx) {
            EngineEvent::StatsLoaded(_) => "stats",
            EngineEvent::DailyCountsLoaded(_) => "daily",
            EngineEvent::SourcesLoaded(_) => "sources",
            EngineEvent::StatusPolled(_) => "status",
            EngineEvent::ScheduleLoaded(_) => "schedule",
            other => panic!("unexpected event {other:?}"),
        })
        .collect();
    kinds.sort_unstable();
    assert_eq!(kinds, vec!["daily", "schedule", "sources", "stats", "status"]);

    engine.shutdown();
}

#[test]
fn commands_after_shutdown_are_dropped() {
    let (mut engine, rx) = start();
    engine.shutdown();
    engine.submit(EngineCommand::FetchStats);
    assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
}
