use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tokio_util::sync::CancellationToken;

use crate::{
    ApiError, ConfigResponse, DailyCountsResponse, DashboardApi, JobsPage, JobsQuery,
    ScheduleRequest, ScheduleSaved, ScheduleStatus, ScrapeRequest, ScrapeStarted,
    ScrapeStatusResponse, SourcesResponse, StatsResponse,
};

const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    FetchStats,
    FetchDailyCounts,
    FetchJobs(JobsQuery),
    FetchSources,
    FetchConfig,
    StartScrape(ScrapeRequest),
    PollStatus,
    FetchSchedule,
    SaveSchedule(ScheduleRequest),
    PauseSchedule,
    ResumeSchedule,
}

/// One completed request. Each command yields exactly one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    StatsLoaded(Result<StatsResponse, ApiError>),
    DailyCountsLoaded(Result<DailyCountsResponse, ApiError>),
    JobsLoaded(Result<JobsPage, ApiError>),
    SourcesLoaded(Result<SourcesResponse, ApiError>),
    ConfigLoaded(Result<ConfigResponse, ApiError>),
    ScrapeStartFinished(Result<ScrapeStarted, ApiError>),
    StatusPolled(Result<ScrapeStatusResponse, ApiError>),
    ScheduleLoaded(Result<ScheduleStatus, ApiError>),
    ScheduleSaved(Result<ScheduleSaved, ApiError>),
    SchedulePaused(Result<ScheduleStatus, ApiError>),
    ScheduleResumed(Result<ScheduleStatus, ApiError>),
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Runs dashboard requests on a dedicated tokio runtime thread.
///
/// Commands are executed concurrently; completion order is whatever the
/// network gives. Dropping the handle cancels outstanding requests.
pub struct EngineHandle {
    cmd_tx: UnboundedSender<EngineCommand>,
    cancel: CancellationToken,
    worker: Option<thread::JoinHandle<()>>,
}

impl EngineHandle {
    pub fn new(api: Arc<dyn DashboardApi>, sink: Arc<dyn EventSink>) -> Self {
        let (cmd_tx, mut cmd_rx) = unbounded_channel::<EngineCommand>();
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let spawned = thread::Builder::new()
            .name("leadgen-engine".to_string())
            .spawn(move || {
                let runtime = match tokio::runtime::Builder::new_multi_thread()
                    .enable_all()
                    .build()
                {
                    Ok(runtime) => runtime,
                    Err(err) => {
                        engine_error!("Engine runtime failed to start: {}", err);
                        return;
                    }
                };

                runtime.block_on(async {
                    loop {
                        tokio::select! {
                            _ = token.cancelled() => break,
                            command = cmd_rx.recv() => {
                                let Some(command) = command else { break };
                                let api = api.clone();
                                let sink = sink.clone();
                                let token = token.clone();
                                tokio::spawn(async move {
                                    tokio::select! {
                                        _ = token.cancelled() => {}
                                        event = execute(api.as_ref(), command) => sink.emit(event),
                                    }
                                });
                            }
                        }
                    }
                });
                runtime.shutdown_timeout(SHUTDOWN_GRACE);
                engine_info!("Engine stopped");
            });

        let worker = match spawned {
            Ok(worker) => Some(worker),
            Err(err) => {
                engine_error!("Engine thread failed to start: {}", err);
                None
            }
        };

        Self {
            cmd_tx,
            cancel,
            worker,
        }
    }

    pub fn submit(&self, command: EngineCommand) {
        engine_debug!("Submitting {:?}", command);
        if self.cmd_tx.send(command).is_err() {
            engine_warn!("Engine is not running; command dropped");
        }
    }

    /// Cancels in-flight requests and waits for the runtime thread to exit.
    pub fn shutdown(&mut self) {
        self.cancel.cancel();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                engine_error!("Engine thread panicked");
            }
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn execute(api: &dyn DashboardApi, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::FetchStats => EngineEvent::StatsLoaded(api.stats().await),
        EngineCommand::FetchDailyCounts => {
            EngineEvent::DailyCountsLoaded(api.daily_counts().await)
        }
        EngineCommand::FetchJobs(query) => EngineEvent::JobsLoaded(api.jobs(&query).await),
        EngineCommand::FetchSources => EngineEvent::SourcesLoaded(api.sources().await),
        EngineCommand::FetchConfig => EngineEvent::ConfigLoaded(api.config().await),
        EngineCommand::StartScrape(request) => {
            EngineEvent::ScrapeStartFinished(api.start_scrape(&request).await)
        }
        EngineCommand::PollStatus => EngineEvent::StatusPolled(api.scrape_status().await),
        EngineCommand::FetchSchedule => EngineEvent::ScheduleLoaded(api.schedule_status().await),
        EngineCommand::SaveSchedule(request) => {
            EngineEvent::ScheduleSaved(api.save_schedule(&request).await)
        }
        EngineCommand::PauseSchedule => EngineEvent::SchedulePaused(api.pause_schedule().await),
        EngineCommand::ResumeSchedule => EngineEvent::ScheduleResumed(api.resume_schedule().await),
    }
}
