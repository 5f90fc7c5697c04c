use std::sync::{mpsc, Arc};

use engine_logging::{engine_debug, engine_info, engine_warn};
use leadgen_core::{
    ConfigSummary, DailyCount, Effect, Frequency, JobQuery, JobRecord, Msg, ResultPage, RunOutcome,
    ScheduleAck, ScheduleAction, ScheduleConfig, ScheduleState, ScrapeStatus, StatsSnapshot, Tier,
    TierSet,
};
use leadgen_engine::{
    ApiError, DashboardApi, EngineCommand, EngineEvent, EngineHandle, EventSink, JobsPage,
    JobsQuery, ScheduleRequest, ScheduleStatus, ScrapeRequest, ScrapeStatusResponse,
};

use super::app::AppEvent;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(api: Arc<dyn DashboardApi>, events: mpsc::Sender<AppEvent>) -> Self {
        let engine = EngineHandle::new(api, Arc::new(MsgSink { events }));
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            self.engine.submit(command_for(effect));
        }
    }

    pub fn shutdown(&mut self) {
        self.engine.shutdown();
    }
}

fn command_for(effect: Effect) -> EngineCommand {
    match effect {
        Effect::FetchStats => EngineCommand::FetchStats,
        Effect::FetchDailyCounts => EngineCommand::FetchDailyCounts,
        Effect::FetchJobs(query) => EngineCommand::FetchJobs(jobs_query(query)),
        Effect::FetchSources => EngineCommand::FetchSources,
        Effect::FetchConfig => EngineCommand::FetchConfig,
        Effect::StartScrape {
            tiers,
            dry_run,
            keywords,
        } => {
            engine_info!(
                "StartScrape tiers={:?} dry_run={} keywords={:?}",
                tier_list(&tiers),
                dry_run,
                keywords
            );
            EngineCommand::StartScrape(ScrapeRequest {
                tier: tier_list(&tiers),
                // No override keeps the backend's configured keywords.
                keywords: (!keywords.is_empty()).then_some(keywords),
                dry_run,
            })
        }
        Effect::PollStatus => EngineCommand::PollStatus,
        Effect::FetchSchedule => EngineCommand::FetchSchedule,
        Effect::SaveSchedule(config) => EngineCommand::SaveSchedule(schedule_request(config)),
        Effect::PauseSchedule => EngineCommand::PauseSchedule,
        Effect::ResumeSchedule => EngineCommand::ResumeSchedule,
    }
}

fn jobs_query(query: JobQuery) -> JobsQuery {
    JobsQuery {
        page: query.page,
        per_page: query.per_page,
        search: query.search,
        source: query.source,
    }
}

fn schedule_request(config: ScheduleConfig) -> ScheduleRequest {
    if config.tiers.is_empty() {
        // The server stores the empty set; scheduled runs then cover no tiers.
        engine_warn!(
            "Saving a {} schedule with no tiers selected",
            config.frequency.as_str()
        );
    }
    ScheduleRequest {
        frequency: config.frequency.as_str().to_string(),
        time: config.time,
        tiers: tier_list(&config.tiers),
    }
}

fn tier_list(tiers: &TierSet) -> Vec<u8> {
    tiers.iter().map(|tier| tier.get()).collect()
}

/// Feeds engine completions back into the update loop as messages.
struct MsgSink {
    events: mpsc::Sender<AppEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.events.send(AppEvent::Msg(msg_for(event)));
    }
}

fn msg_for(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::StatsLoaded(result) => Msg::StatsLoaded(
            result
                .map(|stats| StatsSnapshot {
                    total_jobs: stats.total_jobs,
                    unique_companies: stats.unique_companies,
                    today_count: stats.today_count,
                    sources: stats.sources,
                })
                .map_err(|err| logged("stats", err)),
        ),
        EngineEvent::DailyCountsLoaded(result) => Msg::DailyCountsLoaded(
            result
                .map(|response| {
                    response
                        .days
                        .into_iter()
                        .map(|day| DailyCount {
                            date: day.date,
                            count: day.count,
                        })
                        .collect()
                })
                .map_err(|err| logged("daily counts", err)),
        ),
        EngineEvent::JobsLoaded(result) => {
            Msg::JobsLoaded(result.map(result_page).map_err(|err| logged("jobs", err)))
        }
        EngineEvent::SourcesLoaded(result) => Msg::SourcesLoaded(
            result
                .map(|response| response.sources)
                .map_err(|err| logged("sources", err)),
        ),
        EngineEvent::ConfigLoaded(result) => Msg::ConfigLoaded(
            result
                .map(|config| ConfigSummary {
                    serpapi_configured: config.serpapi_configured,
                    rapidapi_configured: config.rapidapi_configured,
                    keywords: config.keywords,
                    locations_count: config.locations_count,
                    sheet_url: config.sheet_url,
                })
                .map_err(|err| logged("config", err)),
        ),
        EngineEvent::ScrapeStartFinished(result) => Msg::ScrapeStartFinished(match result {
            Ok(started) => {
                let command = started.command.unwrap_or_default();
                engine_info!("Scrape started: {}", command);
                Ok(command)
            }
            Err(err) => {
                engine_warn!("Scrape start failed: {}", err);
                Err(err.user_message(""))
            }
        }),
        EngineEvent::StatusPolled(result) => Msg::StatusPolled(
            result
                .map(scrape_status)
                .map_err(|err| logged("scrape status", err)),
        ),
        EngineEvent::ScheduleLoaded(result) => Msg::ScheduleLoaded(
            result
                .map(schedule_state)
                .map_err(|err| logged("scheduler status", err)),
        ),
        EngineEvent::ScheduleSaved(result) => Msg::ScheduleSaved(match result {
            Ok(saved) => Ok(ScheduleAck {
                message: saved.message,
                state: schedule_state(saved.state),
            }),
            Err(err) => {
                engine_warn!("Schedule save failed: {}", err);
                Err(err.user_message("Failed to save schedule"))
            }
        }),
        EngineEvent::SchedulePaused(result) => schedule_changed(ScheduleAction::Pause, result),
        EngineEvent::ScheduleResumed(result) => schedule_changed(ScheduleAction::Resume, result),
    }
}

fn logged(what: &str, err: ApiError) -> String {
    engine_warn!("Fetching {} failed: {}", what, err);
    err.to_string()
}

fn schedule_changed(action: ScheduleAction, result: Result<ScheduleStatus, ApiError>) -> Msg {
    Msg::ScheduleChanged {
        action,
        result: result
            .map(schedule_state)
            .map_err(|err| logged("scheduler change", err)),
    }
}

fn result_page(page: JobsPage) -> ResultPage {
    ResultPage {
        items: page
            .jobs
            .into_iter()
            .map(|row| JobRecord {
                company: row.company.unwrap_or_default(),
                title: row.title.unwrap_or_default(),
                source: row.source.unwrap_or_default(),
                seen_at: row.seen_at,
                url: row.url,
            })
            .collect(),
        page: page.page,
        per_page: page.per_page.unwrap_or(0),
        total: page.total,
        pages: page.pages,
    }
}

fn scrape_status(status: ScrapeStatusResponse) -> ScrapeStatus {
    ScrapeStatus {
        running: status.running,
        last_result: status.last_result.as_deref().map(RunOutcome::from_label),
        last_run: status.last_run,
        started_at: status.started_at,
        log_output: status.log_output.unwrap_or_default(),
    }
}

fn schedule_state(status: ScheduleStatus) -> ScheduleState {
    let frequency = status.frequency.as_deref().and_then(|raw| {
        let parsed = Frequency::parse(raw);
        if parsed.is_none() {
            engine_debug!("Ignoring unknown schedule frequency {:?}", raw);
        }
        parsed
    });
    ScheduleState {
        active: status.active,
        paused: status.paused,
        next_run: status.next_run,
        frequency,
        time: status.time,
        tiers: status.tiers.into_iter().filter_map(Tier::new).collect(),
    }
}
