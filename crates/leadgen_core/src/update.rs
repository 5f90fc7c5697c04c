use std::time::Instant;

use crate::notify::ToastKind;
use crate::orchestrator::Resolution;
use crate::scheduler::ScheduleAction;
use crate::{AppState, Effect, Msg, QueryPatch, RunOutcome};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            state.mark_dirty();
            vec![
                Effect::FetchStats,
                Effect::FetchDailyCounts,
                Effect::FetchJobs(state.results.current_query()),
                Effect::FetchSources,
                Effect::FetchConfig,
                Effect::FetchSchedule,
                Effect::PollStatus,
            ]
        }
        Msg::Tick { now } => tick(&mut state, now),
        Msg::SearchInput { text, now } => {
            state.advance_clock(now);
            state.results.type_search(text, now);
            state.mark_dirty();
            Vec::new()
        }
        Msg::SourceSelected(source) => {
            state.mark_dirty();
            vec![Effect::FetchJobs(
                state.results.set_query(QueryPatch::source(source.trim())),
            )]
        }
        Msg::PageSelected(page) => jobs_fetch(&mut state, |results| results.select_page(page)),
        Msg::NextPage => jobs_fetch(&mut state, |results| results.next_page()),
        Msg::PrevPage => jobs_fetch(&mut state, |results| results.prev_page()),
        Msg::RefreshRequested => {
            let mut effects = refresh_after_run(&state);
            effects.push(Effect::FetchSchedule);
            effects.push(Effect::PollStatus);
            effects
        }
        Msg::Notice { message, kind } => {
            let now = state.clock;
            state.notifications.push(message, kind, now);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ScrapeRequested {
            tiers,
            dry_run,
            keywords,
        } => {
            let now = state.clock;
            let effects = state.orchestrator.trigger(
                tiers,
                dry_run,
                keywords,
                &mut state.notifications,
                now,
            );
            state.mark_dirty();
            effects
        }
        Msg::ScrapeStartFinished(result) => {
            let now = state.clock;
            let effects = state
                .orchestrator
                .start_finished(result, &mut state.notifications, now);
            state.mark_dirty();
            effects
        }
        Msg::StatusPolled(Ok(status)) => {
            let resolution = state.orchestrator.apply_status(status);
            state.mark_dirty();
            match resolution {
                Some(resolution) => resolve(&mut state, resolution),
                None => Vec::new(),
            }
        }
        // Failed polls are deferred to the next tick, never surfaced.
        Msg::StatusPolled(Err(_)) => Vec::new(),
        Msg::StatsLoaded(Ok(snapshot)) => {
            let now = state.clock;
            state.stats.apply(snapshot, now);
            state.mark_dirty();
            Vec::new()
        }
        Msg::DailyCountsLoaded(Ok(days)) => {
            state.stats.apply_daily(days);
            state.mark_dirty();
            Vec::new()
        }
        Msg::JobsLoaded(Ok(page)) => {
            state.results.apply_page(page);
            state.mark_dirty();
            Vec::new()
        }
        Msg::JobsLoaded(Err(message)) => {
            let now = state.clock;
            state.notifications.push(
                format!("Could not load jobs: {message}"),
                ToastKind::Error,
                now,
            );
            state.mark_dirty();
            Vec::new()
        }
        Msg::SourcesLoaded(Ok(sources)) => {
            state.results.set_sources(sources);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ConfigLoaded(Ok(config)) => {
            state.config = Some(config);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ScheduleLoaded(Ok(schedule)) => {
            state.scheduler.apply(schedule);
            state.mark_dirty();
            Vec::new()
        }
        // Read-only fetches keep whatever is displayed until the next success.
        Msg::StatsLoaded(Err(_))
        | Msg::DailyCountsLoaded(Err(_))
        | Msg::SourcesLoaded(Err(_))
        | Msg::ConfigLoaded(Err(_))
        | Msg::ScheduleLoaded(Err(_)) => Vec::new(),
        Msg::ScheduleSaveRequested(config) => state.scheduler.save(config),
        Msg::ScheduleActionRequested(action) => match action {
            ScheduleAction::Pause => vec![Effect::PauseSchedule],
            ScheduleAction::Resume => vec![Effect::ResumeSchedule],
        },
        Msg::ScheduleSaved(result) => {
            let now = state.clock;
            state
                .scheduler
                .saved(result, &mut state.notifications, now);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ScheduleChanged { action, result } => {
            let now = state.clock;
            state
                .scheduler
                .changed(action, result, &mut state.notifications, now);
            state.mark_dirty();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn tick(state: &mut AppState, now: Instant) -> Vec<Effect> {
    state.advance_clock(now);
    let mut effects = Vec::new();

    if let Some(query) = state.results.poll_debounce(now) {
        effects.push(Effect::FetchJobs(query));
        state.mark_dirty();
    }
    if state.stats_timer.fire_due(now) {
        effects.push(Effect::FetchStats);
        effects.push(Effect::FetchDailyCounts);
    }
    // Runs at rest too; the orchestrator decides what a snapshot means.
    if state.poll_timer.fire_due(now) {
        effects.push(Effect::PollStatus);
    }
    if state.notifications.expire(now) {
        state.mark_dirty();
    }
    if state.stats.needs_frame(now) {
        state.mark_dirty();
    }
    effects
}

fn jobs_fetch(
    state: &mut AppState,
    select: impl FnOnce(&mut crate::ResultView) -> Option<crate::JobQuery>,
) -> Vec<Effect> {
    match select(&mut state.results) {
        Some(query) => {
            state.mark_dirty();
            vec![Effect::FetchJobs(query)]
        }
        None => Vec::new(),
    }
}

fn resolve(state: &mut AppState, resolution: Resolution) -> Vec<Effect> {
    let now = state.clock;
    match resolution.outcome {
        RunOutcome::Success if resolution.last_run.is_some() => {
            state
                .notifications
                .push("Scrape completed successfully", ToastKind::Success, now);
            refresh_after_run(state)
        }
        RunOutcome::Success => Vec::new(),
        RunOutcome::Failure(label) => {
            state.notifications.push(
                format!("Scrape finished with result: {label}"),
                ToastKind::Error,
                now,
            );
            Vec::new()
        }
    }
}

/// Stats, the current result page (page preserved) and the source list.
fn refresh_after_run(state: &AppState) -> Vec<Effect> {
    vec![
        Effect::FetchStats,
        Effect::FetchDailyCounts,
        Effect::FetchJobs(state.results.current_query()),
        Effect::FetchSources,
    ]
}
