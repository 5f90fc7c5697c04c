use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use leadgen_core::{
    update, AppState, ConfigSummary, DailyCount, Effect, Msg, SourceBar, StatsSnapshot, ToastKind,
    COUNTER_ANIMATION, TOAST_FADE, TOAST_VISIBLE_FOR,
};
use pretty_assertions::assert_eq;

fn snapshot(sources: &[(&str, u64)]) -> StatsSnapshot {
    let sources: BTreeMap<String, u64> = sources
        .iter()
        .map(|(name, count)| (name.to_string(), *count))
        .collect();
    StatsSnapshot {
        total_jobs: sources.values().sum(),
        unique_companies: 31,
        today_count: 4,
        sources,
    }
}

#[test]
fn started_issues_every_initial_fetch() {
    let (mut state, effects) = update(AppState::new(), Msg::Started);

    assert_eq!(
        effects,
        vec![
            Effect::FetchStats,
            Effect::FetchDailyCounts,
            Effect::FetchJobs(state.results().current_query()),
            Effect::FetchSources,
            Effect::FetchConfig,
            Effect::FetchSchedule,
            Effect::PollStatus,
        ]
    );
    assert!(state.consume_dirty());
}

#[test]
fn source_breakdown_is_sorted_and_proportional() {
    let (state, _) = update(
        AppState::new(),
        Msg::StatsLoaded(Ok(snapshot(&[("LinkedIn", 10), ("Indeed", 40)]))),
    );

    assert_eq!(
        state.view().stats.source_bars,
        vec![
            SourceBar {
                name: "Indeed".into(),
                count: 40,
                width_permille: 800,
            },
            SourceBar {
                name: "LinkedIn".into(),
                count: 10,
                width_permille: 200,
            },
        ]
    );
}

#[test]
fn counters_animate_toward_new_snapshot() {
    let t0 = Instant::now();
    let (state, _) = update(
        AppState::starting_at(t0),
        Msg::StatsLoaded(Ok(snapshot(&[("Indeed", 40), ("LinkedIn", 10)]))),
    );
    assert_eq!(state.view().stats.total_jobs, 0);
    assert!(state.view().stats.loaded);

    let (mut state, _) = update(
        state,
        Msg::Tick {
            now: t0 + Duration::from_millis(400),
        },
    );
    let midway = state.view().stats.total_jobs;
    assert!(midway > 0 && midway < 50);
    assert!(state.consume_dirty());

    let (mut state, _) = update(
        state,
        Msg::Tick {
            now: t0 + COUNTER_ANIMATION,
        },
    );
    assert_eq!(state.view().stats.total_jobs, 50);
    assert!(state.consume_dirty(), "final frame is drawn");

    let (mut state, _) = update(
        state,
        Msg::Tick {
            now: t0 + COUNTER_ANIMATION + Duration::from_millis(75),
        },
    );
    assert!(!state.consume_dirty());
}

#[test]
fn stats_failure_keeps_previous_snapshot_silently() {
    let (state, _) = update(
        AppState::new(),
        Msg::StatsLoaded(Ok(snapshot(&[("Indeed", 3)]))),
    );
    let (state, _) = update(state, Msg::StatsLoaded(Err("500".into())));

    assert_eq!(state.view().stats.source_bars.len(), 1);
    assert!(state.notifications().entries().is_empty());
}

#[test]
fn toasts_fade_then_expire_on_ticks() {
    let t0 = Instant::now();
    let (state, _) = update(
        AppState::starting_at(t0),
        Msg::Notice {
            message: "Unknown command".into(),
            kind: ToastKind::Info,
        },
    );
    assert_eq!(state.view().toasts.len(), 1);

    let (state, _) = update(
        state,
        Msg::Tick {
            now: t0 + TOAST_VISIBLE_FOR,
        },
    );
    assert!(state.view().toasts[0].fading);

    let (state, _) = update(
        state,
        Msg::Tick {
            now: t0 + TOAST_VISIBLE_FOR + TOAST_FADE,
        },
    );
    assert!(state.view().toasts.is_empty());
}

#[test]
fn config_summary_is_exposed() {
    let config = ConfigSummary {
        serpapi_configured: true,
        rapidapi_configured: false,
        keywords: vec!["Accounts Payable".into()],
        locations_count: 50,
        sheet_url: None,
    };
    let (state, _) = update(AppState::new(), Msg::ConfigLoaded(Ok(config.clone())));
    assert_eq!(state.view().config, Some(config));
}

fn day(date: &str, count: u64) -> DailyCount {
    DailyCount {
        date: date.to_string(),
        count,
    }
}

#[test]
fn daily_activity_is_listed_newest_first() {
    let (state, _) = update(
        AppState::new(),
        Msg::DailyCountsLoaded(Ok(vec![
            day("2026-02-23", 7),
            day("2026-02-25", 12),
            day("2026-02-24", 0),
        ])),
    );

    assert!(!state.view().stats.loaded, "activity does not imply stats");
    assert_eq!(
        state.view().stats.daily,
        vec![
            day("2026-02-25", 12),
            day("2026-02-24", 0),
            day("2026-02-23", 7),
        ]
    );

    let (state, effects) = update(state, Msg::DailyCountsLoaded(Err("timeout".into())));
    assert!(effects.is_empty());
    assert_eq!(state.view().stats.daily.len(), 3);
    assert!(state.notifications().entries().is_empty());
}
