use std::fmt::Write;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use leadgen_core::{
    AppViewModel, ConfigSummary, DailyCount, JobPanelView, JobPhase, PageEntry, PaginationView,
    ResultsView, RunIndicator, RunOutcome, ScheduleBadge, StatsView, ToastKind, ToastView,
};

use super::constants::*;
use crate::platform::input::HELP_TEXT;

/// Renders the whole screen as plain text, top to bottom.
pub fn render(view: &AppViewModel, show_help: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{TITLE}  |  Scheduler: {}", schedule_label(&view.schedule));
    rule(&mut out);
    render_stats(&mut out, &view.stats);
    render_daily(&mut out, &view.stats.daily);
    rule(&mut out);
    render_job_panel(&mut out, &view.job);
    if let Some(config) = &view.config {
        rule(&mut out);
        render_config(&mut out, config);
    }
    rule(&mut out);
    render_results(&mut out, view);
    if !view.toasts.is_empty() {
        rule(&mut out);
        for toast in &view.toasts {
            let _ = writeln!(out, "{}", format_toast(toast));
        }
    }
    if show_help {
        rule(&mut out);
        let _ = writeln!(out, "{HELP_TEXT}");
    }
    rule(&mut out);
    out.push_str("> ");
    out
}

fn rule(out: &mut String) {
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
}

fn render_stats(out: &mut String, stats: &StatsView) {
    if !stats.loaded {
        let _ = writeln!(out, "Stats: loading...");
        return;
    }
    let _ = writeln!(
        out,
        "Total jobs: {}   Companies: {}   Today: {}",
        format_with_commas(stats.total_jobs),
        format_with_commas(stats.unique_companies),
        format_with_commas(stats.today_count)
    );
    let name_width = stats
        .source_bars
        .iter()
        .map(|bar| bar.name.chars().count())
        .max()
        .unwrap_or(0);
    for bar in &stats.source_bars {
        let filled = usize::from(bar.width_permille) * BAR_WIDTH / 1000;
        let _ = writeln!(
            out,
            "  {:<name_width$}  {}{}  {}",
            bar.name,
            "#".repeat(filled),
            ".".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
            format_with_commas(bar.count),
        );
    }
}

/// One line of the most recent days, newest first.
fn render_daily(out: &mut String, days: &[DailyCount]) {
    if days.is_empty() {
        return;
    }
    let shown: Vec<String> = days
        .iter()
        .take(DAYS_SHOWN)
        .map(|day| {
            let date = NaiveDate::parse_from_str(&day.date, "%Y-%m-%d")
                .map(|date| date.format(DAY_FORMAT).to_string())
                .unwrap_or_else(|_| day.date.clone());
            format!("{date} {}", format_with_commas(day.count))
        })
        .collect();
    let _ = writeln!(out, "Daily: {}", shown.join("  "));
}

fn render_job_panel(out: &mut String, job: &JobPanelView) {
    let phase = match (job.phase, job.indicator) {
        (JobPhase::Starting, _) => "starting...",
        (_, RunIndicator::InProgress) => "running",
        (JobPhase::Running, RunIndicator::Idle) => "waiting for status",
        (JobPhase::Idle, RunIndicator::Idle) => "idle",
    };
    let trigger = if job.triggers_enabled {
        "available"
    } else {
        "locked"
    };
    let _ = writeln!(out, "Scrape: {phase}  |  Trigger: {trigger}");

    if let Some(started_at) = &job.started_at {
        if job.indicator == RunIndicator::InProgress {
            let _ = writeln!(out, "  Started: {}", format_timestamp(started_at));
        }
    }
    if let Some(outcome) = &job.last_result {
        let label = match outcome {
            RunOutcome::Success => "success".to_string(),
            RunOutcome::Failure(label) => format!("failed ({label})"),
        };
        let when = job
            .last_run
            .as_deref()
            .map(format_timestamp)
            .unwrap_or_else(|| "unknown time".to_string());
        let _ = writeln!(out, "  Last run: {label} at {when}");
    }

    let lines: Vec<&str> = job.log_output.lines().collect();
    let tail = &lines[lines.len().saturating_sub(LOG_TAIL_LINES)..];
    for line in tail {
        let _ = writeln!(out, "  | {line}");
    }
}

fn render_config(out: &mut String, config: &ConfigSummary) {
    let mark = |on: bool| if on { "yes" } else { "no" };
    let _ = writeln!(
        out,
        "SerpAPI: {}  RapidAPI: {}  Locations: {}",
        mark(config.serpapi_configured),
        mark(config.rapidapi_configured),
        config.locations_count
    );
    if !config.keywords.is_empty() {
        let shown: Vec<&str> = config
            .keywords
            .iter()
            .take(KEYWORDS_SHOWN)
            .map(String::as_str)
            .collect();
        let more = config.keywords.len().saturating_sub(KEYWORDS_SHOWN);
        let suffix = if more > 0 {
            format!(" (+{more} more)")
        } else {
            String::new()
        };
        let _ = writeln!(out, "Keywords: {}{suffix}", shown.join(", "));
    }
    if let Some(sheet) = &config.sheet_url {
        let _ = writeln!(out, "Sheet: {sheet}");
    }
}

fn render_results(out: &mut String, view: &AppViewModel) {
    let source = if view.query.source.is_empty() {
        "all"
    } else {
        view.query.source.as_str()
    };
    let _ = writeln!(
        out,
        "Search: \"{}\"  Source: {}  ({} sources known)",
        view.search_input,
        source,
        view.sources.len()
    );

    match &view.results {
        ResultsView::Loading => {
            let _ = writeln!(out, "Loading jobs...");
        }
        ResultsView::Empty => {
            let _ = writeln!(out, "No jobs found.");
        }
        ResultsView::Page(page) => {
            let _ = writeln!(
                out,
                "Showing {}-{} of {}",
                format_with_commas(page.range_start),
                format_with_commas(page.range_end),
                format_with_commas(page.total)
            );
            for row in &page.rows {
                let seen = row
                    .seen_at
                    .as_deref()
                    .map(format_timestamp)
                    .unwrap_or_default();
                let _ = writeln!(
                    out,
                    "  [{:<3}] {} - {} ({})  {}",
                    row.badge.tag(),
                    row.company,
                    row.title,
                    row.source,
                    seen
                );
                if let Some(url) = &row.url {
                    let _ = writeln!(out, "        {url}");
                }
            }
            let _ = writeln!(out, "{}", format_pagination(&page.pagination));
        }
    }
}

fn schedule_label(badge: &ScheduleBadge) -> String {
    match badge {
        ScheduleBadge::Unknown => "unknown".to_string(),
        ScheduleBadge::Paused => "paused".to_string(),
        ScheduleBadge::Inactive => "not scheduled".to_string(),
        ScheduleBadge::Active {
            frequency,
            time,
            next_run,
        } => {
            let mut label = String::from("active");
            if let Some(frequency) = frequency {
                let _ = write!(label, ", {}", frequency.label().to_lowercase());
            }
            if let Some(time) = time {
                let _ = write!(label, " at {time}");
            }
            if let Some(next_run) = next_run {
                let _ = write!(label, " (next {})", format_timestamp(next_run));
            }
            label
        }
    }
}

fn format_pagination(pagination: &PaginationView) -> String {
    let mut parts = Vec::with_capacity(pagination.entries.len() + 2);
    parts.push(if pagination.prev_enabled { "<" } else { " " }.to_string());
    for entry in &pagination.entries {
        parts.push(match entry {
            PageEntry::Page(page) if *page == pagination.current => format!("[{page}]"),
            PageEntry::Page(page) => page.to_string(),
            PageEntry::Ellipsis => "...".to_string(),
        });
    }
    parts.push(if pagination.next_enabled { ">" } else { " " }.to_string());
    format!("Pages: {}", parts.join(" ").trim_end())
}

fn format_toast(toast: &ToastView) -> String {
    let marker = match toast.kind {
        ToastKind::Success => "OK",
        ToastKind::Error => "!!",
        ToastKind::Info => "--",
    };
    if toast.fading {
        format!("({marker} {})", toast.message)
    } else {
        format!("{marker} {}", toast.message)
    }
}

/// Server timestamps are ISO-8601, with or without an offset.
fn format_timestamp(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format(TIMESTAMP_FORMAT).to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format(TIMESTAMP_FORMAT).to_string();
    }
    raw.to_string()
}

fn format_with_commas(value: u64) -> String {
    let mut out = String::new();
    for (i, ch) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}
