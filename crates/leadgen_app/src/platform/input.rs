use std::time::Instant;

use chrono::NaiveTime;
use leadgen_core::{Frequency, Msg, ScheduleAction, ScheduleConfig, Tier, TierSet};

pub const HELP_TEXT: &str = "\
Commands:
  search <text>                          filter results (debounced)
  source <name|all>                      filter by source
  page <n> | next | prev                 move through results
  scrape <tiers...> [--dry-run]          start a run, e.g. `scrape 1 2`
    [--keyword <text>]...                override the configured keywords
  schedule save <freq> <HH:MM> [tiers]   freq: daily, twice_daily, every_6h, hourly
  schedule pause | schedule resume
  refresh                                reload everything
  help                                   toggle this panel
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Msg(Msg),
    Help,
    Quit,
    Nothing,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Unknown command `{0}`; type `help` for the list")]
    UnknownCommand(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("`{0}` is not a page number")]
    BadPage(String),
    #[error("`{0}` is not a tier (expected 1, 2 or 3)")]
    BadTier(String),
    #[error("`{0}` is not a frequency (daily, twice_daily, every_6h, hourly)")]
    BadFrequency(String),
    #[error("`{0}` is not a time of day (HH:MM)")]
    BadTime(String),
}

/// Parses one console line. `now` stamps keystroke-style messages.
pub fn parse_command(line: &str, now: Instant) -> Result<Command, InputError> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let msg = match head.to_ascii_lowercase().as_str() {
        "" => return Ok(Command::Nothing),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" | "q" => return Ok(Command::Quit),
        "search" => Msg::SearchInput {
            text: rest.to_string(),
            now,
        },
        "source" => {
            if rest.is_empty() {
                return Err(InputError::Usage("source <name|all>"));
            }
            let source = if rest.eq_ignore_ascii_case("all") {
                String::new()
            } else {
                rest.to_string()
            };
            Msg::SourceSelected(source)
        }
        "page" => {
            let page = rest
                .parse::<u32>()
                .map_err(|_| InputError::BadPage(rest.to_string()))?;
            Msg::PageSelected(page)
        }
        "next" => Msg::NextPage,
        "prev" => Msg::PrevPage,
        "refresh" => Msg::RefreshRequested,
        "scrape" => parse_scrape(rest)?,
        "schedule" => parse_schedule(rest)?,
        other => return Err(InputError::UnknownCommand(other.to_string())),
    };
    Ok(Command::Msg(msg))
}

/// Words after `--keyword` form one keyword, up to the next flag.
fn parse_scrape(rest: &str) -> Result<Msg, InputError> {
    const USAGE: &str = "scrape <tiers...> [--keyword <text>]... [--dry-run]";

    let mut dry_run = false;
    let mut tier_args = Vec::new();
    let mut keywords: Vec<Vec<&str>> = Vec::new();
    let mut in_keyword = false;
    for word in rest.split_whitespace() {
        match word {
            "--dry-run" => {
                dry_run = true;
                in_keyword = false;
            }
            "--keyword" => {
                keywords.push(Vec::new());
                in_keyword = true;
            }
            _ => match keywords.last_mut() {
                Some(words) if in_keyword => words.push(word),
                _ => tier_args.push(word),
            },
        }
    }
    if keywords.iter().any(Vec::is_empty) {
        return Err(InputError::Usage(USAGE));
    }
    // An empty selection is passed through so the console reports it.
    let tiers = parse_tiers(&tier_args)?;
    Ok(Msg::ScrapeRequested {
        tiers,
        dry_run,
        keywords: keywords.iter().map(|words| words.join(" ")).collect(),
    })
}

fn parse_schedule(rest: &str) -> Result<Msg, InputError> {
    const USAGE: &str =
        "schedule save <freq> <HH:MM> [tiers...] | schedule pause | schedule resume";

    let words: Vec<&str> = rest.split_whitespace().collect();
    match words.as_slice() {
        ["pause"] => Ok(Msg::ScheduleActionRequested(ScheduleAction::Pause)),
        ["resume"] => Ok(Msg::ScheduleActionRequested(ScheduleAction::Resume)),
        ["save", frequency, time, tiers @ ..] => {
            let frequency = Frequency::parse(frequency)
                .ok_or_else(|| InputError::BadFrequency(frequency.to_string()))?;
            let time = NaiveTime::parse_from_str(time, "%H:%M")
                .map_err(|_| InputError::BadTime(time.to_string()))?;
            Ok(Msg::ScheduleSaveRequested(ScheduleConfig {
                frequency,
                time: time.format("%H:%M").to_string(),
                tiers: parse_tiers(tiers)?,
            }))
        }
        _ => Err(InputError::Usage(USAGE)),
    }
}

fn parse_tiers(words: &[&str]) -> Result<TierSet, InputError> {
    words
        .iter()
        .flat_map(|word| word.split(','))
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u8>()
                .ok()
                .and_then(Tier::new)
                .ok_or_else(|| InputError::BadTier(part.to_string()))
        })
        .collect()
}
