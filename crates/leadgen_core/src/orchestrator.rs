//! Trigger, poll and reconcile the remote scrape job.
//!
//! The orchestrator never waits for the job. It issues a start request,
//! then reconciles every status snapshot the poll loop hands it. Trigger
//! affordances stay disabled from the moment a start is requested until a
//! poll observes the run finishing (or the start request fails).
use std::time::{Duration, Instant};

use crate::notify::{Notifications, ToastKind};
use crate::{Effect, RunOutcome, ScrapeStatus, TierSet};

pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

const EMPTY_TIERS_NOTICE: &str = "Select at least one tier to run";
const START_FAILED_FALLBACK: &str = "Failed to start scrape";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobPhase {
    #[default]
    Idle,
    /// Start request issued, response not yet received.
    Starting,
    Running,
}

/// Produced by the poll that observes a run finishing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub outcome: RunOutcome,
    pub last_run: Option<String>,
}

/// Identity of the last run that produced a resolution. The backend keeps
/// `started_at` and `last_run` until the next run overwrites them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ResolvedRun {
    started_at: Option<String>,
    last_run: Option<String>,
}

impl ResolvedRun {
    fn started(&self, status: &ScrapeStatus) -> bool {
        self.started_at.is_some() && self.started_at == status.started_at
    }

    fn finished(&self, status: &ScrapeStatus) -> bool {
        self.last_run.is_some() && self.last_run == status.last_run
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobOrchestrator {
    phase: JobPhase,
    last_status: Option<ScrapeStatus>,
    command: Option<String>,
    resolved: Option<ResolvedRun>,
    /// Running was entered from an idle poll rather than a trigger.
    adopted: bool,
}

impl JobOrchestrator {
    pub fn phase(&self) -> JobPhase {
        self.phase
    }

    pub fn triggers_enabled(&self) -> bool {
        self.phase == JobPhase::Idle
    }

    pub fn last_status(&self) -> Option<&ScrapeStatus> {
        self.last_status.as_ref()
    }

    /// Command line the backend reported for the current run, if any.
    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    pub fn log_output(&self) -> &str {
        self.last_status
            .as_ref()
            .map(|status| status.log_output.as_str())
            .unwrap_or_default()
    }

    /// Requests a run. Affordances are disabled before the start effect is
    /// returned; an empty tier selection is rejected without any effect.
    /// Blank keyword overrides are dropped.
    pub fn trigger(
        &mut self,
        tiers: TierSet,
        dry_run: bool,
        keywords: Vec<String>,
        notes: &mut Notifications,
        now: Instant,
    ) -> Vec<Effect> {
        if self.phase != JobPhase::Idle {
            return Vec::new();
        }
        if tiers.is_empty() {
            notes.push(EMPTY_TIERS_NOTICE, ToastKind::Error, now);
            return Vec::new();
        }
        self.phase = JobPhase::Starting;
        self.command = None;
        self.adopted = false;
        let keywords = keywords
            .into_iter()
            .map(|keyword| keyword.trim().to_string())
            .filter(|keyword| !keyword.is_empty())
            .collect();
        vec![Effect::StartScrape {
            tiers,
            dry_run,
            keywords,
        }]
    }

    /// Handles the start response. `Err` carries the message to show.
    pub fn start_finished(
        &mut self,
        result: Result<String, String>,
        notes: &mut Notifications,
        now: Instant,
    ) -> Vec<Effect> {
        if self.phase != JobPhase::Starting {
            return Vec::new();
        }
        match result {
            Ok(command) => {
                self.phase = JobPhase::Running;
                self.command = (!command.is_empty()).then_some(command);
                notes.push("Scrape started", ToastKind::Info, now);
                vec![Effect::PollStatus]
            }
            Err(message) => {
                self.phase = JobPhase::Idle;
                let message = if message.trim().is_empty() {
                    START_FAILED_FALLBACK.to_string()
                } else {
                    message
                };
                notes.push(message, ToastKind::Error, now);
                Vec::new()
            }
        }
    }

    /// Reconciles a status snapshot. Returns a resolution exactly once per
    /// run: on the first snapshot that shows the run finished.
    ///
    /// Polls overlap, so a snapshot may arrive after a newer one. A
    /// `running` snapshot for a run that already resolved is not adopted,
    /// and a finished snapshot carrying the resolved `last_run` never
    /// resolves again.
    pub fn apply_status(&mut self, status: ScrapeStatus) -> Option<Resolution> {
        let resolution = match self.phase {
            JobPhase::Idle => {
                let stale = self
                    .resolved
                    .as_ref()
                    .is_some_and(|run| run.started(&status));
                if status.running && !stale {
                    self.phase = JobPhase::Running;
                    self.adopted = true;
                }
                None
            }
            // A finished result seen here belongs to an earlier run.
            JobPhase::Starting => None,
            JobPhase::Running => match (&status.last_result, status.running) {
                (Some(_), false)
                    if self.resolved.as_ref().is_some_and(|run| run.finished(&status)) =>
                {
                    // An adopted run turned out to be the one already
                    // reported. A triggered run keeps waiting for its own.
                    if self.adopted {
                        self.phase = JobPhase::Idle;
                    }
                    None
                }
                (Some(outcome), false) => {
                    self.phase = JobPhase::Idle;
                    self.resolved = Some(ResolvedRun {
                        started_at: status.started_at.clone(),
                        last_run: status.last_run.clone(),
                    });
                    Some(Resolution {
                        outcome: outcome.clone(),
                        last_run: status.last_run.clone(),
                    })
                }
                _ => None,
            },
        };
        self.last_status = Some(status);
        resolution
    }
}
