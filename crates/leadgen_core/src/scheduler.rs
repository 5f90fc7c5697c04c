use std::time::Instant;

use crate::notify::{Notifications, ToastKind};
use crate::view_model::ScheduleBadge;
use crate::{Effect, ScheduleConfig, ScheduleState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleAction {
    Pause,
    Resume,
}

impl ScheduleAction {
    fn failure_notice(self) -> &'static str {
        match self {
            ScheduleAction::Pause => "Failed to pause the scheduler",
            ScheduleAction::Resume => "Failed to resume the scheduler",
        }
    }

    fn success_notice(self) -> &'static str {
        match self {
            ScheduleAction::Pause => "Scheduler paused",
            ScheduleAction::Resume => "Scheduler resumed",
        }
    }
}

/// Acknowledgement of a save: the server message plus the resulting state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleAck {
    pub message: Option<String>,
    pub state: ScheduleState,
}

/// Mirrors the server's recurring-schedule state. Every successful mutation
/// re-renders from the state carried in its own response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SchedulerPanel {
    state: Option<ScheduleState>,
}

impl SchedulerPanel {
    pub fn state(&self) -> Option<&ScheduleState> {
        self.state.as_ref()
    }

    pub fn apply(&mut self, state: ScheduleState) {
        self.state = Some(state);
    }

    /// Unlike the immediate trigger, an empty tier set is sent as-is.
    pub fn save(&self, config: ScheduleConfig) -> Vec<Effect> {
        vec![Effect::SaveSchedule(config)]
    }

    pub fn saved(
        &mut self,
        result: Result<ScheduleAck, String>,
        notes: &mut Notifications,
        now: Instant,
    ) {
        match result {
            Ok(ack) => {
                let message = ack
                    .message
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| "Schedule saved".to_string());
                self.state = Some(ack.state);
                notes.push(message, ToastKind::Success, now);
            }
            Err(message) => {
                notes.push(message, ToastKind::Error, now);
            }
        }
    }

    pub fn changed(
        &mut self,
        action: ScheduleAction,
        result: Result<ScheduleState, String>,
        notes: &mut Notifications,
        now: Instant,
    ) {
        match result {
            Ok(state) => {
                self.state = Some(state);
                notes.push(action.success_notice(), ToastKind::Info, now);
            }
            Err(_) => {
                notes.push(action.failure_notice(), ToastKind::Error, now);
            }
        }
    }

    pub fn badge(&self) -> ScheduleBadge {
        self.state
            .as_ref()
            .map(badge_for)
            .unwrap_or(ScheduleBadge::Unknown)
    }
}

/// `active` is checked first, then `paused`. `POST /api/scheduler/pause`
/// sets `paused` but leaves `active` true on the server, so the active
/// badge also requires `!paused`.
pub fn badge_for(state: &ScheduleState) -> ScheduleBadge {
    if state.active && !state.paused {
        ScheduleBadge::Active {
            frequency: state.frequency,
            time: state.time.clone(),
            next_run: state.next_run.clone(),
        }
    } else if state.paused {
        ScheduleBadge::Paused
    } else {
        ScheduleBadge::Inactive
    }
}
