use std::time::{Duration, Instant};

/// How long a toast stays fully visible before it starts to fade.
pub const TOAST_VISIBLE_FOR: Duration = Duration::from_secs(4);
/// Fade transition length; the toast is removed once it elapses.
pub const TOAST_FADE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    pub created_at: Instant,
    pub fading: bool,
}

impl Toast {
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }
}

/// Append-only toast stack. No dedup, no depth limit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Notifications {
    next_id: u64,
    entries: Vec<Toast>,
}

impl Notifications {
    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind, now: Instant) -> u64 {
        self.next_id += 1;
        self.entries.push(Toast {
            id: self.next_id,
            message: message.into(),
            kind,
            created_at: now,
            fading: false,
        });
        self.next_id
    }

    /// Advances every toast's lifecycle; returns true when anything changed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.entries.len();
        self.entries.retain(|toast| toast.age(now) < TOAST_VISIBLE_FOR + TOAST_FADE);
        let mut changed = self.entries.len() != before;

        for toast in &mut self.entries {
            if !toast.fading && toast.age(now) >= TOAST_VISIBLE_FOR {
                toast.fading = true;
                changed = true;
            }
        }
        changed
    }

    pub fn entries(&self) -> &[Toast] {
        &self.entries
    }
}
