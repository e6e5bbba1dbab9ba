//! Core notification data structures.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Logical timestamp in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Millis(pub u64);

impl Millis {
    /// Convert a host timestamp such as `performance.now()`.
    /// Negative and non-finite values clamp to zero.
    pub fn from_f64(ms: f64) -> Self {
        if ms.is_finite() && ms > 0.0 {
            Millis(ms.floor() as u64)
        } else {
            Millis(0)
        }
    }

    /// Milliseconds from `self` until `later`, zero if `later` is not after `self`
    pub fn until(self, later: Millis) -> u64 {
        later.0.saturating_sub(self.0)
    }
}

impl Add<u64> for Millis {
    type Output = Millis;

    fn add(self, ms: u64) -> Millis {
        Millis(self.0.saturating_add(ms))
    }
}

impl fmt::Display for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Identifier of a notification, unique within one notifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub(crate) u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "notification-{}", self.0)
    }
}

/// Visual flavour of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Success,
    Error,
}

impl NotificationKind {
    /// CSS class used by the page stylesheet
    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }

    /// Font Awesome icon shown next to the text
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Success => "fa-check-circle",
            NotificationKind::Error => "fa-exclamation-circle",
        }
    }

    /// Background colour of the toast
    pub fn background(&self) -> &'static str {
        match self {
            NotificationKind::Success => "#27ae60",
            NotificationKind::Error => "#e74c3c",
        }
    }
}

/// Lifecycle phase. Only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Created,
    Visible,
    Dismissing,
    Removed,
}

impl Phase {
    /// Whether a dismissal may still take effect
    pub fn is_dismissable(self) -> bool {
        matches!(self, Phase::Created | Phase::Visible)
    }
}

/// A transient message with its own lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    id: NotificationId,
    text: String,
    kind: NotificationKind,
    created_at: Millis,
    phase: Phase,
    entered: bool,
}

impl Notification {
    pub(crate) fn new(id: NotificationId, text: String, kind: NotificationKind, now: Millis) -> Self {
        Self {
            id,
            text,
            kind,
            created_at: now,
            phase: Phase::Created,
            entered: false,
        }
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    pub fn created_at(&self) -> Millis {
        self.created_at
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the slide-in position has been applied
    pub fn has_entered(&self) -> bool {
        self.entered
    }

    /// Move to `next` if it is strictly later in the lifecycle
    pub(crate) fn advance(&mut self, next: Phase) -> bool {
        if next > self.phase {
            self.phase = next;
            true
        } else {
            false
        }
    }

    pub(crate) fn mark_entered(&mut self) -> bool {
        if self.phase == Phase::Visible && !self.entered {
            self.entered = true;
            true
        } else {
            false
        }
    }
}
