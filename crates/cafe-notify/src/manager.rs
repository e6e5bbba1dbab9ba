//! Notification lifecycle management.
//!
//! The `Notifier` handles the visible stack, the entrance, auto-dismiss and
//! removal timers, and manual dismissal. All timers of all notifications go
//! through one ordered queue, so timer expiries and dismiss requests are
//! applied one at a time in a well-defined order.

use std::collections::HashMap;

use serde::Serialize;

use crate::config::NotifierConfig;
use crate::notification::{Millis, Notification, NotificationId, NotificationKind, Phase};
use crate::timer::{TimerAction, TimerQueue, TimerToken};

/// Messages for notification state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// The user clicked the close control of a notification.
    Dismiss(NotificationId),
    /// Host timer fired; process every timer that is due.
    Tick,
}

/// Returned by [`Notifier::notify`]; the only way to refer to a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NotificationHandle(NotificationId);

impl NotificationHandle {
    pub fn id(&self) -> NotificationId {
        self.0
    }
}

impl From<NotificationId> for NotificationHandle {
    fn from(id: NotificationId) -> Self {
        Self(id)
    }
}

/// What started the exit transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DismissReason {
    Timeout,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "reason", rename_all = "lowercase")]
pub enum TransitionKind {
    /// Inserted into the stack (created -> visible)
    Shown,
    /// Slide-in position applied; cosmetic only
    Entered,
    /// Slide-out started (visible -> dismissing)
    Dismissing(DismissReason),
    /// Dropped from the stack (dismissing -> removed)
    Removed,
}

/// One change a presenter has to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub id: NotificationId,
    pub at: Millis,
    pub kind: TransitionKind,
}

#[derive(Debug)]
struct Entry {
    notification: Notification,
    enter_timer: Option<TimerToken>,
    dismiss_timer: Option<TimerToken>,
}

/// Manages the notification stack and every notification's timers.
#[derive(Debug, Default)]
pub struct Notifier {
    config: NotifierConfig,
    /// Stack in insertion order; the first entry sits at the anchor.
    stack: Vec<NotificationId>,
    entries: HashMap<NotificationId, Entry>,
    timers: TimerQueue,
    outbox: Vec<Transition>,
    next_id: u64,
}

impl Notifier {
    pub fn new(config: NotifierConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }

    /// Show a new notification.
    ///
    /// It goes on the stack right away; the slide-in is applied after
    /// `enter_delay_ms` and the automatic dismissal after `auto_dismiss_ms`.
    pub fn notify(&mut self, text: impl Into<String>, kind: NotificationKind, now: Millis) -> NotificationHandle {
        let id = NotificationId(self.next_id);
        self.next_id += 1;

        let mut notification = Notification::new(id, text.into(), kind, now);
        notification.advance(Phase::Visible);

        let enter_timer = self
            .timers
            .schedule(now + self.config.enter_delay_ms, id, TimerAction::Enter);
        let dismiss_timer = self
            .timers
            .schedule(now + self.config.auto_dismiss_ms, id, TimerAction::AutoDismiss);

        tracing::debug!(%id, ?kind, at = %now, "notification shown");

        self.entries.insert(
            id,
            Entry {
                notification,
                enter_timer: Some(enter_timer),
                dismiss_timer: Some(dismiss_timer),
            },
        );
        self.stack.push(id);
        self.emit(id, now, TransitionKind::Shown);

        NotificationHandle(id)
    }

    /// Start the exit transition of a notification.
    ///
    /// Cancels its pending timers and schedules removal after
    /// `exit_transition_ms`. Returns `false` without doing anything if the
    /// notification is already dismissing or gone.
    pub fn dismiss(&mut self, handle: NotificationHandle, now: Millis) -> bool {
        self.begin_dismiss(handle.0, now, DismissReason::Manual)
    }

    /// Fire every timer due at or before `now`. Returns how many transitions
    /// were recorded.
    pub fn advance_to(&mut self, now: Millis) -> usize {
        let before = self.outbox.len();

        while let Some(fired) = self.timers.pop_due(now) {
            tracing::trace!(id = %fired.id, action = ?fired.action, due = %fired.due, "timer fired");
            match fired.action {
                TimerAction::Enter => self.enter(fired.id, fired.due),
                TimerAction::AutoDismiss => {
                    if let Some(entry) = self.entries.get_mut(&fired.id) {
                        entry.dismiss_timer = None;
                    }
                    self.begin_dismiss(fired.id, fired.due, DismissReason::Timeout);
                }
                TimerAction::Remove => self.remove(fired.id, fired.due),
            }
        }

        self.outbox.len() - before
    }

    /// Handles a notification message.
    pub fn handle_message(&mut self, message: Message, now: Millis) {
        match message {
            Message::Dismiss(id) => {
                // Timers that were due first take precedence.
                self.advance_to(now);
                self.dismiss(NotificationHandle(id), now);
            }
            Message::Tick => {
                self.advance_to(now);
            }
        }
    }

    /// Take every recorded transition, oldest first.
    pub fn drain_transitions(&mut self) -> Vec<Transition> {
        std::mem::take(&mut self.outbox)
    }

    /// Recorded transitions not yet drained
    pub fn pending_transitions(&self) -> &[Transition] {
        &self.outbox
    }

    /// When the earliest pending timer is due, if any.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_due()
    }

    /// Phase of a notification. Notifications that finished their lifecycle
    /// report `Removed`; handles this notifier never issued give `None`.
    pub fn phase(&self, handle: NotificationHandle) -> Option<Phase> {
        match self.entries.get(&handle.0) {
            Some(entry) => Some(entry.notification.phase()),
            None if handle.0 .0 < self.next_id => Some(Phase::Removed),
            None => None,
        }
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.entries.get(&id).map(|e| &e.notification)
    }

    /// Notifications on the stack (visible or dismissing), in insertion order.
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.stack
            .iter()
            .filter_map(move |id| self.entries.get(id).map(|e| &e.notification))
    }

    /// Position of a notification in the stack, counted from the anchor.
    pub fn stack_offset(&self, id: NotificationId) -> Option<usize> {
        self.stack.iter().position(|i| *i == id)
    }

    /// Whether a notification still has its automatic dismissal pending.
    pub fn auto_dismiss_pending(&self, handle: NotificationHandle) -> bool {
        self.entries
            .get(&handle.0)
            .and_then(|e| e.dismiss_timer)
            .map(|token| self.timers.is_pending(token))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Dismiss every notification still visible.
    pub fn clear(&mut self, now: Millis) -> usize {
        let ids: Vec<NotificationId> = self.stack.clone();
        ids.into_iter()
            .filter(|id| self.begin_dismiss(*id, now, DismissReason::Manual))
            .count()
    }

    fn enter(&mut self, id: NotificationId, at: Millis) {
        let entered = match self.entries.get_mut(&id) {
            Some(entry) => {
                entry.enter_timer = None;
                entry.notification.mark_entered()
            }
            None => false,
        };
        if entered {
            self.emit(id, at, TransitionKind::Entered);
        }
    }

    fn begin_dismiss(&mut self, id: NotificationId, now: Millis, reason: DismissReason) -> bool {
        let Some(entry) = self.entries.get_mut(&id) else {
            tracing::debug!(%id, ?reason, "dismiss ignored: notification already removed");
            return false;
        };

        if !entry.notification.phase().is_dismissable() {
            tracing::debug!(%id, ?reason, "dismiss ignored: already dismissing");
            return false;
        }

        entry.notification.advance(Phase::Dismissing);
        let timers = [entry.enter_timer.take(), entry.dismiss_timer.take()];
        for token in timers.into_iter().flatten() {
            self.timers.cancel(token);
        }
        self.timers
            .schedule(now + self.config.exit_transition_ms, id, TimerAction::Remove);

        tracing::debug!(%id, ?reason, at = %now, "notification dismissing");
        self.emit(id, now, TransitionKind::Dismissing(reason));
        true
    }

    fn remove(&mut self, id: NotificationId, at: Millis) {
        let Some(mut entry) = self.entries.remove(&id) else {
            return;
        };
        entry.notification.advance(Phase::Removed);
        self.stack.retain(|i| *i != id);

        tracing::debug!(%id, at = %at, "notification removed");
        self.emit(id, at, TransitionKind::Removed);
    }

    fn emit(&mut self, id: NotificationId, at: Millis, kind: TransitionKind) {
        self.outbox.push(Transition { id, at, kind });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(transitions: &[Transition]) -> Vec<TransitionKind> {
        transitions.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn new_notifier_is_empty() {
        let notifier = Notifier::default();
        assert!(notifier.is_empty());
        assert_eq!(notifier.next_deadline(), None);
    }

    #[test]
    fn notify_shows_immediately() {
        let mut notifier = Notifier::default();
        let handle = notifier.notify("hello", NotificationKind::Success, Millis(10));

        assert_eq!(notifier.phase(handle), Some(Phase::Visible));
        assert_eq!(notifier.len(), 1);
        assert_eq!(notifier.next_deadline(), Some(Millis(110)));
        assert_eq!(kinds(notifier.pending_transitions()), vec![TransitionKind::Shown]);
    }

    #[test]
    fn entrance_is_applied_after_delay() {
        let mut notifier = Notifier::default();
        let handle = notifier.notify("hello", NotificationKind::Success, Millis(0));

        notifier.advance_to(Millis(99));
        assert!(!notifier.get(handle.id()).map(|n| n.has_entered()).unwrap_or(true));

        notifier.advance_to(Millis(100));
        assert!(notifier.get(handle.id()).map(|n| n.has_entered()).unwrap_or(false));
        assert_eq!(notifier.next_deadline(), Some(Millis(5_000)));
    }

    #[test]
    fn dismiss_is_idempotent() {
        let mut notifier = Notifier::default();
        let handle = notifier.notify("hello", NotificationKind::Success, Millis(0));

        assert!(notifier.dismiss(handle, Millis(50)));
        assert!(!notifier.dismiss(handle, Millis(60)));
        notifier.advance_to(Millis(10_000));
        assert!(!notifier.dismiss(handle, Millis(10_001)));

        let removed = notifier
            .drain_transitions()
            .into_iter()
            .filter(|t| t.kind == TransitionKind::Removed)
            .count();
        assert_eq!(removed, 1);
    }

    #[test]
    fn manual_dismiss_cancels_timers() {
        let mut notifier = Notifier::default();
        let handle = notifier.notify("hello", NotificationKind::Error, Millis(0));
        assert!(notifier.auto_dismiss_pending(handle));

        notifier.dismiss(handle, Millis(20));
        assert!(!notifier.auto_dismiss_pending(handle));
        assert_eq!(notifier.next_deadline(), Some(Millis(320)));
    }

    #[test]
    fn unknown_handle_has_no_phase() {
        let notifier = Notifier::default();
        let foreign = NotificationHandle::from(NotificationId(42));
        assert_eq!(notifier.phase(foreign), None);
    }

    #[test]
    fn clear_dismisses_everything_visible() {
        let mut notifier = Notifier::default();
        let a = notifier.notify("a", NotificationKind::Success, Millis(0));
        notifier.notify("b", NotificationKind::Success, Millis(0));
        notifier.dismiss(a, Millis(1));

        assert_eq!(notifier.clear(Millis(2)), 1);
        notifier.advance_to(Millis(302));
        assert!(notifier.is_empty());
    }

    #[test]
    fn handle_message_dismiss() {
        let mut notifier = Notifier::default();
        let handle = notifier.notify("hello", NotificationKind::Success, Millis(0));

        notifier.handle_message(Message::Dismiss(handle.id()), Millis(200));
        assert_eq!(notifier.phase(handle), Some(Phase::Dismissing));

        notifier.handle_message(Message::Tick, Millis(500));
        assert_eq!(notifier.phase(handle), Some(Phase::Removed));
    }

    #[test]
    fn late_dismiss_message_loses_to_due_timer() {
        let mut notifier = Notifier::default();
        let handle = notifier.notify("hello", NotificationKind::Success, Millis(0));
        notifier.drain_transitions();

        // The close click is delivered after the auto-dismiss deadline passed.
        notifier.handle_message(Message::Dismiss(handle.id()), Millis(5_100));

        let transitions = notifier.drain_transitions();
        assert_eq!(
            kinds(&transitions),
            vec![
                TransitionKind::Entered,
                TransitionKind::Dismissing(DismissReason::Timeout),
            ]
        );
        assert_eq!(transitions[1].at, Millis(5_000));
    }
}
