//! Ordered queue of pending timers.
//!
//! Timers fire in `(due, sequence)` order, so two timers due at the same
//! instant fire in the order they were scheduled. Cancelling a timer
//! invalidates its token; the stale heap entry is skipped when it surfaces.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use crate::notification::{Millis, NotificationId};

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimerAction {
    /// Apply the slide-in position
    Enter,
    /// Start dismissing because the display time ran out
    AutoDismiss,
    /// Remove after the slide-out finished
    Remove,
}

/// Handle used to cancel a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    due: Millis,
    seq: u64,
    id: NotificationId,
    action: TimerAction,
}

/// A timer popped from the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub due: Millis,
    pub id: NotificationId,
    pub action: TimerAction,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    live: HashSet<u64>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Millis, id: NotificationId, action: TimerAction) -> TimerToken {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { due, seq, id, action }));
        self.live.insert(seq);
        TimerToken(seq)
    }

    /// Returns `true` if the timer was still pending.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        self.live.remove(&token.0)
    }

    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.live.contains(&token.0)
    }

    /// Pop the earliest live timer due at or before `now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<Fired> {
        while let Some(Reverse(entry)) = self.heap.peek().copied() {
            if !self.live.contains(&entry.seq) {
                self.heap.pop();
                continue;
            }
            if entry.due > now {
                return None;
            }
            self.heap.pop();
            self.live.remove(&entry.seq);
            return Some(Fired {
                due: entry.due,
                id: entry.id,
                action: entry.action,
            });
        }
        None
    }

    /// Due time of the earliest live timer
    pub fn next_due(&self) -> Option<Millis> {
        self.heap
            .iter()
            .filter(|Reverse(entry)| self.live.contains(&entry.seq))
            .map(|Reverse(entry)| entry.due)
            .min()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: NotificationId = NotificationId(1);
    const B: NotificationId = NotificationId(2);

    #[test]
    fn test_fires_in_due_then_schedule_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(Millis(300), A, TimerAction::Remove);
        queue.schedule(Millis(100), B, TimerAction::Enter);
        queue.schedule(Millis(100), A, TimerAction::Enter);

        let order: Vec<_> = std::iter::from_fn(|| queue.pop_due(Millis(1_000)))
            .map(|f| (f.due, f.id))
            .collect();
        assert_eq!(order, vec![(Millis(100), B), (Millis(100), A), (Millis(300), A)]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_nothing_fires_early() {
        let mut queue = TimerQueue::new();
        queue.schedule(Millis(500), A, TimerAction::AutoDismiss);
        assert_eq!(queue.pop_due(Millis(499)), None);
        assert!(queue.pop_due(Millis(500)).is_some());
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut queue = TimerQueue::new();
        let token = queue.schedule(Millis(10), A, TimerAction::AutoDismiss);
        queue.schedule(Millis(20), B, TimerAction::AutoDismiss);

        assert!(queue.cancel(token));
        assert!(!queue.cancel(token));
        assert!(!queue.is_pending(token));
        assert_eq!(queue.next_due(), Some(Millis(20)));

        let fired = queue.pop_due(Millis(100)).map(|f| f.id);
        assert_eq!(fired, Some(B));
        assert_eq!(queue.pop_due(Millis(100)), None);
    }
}
