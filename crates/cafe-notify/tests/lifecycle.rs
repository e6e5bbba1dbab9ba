//! Integration tests for the notification lifecycle
//!
//! Timing guarantees, dismissal idempotence, cancellation of the automatic
//! dismissal and independence between stacked notifications.

use cafe_notify::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn phases_of(transitions: &[Transition], id: NotificationId) -> Vec<TransitionKind> {
    transitions
        .iter()
        .filter(|t| t.id == id)
        .map(|t| t.kind)
        .collect()
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(12_345)]
fn test_removed_exactly_at_lifetime(#[case] created: u64) {
    init_tracing();
    let mut notifier = Notifier::default();
    let handle = notifier.notify("Hello", NotificationKind::Success, Millis(created));

    notifier.advance_to(Millis(created + 4_999));
    assert_eq!(notifier.phase(handle), Some(Phase::Visible));

    notifier.advance_to(Millis(created + 5_000));
    assert_eq!(notifier.phase(handle), Some(Phase::Dismissing));

    notifier.advance_to(Millis(created + 5_299));
    assert_eq!(notifier.phase(handle), Some(Phase::Dismissing));

    notifier.advance_to(Millis(created + 5_300));
    assert_eq!(notifier.phase(handle), Some(Phase::Removed));

    let removed_at = notifier
        .drain_transitions()
        .into_iter()
        .find(|t| t.kind == TransitionKind::Removed)
        .map(|t| t.at);
    assert_eq!(removed_at, Some(Millis(created + 5_300)));
}

#[test]
fn test_single_large_jump_keeps_exact_timestamps() {
    let mut notifier = Notifier::default();
    let handle = notifier.notify("Hello", NotificationKind::Error, Millis(1_000));

    notifier.advance_to(Millis(60_000));

    let transitions = notifier.drain_transitions();
    let stamps: Vec<(TransitionKind, Millis)> = transitions.iter().map(|t| (t.kind, t.at)).collect();
    assert_eq!(
        stamps,
        vec![
            (TransitionKind::Shown, Millis(1_000)),
            (TransitionKind::Entered, Millis(1_100)),
            (TransitionKind::Dismissing(DismissReason::Timeout), Millis(6_000)),
            (TransitionKind::Removed, Millis(6_300)),
        ]
    );
    assert_eq!(notifier.phase(handle), Some(Phase::Removed));
    assert!(notifier.is_empty());
}

#[test]
fn test_immediate_dismiss_scenario() {
    init_tracing();
    let mut notifier = Notifier::default();
    let handle = notifier.notify("Booking confirmed", NotificationKind::Success, Millis(0));
    notifier.dismiss(handle, Millis(0));

    notifier.advance_to(Millis(20_000));

    let transitions = notifier.drain_transitions();
    assert_eq!(
        phases_of(&transitions, handle.id()),
        vec![
            TransitionKind::Shown,
            TransitionKind::Dismissing(DismissReason::Manual),
            TransitionKind::Removed,
        ]
    );
    assert_eq!(transitions.last().map(|t| t.at), Some(Millis(300)));
    assert_eq!(notifier.next_deadline(), None);
}

#[test]
fn test_double_dismiss_removes_once() {
    let mut notifier = Notifier::default();
    let handle = notifier.notify("Hi", NotificationKind::Success, Millis(0));

    assert!(notifier.dismiss(handle, Millis(1_000)));
    assert!(!notifier.dismiss(handle, Millis(1_100)));
    notifier.advance_to(Millis(1_300));

    let removals = notifier
        .drain_transitions()
        .iter()
        .filter(|t| t.kind == TransitionKind::Removed)
        .count();
    assert_eq!(removals, 1);
}

#[test]
fn test_dismiss_timer_does_not_restart_removal() {
    let mut notifier = Notifier::default();
    let handle = notifier.notify("Hi", NotificationKind::Success, Millis(0));

    // Dismissed shortly before the automatic deadline.
    notifier.dismiss(handle, Millis(4_900));
    notifier.advance_to(Millis(5_000));
    assert_eq!(notifier.phase(handle), Some(Phase::Dismissing));

    notifier.advance_to(Millis(5_200));
    assert_eq!(notifier.phase(handle), Some(Phase::Removed));

    let dismissals: Vec<_> = notifier
        .drain_transitions()
        .into_iter()
        .filter(|t| matches!(t.kind, TransitionKind::Dismissing(_)))
        .collect();
    assert_eq!(dismissals.len(), 1);
    assert_eq!(dismissals[0].kind, TransitionKind::Dismissing(DismissReason::Manual));
}

#[test]
fn test_stacked_notifications_are_independent() {
    let mut notifier = Notifier::default();
    let first = notifier.notify("first", NotificationKind::Success, Millis(0));
    let second = notifier.notify("second", NotificationKind::Error, Millis(1_000));
    let third = notifier.notify("third", NotificationKind::Success, Millis(2_000));

    assert_eq!(
        notifier.visible().map(|n| n.text().to_string()).collect::<Vec<_>>(),
        vec!["first", "second", "third"]
    );
    assert_eq!(notifier.stack_offset(third.id()), Some(2));

    notifier.dismiss(second, Millis(1_500));
    notifier.advance_to(Millis(1_800));
    assert_eq!(notifier.phase(second), Some(Phase::Removed));
    assert_eq!(notifier.phase(first), Some(Phase::Visible));
    assert_eq!(notifier.stack_offset(third.id()), Some(1));

    notifier.advance_to(Millis(5_300));
    assert_eq!(notifier.phase(first), Some(Phase::Removed));
    assert_eq!(notifier.phase(third), Some(Phase::Visible));

    notifier.advance_to(Millis(7_300));
    assert_eq!(notifier.phase(third), Some(Phase::Removed));
    assert!(notifier.is_empty());
}

#[test]
fn test_custom_timings() {
    let config = NotifierConfig {
        enter_delay_ms: 0,
        auto_dismiss_ms: 1_000,
        exit_transition_ms: 50,
    };
    let mut notifier = Notifier::new(config);
    let handle = notifier.notify("quick", NotificationKind::Success, Millis(0));

    notifier.advance_to(Millis(0));
    assert!(notifier.get(handle.id()).map(|n| n.has_entered()).unwrap_or(false));

    notifier.advance_to(Millis(1_049));
    assert_eq!(notifier.phase(handle), Some(Phase::Dismissing));
    notifier.advance_to(Millis(1_050));
    assert_eq!(notifier.phase(handle), Some(Phase::Removed));
}
