//! Integration tests for the page flow
//!
//! A visitor fills the booking form, fixes their mistakes and books, while
//! product and blog clicks raise their own notifications on the same stack.

use cafe_notify::{Millis, NotificationKind, Notifier, Phase, TransitionKind};
use cafe_site::*;
use cafe_validation::{AnnotationChange, Field, FieldRule, SubmitOutcome};
use pretty_assertions::assert_eq;

fn booking_form(name: &str, email: &str, phone: &str) -> Vec<Field> {
    vec![
        Field::new("name", FieldRule::from_attrs(true, Some("text")), name),
        Field::new("email", FieldRule::from_attrs(true, Some("email")), email),
        Field::new("phone", FieldRule::from_attrs(true, Some("tel")), phone),
        Field::new("guests", FieldRule::from_attrs(true, None), "2"),
    ]
}

#[test]
fn test_visitor_corrects_form_then_books() {
    let config = SiteConfig::default();
    let mut notifier = cafe_notify::Notifier::new(config.notifications);
    let mut desk = BookingDesk::new();

    // First attempt: two mistakes, both annotated, error toast shown.
    let first = desk.submit(&booking_form("", "ada@", "+44 20 7946 0958"), &mut notifier, Millis(0));
    assert_eq!(
        first.outcome,
        SubmitOutcome::Rejected {
            invalid: vec!["name".to_string(), "email".to_string()],
        }
    );
    assert_eq!(first.annotations.len(), 2);
    assert_eq!(
        notifier.get(first.notification.id()).map(|n| n.kind()),
        Some(NotificationKind::Error)
    );

    // Typing into a field clears its annotation only.
    assert_eq!(
        desk.input("name"),
        AnnotationChange::Cleared { name: "name".to_string() }
    );
    assert_eq!(desk.session().annotation("email"), Some("Please enter a valid email address"));

    // Blurring a corrected field clears the other annotation.
    let fixed = Field::new("email", FieldRule::from_attrs(true, Some("email")), "ada@example.com");
    assert_eq!(
        desk.blur(&fixed),
        AnnotationChange::Cleared { name: "email".to_string() }
    );

    // Second attempt succeeds while the error toast is still on screen.
    let second = desk.submit(
        &booking_form("Ada", "ada@example.com", "+44 20 7946 0958"),
        &mut notifier,
        Millis(1_000),
    );
    assert!(second.accepted());
    assert_eq!(notifier.len(), 2);

    // Each toast leaves on its own schedule.
    notifier.advance_to(Millis(5_300));
    assert_eq!(notifier.phase(first.notification), Some(Phase::Removed));
    assert_eq!(notifier.phase(second.notification), Some(Phase::Visible));
    notifier.advance_to(Millis(6_000));
    assert_eq!(notifier.phase(second.notification), Some(Phase::Dismissing));
    notifier.advance_to(Millis(6_300));
    assert!(notifier.is_empty());
}

#[test]
fn test_product_and_blog_clicks_share_the_stack() {
    let mut notifier = Notifier::default();

    let order = SiteMessage::product_action("Cappuccino", "ORDER NOW");
    let cart = SiteMessage::product_action("Espresso", "ADD TO CART");
    let blog = SiteMessage::blog_preview("The art of latte");

    let handles: Vec<_> = [order, cart, blog]
        .iter()
        .enumerate()
        .map(|(i, m)| notifier.notify(m.text(), m.kind(), Millis(i as u64 * 10)))
        .collect();

    let texts: Vec<String> = notifier.visible().map(|n| n.text().to_string()).collect();
    assert_eq!(
        texts,
        vec![
            "Great choice! Cappuccino order process initiated. Redirecting to checkout...".to_string(),
            "Espresso has been added to your cart!".to_string(),
            "Opening blog post: \"The art of latte\". This would normally navigate to the full article.".to_string(),
        ]
    );

    // Closing the middle one leaves the others untouched.
    notifier.dismiss(handles[1], Millis(50));
    notifier.advance_to(Millis(350));
    assert_eq!(notifier.phase(handles[0]), Some(Phase::Visible));
    assert_eq!(notifier.phase(handles[1]), Some(Phase::Removed));
    assert_eq!(notifier.phase(handles[2]), Some(Phase::Visible));

    let removed: Vec<_> = notifier
        .drain_transitions()
        .into_iter()
        .filter(|t| t.kind == TransitionKind::Removed)
        .map(|t| (t.id, t.at))
        .collect();
    assert_eq!(removed, vec![(handles[1].id(), Millis(350))]);
}

#[test]
fn test_configured_timings_flow_into_notifier() {
    let config = SiteConfig::from_toml_str(
        r#"
        [notifications]
        auto_dismiss_ms = 2000
        exit_transition_ms = 100
        "#,
    )
    .unwrap();

    let mut notifier = Notifier::new(config.notifications);
    let handle = notifier.notify("short", NotificationKind::Success, Millis(0));
    notifier.advance_to(Millis(2_099));
    assert_eq!(notifier.phase(handle), Some(Phase::Dismissing));
    notifier.advance_to(Millis(2_100));
    assert_eq!(notifier.phase(handle), Some(Phase::Removed));
}
