// File: cafe-site/src/booking.rs
// Purpose: Booking form submission, from validation to notification

use cafe_notify::{Millis, NotificationHandle, Notifier};
use cafe_validation::{AnnotationChange, Field, FormSession, SubmitOutcome};

use crate::messages::SiteMessage;

/// What a submission produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingOutcome {
    pub outcome: SubmitOutcome,
    /// Inline error changes to render
    pub annotations: Vec<AnnotationChange>,
    /// The success or failure notification that was raised
    pub notification: NotificationHandle,
}

impl BookingOutcome {
    /// Whether the caller should reset the form
    pub fn accepted(&self) -> bool {
        self.outcome.is_accepted()
    }
}

/// The booking form: field annotations plus the submit pipeline
#[derive(Debug, Default)]
pub struct BookingDesk {
    session: FormSession,
}

impl BookingDesk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    /// A control lost focus
    pub fn blur(&mut self, field: &Field) -> AnnotationChange {
        self.session.blur(field).1
    }

    /// A control's value changed
    pub fn input(&mut self, name: &str) -> AnnotationChange {
        self.session.input(name)
    }

    /// Validate every field and raise the matching notification
    pub fn submit<'a, I>(&mut self, fields: I, notifier: &mut Notifier, now: Millis) -> BookingOutcome
    where
        I: IntoIterator<Item = &'a Field>,
    {
        let (_, annotations, outcome) = self.session.submit(fields);

        let message = if outcome.is_accepted() {
            SiteMessage::BookingConfirmed
        } else {
            SiteMessage::BookingRejected
        };
        let notification = notifier.notify(message.text(), message.kind(), now);

        tracing::info!(accepted = outcome.is_accepted(), "booking submitted");

        BookingOutcome {
            outcome,
            annotations,
            notification,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafe_notify::NotificationKind;
    use cafe_validation::{FieldKind, FieldRule};
    use pretty_assertions::assert_eq;

    fn form(email: &str) -> Vec<Field> {
        vec![
            Field::new("name", FieldRule::required(FieldKind::Text), "Ada"),
            Field::new("email", FieldRule::required(FieldKind::Email), email),
        ]
    }

    #[test]
    fn test_accepted_booking_shows_success() {
        let mut desk = BookingDesk::new();
        let mut notifier = Notifier::default();

        let outcome = desk.submit(&form("ada@example.com"), &mut notifier, Millis(0));

        assert!(outcome.accepted());
        let shown = notifier.get(outcome.notification.id()).map(|n| n.kind());
        assert_eq!(shown, Some(NotificationKind::Success));
    }

    #[test]
    fn test_rejected_booking_shows_error_and_annotations() {
        let mut desk = BookingDesk::new();
        let mut notifier = Notifier::default();

        let outcome = desk.submit(&form("nope"), &mut notifier, Millis(0));

        assert!(!outcome.accepted());
        assert_eq!(
            outcome.annotations,
            vec![AnnotationChange::Set {
                name: "email".to_string(),
                message: "Please enter a valid email address".to_string(),
            }]
        );
        let shown = notifier
            .get(outcome.notification.id())
            .map(|n| (n.kind(), n.text().to_string()));
        assert_eq!(
            shown,
            Some((NotificationKind::Error, "Please correct the errors above".to_string()))
        );
    }
}
