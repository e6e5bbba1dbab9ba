// File: cafe-validation/src/session.rs
// Purpose: Inline error annotations for a live form and the submit pipeline

use std::collections::BTreeMap;

use crate::field::{validate_field, Field, ValidationResult};
use crate::form::{validate_all, FormReport};

/// What the presenter has to do with a field's inline error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationChange {
    /// Show (or replace) the message under the field
    Set { name: String, message: String },
    /// Remove the message under the field
    Cleared { name: String },
    /// Nothing to redraw
    Unchanged,
}

/// Result of submitting the whole form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Every field passed. The caller resets the form.
    Accepted,
    /// At least one field failed; each one is annotated.
    Rejected { invalid: Vec<String> },
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted)
    }
}

/// Annotation state for one form.
///
/// An annotation appears when a field fails validation (on blur or submit)
/// and disappears the next time that field's value changes.
#[derive(Debug, Clone, Default)]
pub struct FormSession {
    annotations: BTreeMap<String, String>,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The field lost focus: validate it and update its annotation.
    pub fn blur(&mut self, field: &Field) -> (ValidationResult, AnnotationChange) {
        let result = validate_field(field);
        let change = self.apply(&field.name, &result);
        (result, change)
    }

    /// The field's value changed: drop any annotation it has.
    pub fn input(&mut self, name: &str) -> AnnotationChange {
        match self.annotations.remove(name) {
            Some(_) => AnnotationChange::Cleared {
                name: name.to_string(),
            },
            None => AnnotationChange::Unchanged,
        }
    }

    /// Validate every field and annotate each failure.
    ///
    /// Returns the per-field report, the annotation changes to render and the
    /// overall outcome. On acceptance every annotation is cleared since the
    /// form is about to be reset.
    pub fn submit<'a, I>(&mut self, fields: I) -> (FormReport, Vec<AnnotationChange>, SubmitOutcome)
    where
        I: IntoIterator<Item = &'a Field>,
    {
        let report = validate_all(fields);
        let mut changes = Vec::new();

        for (name, result) in &report.results {
            let change = self.apply(name, result);
            if change != AnnotationChange::Unchanged {
                changes.push(change);
            }
        }

        let outcome = if report.is_valid() {
            changes.extend(self.clear());
            SubmitOutcome::Accepted
        } else {
            SubmitOutcome::Rejected {
                invalid: report.invalid_fields(),
            }
        };

        tracing::debug!(?outcome, fields = report.len(), "form submitted");
        (report, changes, outcome)
    }

    /// Remove every annotation, e.g. after the form is reset.
    pub fn clear(&mut self) -> Vec<AnnotationChange> {
        std::mem::take(&mut self.annotations)
            .into_keys()
            .map(|name| AnnotationChange::Cleared { name })
            .collect()
    }

    pub fn annotation(&self, name: &str) -> Option<&str> {
        self.annotations.get(name).map(String::as_str)
    }

    pub fn annotations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.annotations
            .iter()
            .map(|(name, message)| (name.as_str(), message.as_str()))
    }

    pub fn has_errors(&self) -> bool {
        !self.annotations.is_empty()
    }

    fn apply(&mut self, name: &str, result: &ValidationResult) -> AnnotationChange {
        match &result.message {
            Some(message) => {
                let previous = self.annotations.insert(name.to_string(), message.clone());
                if previous.as_deref() == Some(message.as_str()) {
                    AnnotationChange::Unchanged
                } else {
                    AnnotationChange::Set {
                        name: name.to_string(),
                        message: message.clone(),
                    }
                }
            }
            None => match self.annotations.remove(name) {
                Some(_) => AnnotationChange::Cleared {
                    name: name.to_string(),
                },
                None => AnnotationChange::Unchanged,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{FieldKind, FieldRule};
    use pretty_assertions::assert_eq;

    fn email(value: &str) -> Field {
        Field::new("email", FieldRule::required(FieldKind::Email), value)
    }

    #[test]
    fn test_blur_sets_annotation() {
        let mut session = FormSession::new();
        let (result, change) = session.blur(&email("bad"));

        assert!(!result.valid);
        assert_eq!(
            change,
            AnnotationChange::Set {
                name: "email".to_string(),
                message: "Please enter a valid email address".to_string(),
            }
        );
        assert_eq!(session.annotation("email"), Some("Please enter a valid email address"));
    }

    #[test]
    fn test_blur_same_error_twice_is_unchanged() {
        let mut session = FormSession::new();
        session.blur(&email(""));
        let (_, change) = session.blur(&email(""));
        assert_eq!(change, AnnotationChange::Unchanged);
    }

    #[test]
    fn test_blur_replaces_message() {
        let mut session = FormSession::new();
        session.blur(&email(""));
        let (_, change) = session.blur(&email("bad"));
        assert!(matches!(change, AnnotationChange::Set { .. }));
        assert_eq!(session.annotation("email"), Some("Please enter a valid email address"));
    }

    #[test]
    fn test_blur_valid_clears() {
        let mut session = FormSession::new();
        session.blur(&email("bad"));
        let (_, change) = session.blur(&email("a@b.com"));
        assert_eq!(change, AnnotationChange::Cleared { name: "email".to_string() });
        assert!(!session.has_errors());
    }

    #[test]
    fn test_input_clears_only_that_field() {
        let mut session = FormSession::new();
        session.blur(&email(""));
        session.blur(&Field::new("name", FieldRule::required(FieldKind::Text), ""));

        assert_eq!(session.input("email"), AnnotationChange::Cleared { name: "email".to_string() });
        assert_eq!(session.input("email"), AnnotationChange::Unchanged);
        assert_eq!(session.annotation("name"), Some("This field is required"));
    }

    #[test]
    fn test_submit_annotates_every_invalid_field() {
        let mut session = FormSession::new();
        let fields = vec![
            Field::new("name", FieldRule::required(FieldKind::Text), ""),
            email("nope"),
            Field::new("phone", FieldRule::optional(FieldKind::Tel), "+1 234 5678"),
        ];

        let (report, changes, outcome) = session.submit(&fields);

        assert_eq!(report.len(), 3);
        assert_eq!(changes.len(), 2);
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                invalid: vec!["name".to_string(), "email".to_string()],
            }
        );
        assert_eq!(session.annotations().count(), 2);
    }

    #[test]
    fn test_submit_accepted_clears_everything() {
        let mut session = FormSession::new();
        session.blur(&email("bad"));

        let fields = vec![email("a@b.com")];
        let (_, changes, outcome) = session.submit(&fields);

        assert!(outcome.is_accepted());
        assert_eq!(changes, vec![AnnotationChange::Cleared { name: "email".to_string() }]);
        assert!(!session.has_errors());
    }
}
