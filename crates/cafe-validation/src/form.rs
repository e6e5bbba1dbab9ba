// File: cafe-validation/src/form.rs
// Purpose: Whole-form validation

use serde::Serialize;

use crate::field::{validate_field, Field, ValidationResult};

/// One result per field, in the order the fields were given
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FormReport {
    pub results: Vec<(String, ValidationResult)>,
}

impl FormReport {
    /// True when every field passed
    pub fn is_valid(&self) -> bool {
        self.results.iter().all(|(_, r)| r.valid)
    }

    /// Names and messages of the fields that failed
    pub fn errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.results.iter().filter_map(|(name, r)| {
            r.message.as_deref().map(|message| (name.as_str(), message))
        })
    }

    pub fn invalid_fields(&self) -> Vec<String> {
        self.errors().map(|(name, _)| name.to_string()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&ValidationResult> {
        self.results
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, r)| r)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Validate every field. Keeps going after the first failure so each
/// invalid field gets its own message.
pub fn validate_all<'a, I>(fields: I) -> FormReport
where
    I: IntoIterator<Item = &'a Field>,
{
    let results = fields
        .into_iter()
        .map(|field| (field.name.clone(), validate_field(field)))
        .collect();
    FormReport { results }
}

/// True iff every field validates
pub fn validate_form<'a, I>(fields: I) -> bool
where
    I: IntoIterator<Item = &'a Field>,
{
    validate_all(fields).is_valid()
}
