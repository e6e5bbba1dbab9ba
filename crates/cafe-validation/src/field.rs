// File: cafe-validation/src/field.rs
// Purpose: Single-field validation

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::email::is_valid_email;
use crate::phone::is_valid_phone;
use crate::rule::{FieldKind, FieldRule};

/// Why a field value was rejected. `Display` is the text shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
    #[error("This field is required")]
    Required,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a valid phone number")]
    InvalidPhone,
}

/// Outcome of validating one field
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<FieldError>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: None,
            error: None,
        }
    }

    pub fn invalid(error: FieldError) -> Self {
        Self {
            valid: false,
            message: Some(error.to_string()),
            error: Some(error),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl From<Result<(), FieldError>> for ValidationResult {
    fn from(result: Result<(), FieldError>) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(e) => Self::invalid(e),
        }
    }
}

/// One form control as read from the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,

    #[serde(default)]
    pub rule: FieldRule,

    #[serde(default)]
    pub value: String,
}

impl Field {
    pub fn new(name: impl Into<String>, rule: FieldRule, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rule,
            value: value.into(),
        }
    }
}

/// Check a raw value against a rule.
///
/// Empty values only fail when the field is required; the kind checks run
/// on non-empty trimmed values.
pub fn check_value(rule: &FieldRule, value: &str) -> Result<(), FieldError> {
    let value = value.trim();

    if value.is_empty() {
        return if rule.required {
            Err(FieldError::Required)
        } else {
            Ok(())
        };
    }

    match rule.kind {
        FieldKind::Email if !is_valid_email(value) => Err(FieldError::InvalidEmail),
        FieldKind::Tel if !is_valid_phone(value) => Err(FieldError::InvalidPhone),
        _ => Ok(()),
    }
}

/// Validate a single field. Never fails; invalid input is reported in the result.
pub fn validate_field(field: &Field) -> ValidationResult {
    let result = ValidationResult::from(check_value(&field.rule, &field.value));
    if let Some(error) = result.error {
        tracing::debug!(field = %field.name, ?error, "field rejected");
    }
    result
}
