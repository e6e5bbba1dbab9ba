// File: cafe-validation/src/rule.rs
// Purpose: Per-field validation rules derived from control metadata

use serde::{Deserialize, Serialize};

/// What kind of value a control holds, as far as validation cares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    /// Selects, textareas and every input type without a pattern check
    #[default]
    #[serde(other)]
    Other,
}

impl FieldKind {
    /// Map an HTML `type` attribute to a kind
    ///
    /// # Examples
    /// ```
    /// use cafe_validation::FieldKind;
    /// assert_eq!(FieldKind::from_input_type("email"), FieldKind::Email);
    /// assert_eq!(FieldKind::from_input_type("TEL"), FieldKind::Tel);
    /// assert_eq!(FieldKind::from_input_type("date"), FieldKind::Other);
    /// ```
    pub fn from_input_type(input_type: &str) -> Self {
        let input_type = input_type.trim();
        if input_type.eq_ignore_ascii_case("text") {
            FieldKind::Text
        } else if input_type.eq_ignore_ascii_case("email") {
            FieldKind::Email
        } else if input_type.eq_ignore_ascii_case("tel") {
            FieldKind::Tel
        } else {
            FieldKind::Other
        }
    }
}

/// The constraint bound to a single form control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldRule {
    #[serde(default)]
    pub required: bool,

    #[serde(default, alias = "type")]
    pub kind: FieldKind,
}

impl FieldRule {
    pub fn new(required: bool, kind: FieldKind) -> Self {
        Self { required, kind }
    }

    /// Build a rule from the `required` and `type` attributes of a control
    pub fn from_attrs(required: bool, input_type: Option<&str>) -> Self {
        let kind = input_type.map(FieldKind::from_input_type).unwrap_or_default();
        Self { required, kind }
    }

    pub fn required(kind: FieldKind) -> Self {
        Self::new(true, kind)
    }

    pub fn optional(kind: FieldKind) -> Self {
        Self::new(false, kind)
    }
}
