//! Cafe Validation
//!
//! Field rules for the booking form and the pipeline that runs them.
//! Pure Rust with no DOM access: the browser adapter reads the controls,
//! hands their values here and renders whatever comes back.

pub mod email;
pub mod phone;
pub mod rule;
pub mod field;
pub mod form;
pub mod session;

pub use email::is_valid_email;
pub use phone::is_valid_phone;
pub use rule::{FieldKind, FieldRule};
pub use field::{validate_field, Field, FieldError, ValidationResult};
pub use form::{validate_all, validate_form, FormReport};
pub use session::{AnnotationChange, FormSession, SubmitOutcome};
