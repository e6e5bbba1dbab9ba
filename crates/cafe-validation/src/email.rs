//! Email validation functions

use once_cell::sync::Lazy;
use regex::Regex;

// local@domain.tld: no whitespace or second '@' anywhere, at least one '.'
// somewhere after the '@' with text on both sides of it. Any other
// character is allowed, non-ASCII included.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()
});

/// Validates basic email format
///
/// The value is expected to be trimmed already; leading or trailing
/// whitespace makes it invalid.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}
