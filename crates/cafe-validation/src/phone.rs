//! Phone number validation functions

use once_cell::sync::Lazy;
use regex::Regex;

// Optional '+', then 1-16 ASCII digits, the first one nonzero.
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[1-9][0-9]{0,15}$").unwrap()
});

/// Removes every whitespace character, so "+1 234 5678" becomes "+12345678".
pub fn strip_whitespace(phone: &str) -> String {
    phone.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Validates a phone number after stripping whitespace
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(&strip_whitespace(phone))
}
