//! Pure validators for the intake form plus the exit-keyword check.
//!
//! No I/O, no state. The screening handlers apply these in a fixed order and
//! surface the first failure as the single error message.

use once_cell::sync::Lazy;
use regex::Regex;

/// Typed into the free-text listener, any of these ends the session early.
pub const EXIT_KEYWORDS: &[&str] = &["bye", "exit", "quit"];

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+$").expect("email regex compiles"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?\d{10,15}$").expect("phone regex compiles"));

/// Minimal `local@domain.tld` shape check, anchored to the full string.
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Optional leading `+` followed by 10-15 digits, nothing else.
pub fn validate_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// Years of experience must parse as a number >= 0.
pub fn validate_years(years: &str) -> bool {
    years
        .trim()
        .parse::<f64>()
        .map(|v| v >= 0.0)
        .unwrap_or(false)
}

/// Splits comma-separated text into trimmed, non-empty entries, order kept.
pub fn sanitize_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// True when the trimmed, lowercased message is one of [`EXIT_KEYWORDS`].
pub fn is_exit_keyword(message: &str) -> bool {
    let normalized = message.trim().to_lowercase();
    EXIT_KEYWORDS.contains(&normalized.as_str())
}
