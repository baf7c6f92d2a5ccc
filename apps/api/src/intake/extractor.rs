//! Field extraction — pulls a structured value out of a free-text answer.
//!
//! Best effort only: every rule falls back to the trimmed input, except phone,
//! which keeps decimal digits (any script) and nothing else.

use std::sync::LazyLock;

use regex::Regex;

use crate::intake::models::FieldKind;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+\.?\d*").unwrap());

static NON_DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\D").unwrap());

/// Extracts the value for `field` from `input`. Never fails.
pub fn extract(input: &str, field: FieldKind) -> String {
    let input = input.trim();
    match field {
        FieldKind::Email => first_match(&EMAIL_RE, input),
        FieldKind::Phone => NON_DIGIT_RE.replace_all(input, "").into_owned(),
        FieldKind::Experience => first_match(&NUMBER_RE, input),
        FieldKind::Name | FieldKind::Position | FieldKind::TechStack => input.to_string(),
    }
}

fn first_match(re: &Regex, input: &str) -> String {
    re.find(input)
        .map(|m| m.as_str())
        .unwrap_or(input)
        .to_string()
}
