//! Widget and pattern detection for string values.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

static URL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://").unwrap());

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").unwrap());

static DATE_PREFIX_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}").unwrap());

static CODE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{2,3}[0-9]{4,}$").unwrap());

/// Strings longer than this are suggested a multi-line input.
const LONG_TEXT_CHARS: usize = 100;

/// Suggested form input type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Widget {
    #[default]
    Text,
    Textarea,
    Email,
    Url,
    Tel,
    Date,
    Checkbox,
    Number,
    Array,
}

/// Semantic pattern recognised in a string value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    Email,
    Url,
    Phone,
    Date,
    Code,
}

/// Suggest a widget for a string value. First matching rule wins.
pub fn detect_widget(value: &str) -> Widget {
    if EMAIL_REGEX.is_match(value) {
        Widget::Email
    } else if URL_REGEX.is_match(value) {
        Widget::Url
    } else if PHONE_REGEX.is_match(value) {
        Widget::Tel
    } else if DATE_PREFIX_REGEX.is_match(value) {
        Widget::Date
    } else if value.chars().count() > LONG_TEXT_CHARS {
        Widget::Textarea
    } else {
        Widget::Text
    }
}

/// Detect a named pattern, checked independently of widget detection.
pub fn detect_pattern(value: &str) -> Option<PatternKind> {
    let table: [(&Lazy<Regex>, PatternKind); 5] = [
        (&EMAIL_REGEX, PatternKind::Email),
        (&URL_REGEX, PatternKind::Url),
        (&PHONE_REGEX, PatternKind::Phone),
        (&DATE_PREFIX_REGEX, PatternKind::Date),
        (&CODE_REGEX, PatternKind::Code),
    ];

    table
        .iter()
        .find(|(regex, _)| regex.is_match(value))
        .map(|(_, kind)| *kind)
}
