use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

/// What a free-text message turned out to be when read as a drink date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput {
    /// Not shaped like `YYYY-MM-DD`; the bot stays quiet.
    NotADate,
    /// Shaped like a date but no such day exists, e.g. `2025-13-40`.
    Invalid,
    /// A real calendar day.
    Valid(NaiveDate),
}

// ASCII digits only; `\d` would also accept other Unicode digit scripts.
#[allow(clippy::expect_used)]
fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern is a valid regex")
    })
}

/// True when the text is four digits, hyphen, two digits, hyphen, two digits.
pub fn is_date_shaped(text: &str) -> bool {
    date_pattern().is_match(text)
}

/// Classifies text as not-a-date, an impossible date or a real one.
pub fn parse_drink_date(text: &str) -> DateInput {
    if !is_date_shaped(text) {
        return DateInput::NotADate;
    }

    match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        Ok(date) => DateInput::Valid(date),
        Err(_) => DateInput::Invalid,
    }
}
