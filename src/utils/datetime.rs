use chrono::{DateTime, NaiveDate, Utc};

/// A calendar date read as midnight UTC, the way the streak is anchored.
pub fn start_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

/// Whole days elapsed from `since` to `now`, rounded towards negative infinity.
///
/// A `since` in the future yields a negative count.
pub fn whole_days_between(since: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (now - since).num_milliseconds();
    millis.div_euclid(MILLIS_PER_DAY)
}

/// `YYYY-MM-DD` for logs.
pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;
