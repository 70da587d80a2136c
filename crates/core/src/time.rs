use chrono::{DateTime, Duration, Utc};

/// Wall clock used for relative timestamps; fixed in tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Move a fixed clock forward. No effect on `Clock::System`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }

    /// Human label for `then` relative to this clock's current time.
    #[must_use]
    pub fn relative(&self, then: DateTime<Utc>) -> String {
        relative_time(then, self.now())
    }
}

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const MONTH: u64 = 30 * DAY;
const YEAR: u64 = 365 * DAY;

/// Formats the distance between `then` and `now` as "5 minutes ago" or
/// "in 2 days".
///
/// Each unit is rounded before its threshold is checked: up to 44 seconds is
/// "a few seconds", up to 89 seconds "a minute", up to 44 minutes counts in
/// minutes, and so on up to years.
#[must_use]
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = now.signed_duration_since(then).num_seconds();
    let phrase = relative_phrase(secs.unsigned_abs());
    if secs < 0 {
        format!("in {phrase}")
    } else {
        format!("{phrase} ago")
    }
}

fn relative_phrase(secs: u64) -> String {
    let round = |unit: u64| (secs + unit / 2) / unit;

    if secs <= 44 {
        return "a few seconds".to_owned();
    }
    if secs <= 89 {
        return "a minute".to_owned();
    }
    let minutes = round(MINUTE);
    if minutes <= 44 {
        return format!("{} minutes", minutes.max(2));
    }
    if minutes <= 89 {
        return "an hour".to_owned();
    }
    let hours = round(HOUR);
    if hours <= 21 {
        return format!("{} hours", hours.max(2));
    }
    if hours <= 35 {
        return "a day".to_owned();
    }
    let days = round(DAY);
    if days <= 25 {
        return format!("{} days", days.max(2));
    }
    if days <= 45 {
        return "a month".to_owned();
    }
    let months = round(MONTH);
    if months <= 10 {
        return format!("{} months", months.max(2));
    }
    if months <= 17 {
        return "a year".to_owned();
    }
    format!("{} years", round(YEAR).max(2))
}

/// Deterministic timestamp for tests and examples (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests and doc examples.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}
