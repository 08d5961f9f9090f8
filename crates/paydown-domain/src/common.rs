//! Shared cadence enum and calendar arithmetic for debt scheduling.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Enumerates the repayment cadences a debt can carry.
pub enum Frequency {
    OneTime,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Number of payment periods in a calendar year; `None` for one-shot debts.
    pub fn periods_per_year(self) -> Option<u32> {
        match self {
            Frequency::OneTime => None,
            Frequency::Weekly => Some(52),
            Frequency::Monthly => Some(12),
            Frequency::Yearly => Some(1),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::OneTime => "one-time",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "one-time" | "onetime" | "once" => Some(Frequency::OneTime),
            "weekly" => Some(Frequency::Weekly),
            "monthly" => Some(Frequency::Monthly),
            "yearly" => Some(Frequency::Yearly),
            _ => None,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Frequency::OneTime => "One-time",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
            Frequency::Yearly => "Yearly",
        };
        f.write_str(label)
    }
}

/// Formats the `YYYY-MM` key used for per-month payment status rows.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Count of whole calendar months from `start` to `end`.
///
/// A month only counts once the day-of-month has been reached, so
/// Jan 31 → Feb 28 spans zero whole months.
pub fn whole_months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let span =
        (end.year() - start.year()) as i64 * 12 + end.month() as i64 - start.month() as i64;
    if end.day() < start.day() {
        span - 1
    } else {
        span
    }
}

/// Count of whole seven-day weeks from `start` to `end`.
pub fn whole_weeks_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() / 7
}

/// Count of whole years from `start` to `end`, anniversary-based.
pub fn whole_years_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let mut span = (end.year() - start.year()) as i64;
    if (end.month(), end.day()) < (start.month(), start.day()) {
        span -= 1;
    }
    span
}

/// First day of the month following `date`.
pub fn first_of_following_month(date: NaiveDate) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    shift_month(first, 1)
}

/// Shifts `date` by `months`, clamping the day to the target month's length.
pub fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_key_is_zero_padded() {
        assert_eq!(month_key(date(2025, 3, 9)), "2025-03");
        assert_eq!(month_key(date(2025, 11, 30)), "2025-11");
    }

    #[test]
    fn whole_months_require_the_day_to_be_reached() {
        assert_eq!(whole_months_between(date(2025, 1, 1), date(2025, 7, 1)), 6);
        assert_eq!(whole_months_between(date(2025, 1, 15), date(2025, 7, 14)), 5);
        assert_eq!(whole_months_between(date(2025, 1, 31), date(2025, 2, 28)), 0);
        assert_eq!(whole_months_between(date(2024, 11, 1), date(2025, 2, 1)), 3);
    }

    #[test]
    fn whole_weeks_round_down() {
        assert_eq!(whole_weeks_between(date(2025, 1, 1), date(2025, 1, 15)), 2);
        assert_eq!(whole_weeks_between(date(2025, 1, 1), date(2025, 1, 14)), 1);
    }

    #[test]
    fn whole_years_are_anniversary_based() {
        assert_eq!(whole_years_between(date(2023, 6, 15), date(2026, 6, 15)), 3);
        assert_eq!(whole_years_between(date(2023, 6, 15), date(2026, 6, 14)), 2);
    }

    #[test]
    fn shift_month_clamps_to_month_length() {
        assert_eq!(shift_month(date(2025, 1, 31), 1), date(2025, 2, 28));
        assert_eq!(shift_month(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(shift_month(date(2025, 12, 10), 1), date(2026, 1, 10));
        assert_eq!(shift_month(date(2025, 1, 10), -1), date(2024, 12, 10));
    }

    #[test]
    fn first_of_following_month_crosses_year_end() {
        assert_eq!(first_of_following_month(date(2025, 12, 20)), date(2026, 1, 1));
        assert_eq!(first_of_following_month(date(2025, 4, 1)), date(2025, 5, 1));
    }

    #[test]
    fn frequency_round_trips_through_labels() {
        for freq in [
            Frequency::OneTime,
            Frequency::Weekly,
            Frequency::Monthly,
            Frequency::Yearly,
        ] {
            assert_eq!(Frequency::parse(freq.as_str()), Some(freq));
        }
        assert_eq!(Frequency::parse("fortnightly"), None);
    }
}
