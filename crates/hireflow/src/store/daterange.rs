use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// An inclusive timestamp window used to scope dashboard and report queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Window covering whole calendar days from `start` through `end`,
    /// inclusive of the final second of `end`.
    pub fn days(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: start_of_day(start),
            end: end_of_day(end),
        }
    }

    /// Trailing window of `days` calendar days ending at `end`.
    pub fn trailing_days(days: i64, end: DateTime<Utc>) -> Self {
        Self {
            start: end - Duration::days(days),
            end,
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at <= self.end
    }

    /// The window of equal length immediately before this one, used for
    /// period-over-period deltas in reports.
    pub fn preceding(&self) -> Self {
        let span = self.end - self.start;
        let end = self.start - Duration::seconds(1);
        Self { start: end - span, end }
    }
}

/// Reporting periods offered by the dashboard period selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportPeriod {
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
}

impl ReportPeriod {
    /// Resolve the period relative to `today`. Weeks start on Monday.
    pub fn range_for(self, today: NaiveDate) -> DateRange {
        match self {
            ReportPeriod::ThisWeek => {
                let monday = today.week(Weekday::Mon).first_day();
                DateRange::days(monday, today)
            }
            ReportPeriod::LastWeek => {
                let monday = today.week(Weekday::Mon).first_day() - Duration::days(7);
                DateRange::days(monday, monday + Duration::days(6))
            }
            ReportPeriod::ThisMonth => DateRange::days(first_of_month(today), today),
            ReportPeriod::LastMonth => {
                let this_month = first_of_month(today);
                let last_day = this_month - Duration::days(1);
                DateRange::days(first_of_month(last_day), last_day)
            }
        }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("day 1 exists in every month")
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date) + Duration::days(1) - Duration::seconds(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn contains_is_inclusive_on_both_ends() {
        let range = DateRange::days(date(2026, 8, 1), date(2026, 8, 31));
        assert!(range.contains(range.start));
        assert!(range.contains(range.end));
        assert!(!range.contains(range.end + Duration::seconds(1)));
    }

    #[test]
    fn this_week_starts_on_monday() {
        // 2026-08-27 is a Thursday; its week starts Monday the 24th.
        let range = ReportPeriod::ThisWeek.range_for(date(2026, 8, 27));
        assert_eq!(range.start, start_of_day(date(2026, 8, 24)));
        assert_eq!(range.end, end_of_day(date(2026, 8, 27)));
    }

    #[test]
    fn last_week_covers_monday_through_sunday() {
        let range = ReportPeriod::LastWeek.range_for(date(2026, 8, 27));
        assert_eq!(range.start, start_of_day(date(2026, 8, 17)));
        assert_eq!(range.end, end_of_day(date(2026, 8, 23)));
    }

    #[test]
    fn last_month_handles_january() {
        let range = ReportPeriod::LastMonth.range_for(date(2026, 1, 15));
        assert_eq!(range.start, start_of_day(date(2025, 12, 1)));
        assert_eq!(range.end, end_of_day(date(2025, 12, 31)));
    }

    #[test]
    fn preceding_window_has_equal_length() {
        let range = DateRange::days(date(2026, 8, 1), date(2026, 8, 31));
        let prev = range.preceding();
        assert_eq!(range.end - range.start, prev.end - prev.start);
        assert!(prev.end < range.start);
    }
}
