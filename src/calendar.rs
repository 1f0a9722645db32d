use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Inclusive day-by-day iterator over a calendar date range.
///
/// Yields nothing when `start > end`, so range walks always terminate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRange {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for DayRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = if current < self.end {
            Some(current + Duration::days(1))
        } else {
            None
        };
        Some(current)
    }
}

/// Walk every calendar date from `start` to `end` inclusive.
pub fn days(start: NaiveDate, end: NaiveDate) -> DayRange {
    let next = if start <= end { Some(start) } else { None };
    DayRange { next, end }
}

/// Saturday and Sunday are rest days; the weekend is fixed.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Count calendar days from `start` to `end` inclusive (0 when start > end).
pub fn day_count(start: NaiveDate, end: NaiveDate) -> i64 {
    if start > end {
        return 0;
    }
    (end - start).num_days() + 1
}

/// Count non-weekend days in the inclusive range, ignoring holidays.
pub fn weekday_count(start: NaiveDate, end: NaiveDate) -> i64 {
    let mut count = 0;
    let mut current = start;

    while current <= end {
        if !is_weekend(current) {
            count += 1;
        }
        current = current + Duration::days(1);
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn day_range_is_inclusive_on_both_ends() {
        let collected: Vec<NaiveDate> = days(d(2024, 1, 1), d(2024, 1, 3)).collect();
        assert_eq!(collected, vec![d(2024, 1, 1), d(2024, 1, 2), d(2024, 1, 3)]);
    }

    #[test]
    fn day_range_is_empty_when_start_after_end() {
        assert_eq!(days(d(2024, 1, 10), d(2024, 1, 1)).count(), 0);
    }

    #[test]
    fn day_range_restarts_from_a_clone() {
        let range = days(d(2024, 1, 1), d(2024, 1, 5));
        assert_eq!(range.clone().count(), 5);
        assert_eq!(range.count(), 5);
    }

    #[test]
    fn weekend_covers_saturday_and_sunday_only() {
        // 2024-01-06 is a Saturday, 2024-01-07 a Sunday
        assert!(is_weekend(d(2024, 1, 6)));
        assert!(is_weekend(d(2024, 1, 7)));
        assert!(!is_weekend(d(2024, 1, 5)));
        assert!(!is_weekend(d(2024, 1, 8)));
    }

    #[test]
    fn weekday_count_skips_weekends() {
        // 2024-01-01 is a Monday; two full weeks hold ten weekdays
        assert_eq!(weekday_count(d(2024, 1, 1), d(2024, 1, 14)), 10);
    }

    #[test]
    fn day_count_is_inclusive_and_zero_for_reversed_ranges() {
        assert_eq!(day_count(d(2024, 1, 1), d(2024, 1, 28)), 28);
        assert_eq!(day_count(d(2024, 1, 1), d(2024, 1, 1)), 1);
        assert_eq!(day_count(d(2024, 1, 2), d(2024, 1, 1)), 0);
    }
}
