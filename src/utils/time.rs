use chrono::{Datelike, Days, Duration, NaiveDate, Weekday};

/// This is the standard way of converting a date to a string in inner-tracker.
pub fn date_to_record_name(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Monday of the week `date` belongs to. The first days of the calendar have no Monday before
/// them and stay as they are.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(date.weekday().num_days_from_monday() as u64))
        .unwrap_or(date)
}

/// Moves a week start by `delta` whole weeks. The result is normalized in case a non-Monday
/// date is passed in. `None` when the result falls outside of the calendar chrono supports.
pub fn shift_week_start(start: NaiveDate, delta: i64) -> Option<NaiveDate> {
    let delta = Duration::try_weeks(delta)?;
    week_start(start).checked_add_signed(delta)
}

/// Days of a tracked week in storage order.
pub const WEEK_DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{date_to_record_name, shift_week_start, week_start};

    #[test]
    fn test_week_start_is_monday() {
        // 2025-03-13 is a Thursday
        let date = NaiveDate::from_ymd_opt(2025, 3, 13).unwrap();
        assert_eq!(week_start(date), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        let sunday = NaiveDate::from_ymd_opt(2025, 3, 16).unwrap();
        assert_eq!(week_start(sunday), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        let monday = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(week_start(monday), monday);
    }

    #[test]
    fn test_shift_crosses_year() {
        let start = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        assert_eq!(shift_week_start(start, 1), NaiveDate::from_ymd_opt(2025, 1, 6));
        assert_eq!(shift_week_start(start, -1), NaiveDate::from_ymd_opt(2024, 12, 23));
        assert_eq!(date_to_record_name(start), "2024-12-30");
    }

    #[test]
    fn test_shift_outside_calendar() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(shift_week_start(start, 100_000_000), None);
        assert_eq!(shift_week_start(start, -100_000_000), None);
        assert_eq!(shift_week_start(start, i64::MAX), None);
        assert_eq!(shift_week_start(start, i64::MIN), None);
    }

    #[test]
    fn test_week_start_at_calendar_edge() {
        let start = week_start(NaiveDate::MIN);
        assert_eq!(week_start(start), start);
    }
}
