//! Calendar-date helpers shared by the grid, the index and the views.
//!
//! Weeks start on Sunday throughout and all text is English; there is no
//! locale handling.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::grid::ViewMode;

/// Column headings for month and week views.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// The current local calendar date.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Compare two values by year, month and day of month only.
pub fn is_same_day(a: &impl Datelike, b: &impl Datelike) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

/// Weekday number with Sunday = 0.
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// The Sunday on or before `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(weekday_index(date) as i64)
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// "Friday, March 15, 2024"
pub fn format_long(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// "Fri"
pub fn format_weekday_short(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

/// Heading shown above the grid for the given view.
pub fn header_title(anchor: NaiveDate, mode: ViewMode) -> String {
    match mode {
        ViewMode::Month => anchor.format("%B %Y").to_string(),
        ViewMode::Week => {
            let start = start_of_week(anchor);
            let end = start + Duration::days(6);
            format!(
                "{} - {}",
                start.format("%b %-d"),
                end.format("%B %-d, %Y")
            )
        }
        ViewMode::Day => format_long(anchor),
    }
}

/// Parse an `"HH:MM"` wall-clock string.
pub fn parse_wall_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

pub fn format_wall_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Combine a day and an `"HH:MM"` string into a local date-time.
pub fn combine(date: NaiveDate, wall_time: &str) -> Option<NaiveDateTime> {
    parse_wall_time(wall_time).map(|time| date.and_time(time))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_same_day_ignores_time() {
        let morning = date(2024, 3, 15).and_hms_opt(0, 5, 0).unwrap();
        let night = date(2024, 3, 15).and_hms_opt(23, 59, 0).unwrap();
        assert!(is_same_day(&morning, &night));
        assert!(is_same_day(&morning, &date(2024, 3, 15)));
        assert!(!is_same_day(&morning, &date(2023, 3, 15)));
    }

    #[test]
    fn test_weekday_index_is_sunday_first() {
        assert_eq!(weekday_index(date(2024, 3, 3)), 0);
        assert_eq!(weekday_index(date(2024, 3, 15)), 5);
        assert_eq!(weekday_index(date(2024, 3, 16)), 6);
    }

    #[test]
    fn test_start_of_week() {
        assert_eq!(start_of_week(date(2024, 3, 15)), date(2024, 3, 10));
        assert_eq!(start_of_week(date(2024, 3, 10)), date(2024, 3, 10));
        assert_eq!(start_of_week(date(2024, 1, 2)), date(2023, 12, 31));
    }

    #[test]
    fn test_header_titles() {
        let anchor = date(2024, 3, 15);
        assert_eq!(header_title(anchor, ViewMode::Month), "March 2024");
        assert_eq!(header_title(anchor, ViewMode::Week), "Mar 10 - March 16, 2024");
        assert_eq!(header_title(anchor, ViewMode::Day), "Friday, March 15, 2024");
    }

    #[test]
    fn test_week_title_across_year_end() {
        assert_eq!(
            header_title(date(2025, 1, 1), ViewMode::Week),
            "Dec 29 - January 4, 2025"
        );
    }

    #[test]
    fn test_wall_time_parsing() {
        assert_eq!(
            combine(date(2024, 3, 15), "09:30"),
            date(2024, 3, 15).and_hms_opt(9, 30, 0)
        );
        assert!(parse_wall_time("9:3x").is_none());
        assert_eq!(format_wall_time(NaiveTime::from_hms_opt(7, 5, 0).unwrap()), "07:05");
    }
}
